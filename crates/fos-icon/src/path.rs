//! Path geometry and styles

use crate::Color;
use crate::transform::Transform2D;
use serde::{Deserialize, Serialize};

/// Absolute path command in viewBox coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Move to (x, y)
    MoveTo(f32, f32),
    /// Line to (x, y)
    LineTo(f32, f32),
    /// Horizontal line to x
    HorizontalTo(f32),
    /// Vertical line to y
    VerticalTo(f32),
    /// Quadratic bezier (cx, cy, x, y)
    QuadTo(f32, f32, f32, f32),
    /// Cubic bezier (cx1, cy1, cx2, cy2, x, y)
    CubicTo(f32, f32, f32, f32, f32, f32),
    /// Close subpath
    Close,
}

/// Map commands through `transform`.
///
/// Horizontal and vertical lines become `LineTo`, since they stop being
/// axis-aligned once rotated or skewed.
pub(crate) fn transform_commands(commands: &[PathCommand], transform: &Transform2D) -> Vec<PathCommand> {
    let mut out = Vec::with_capacity(commands.len());
    let (mut cur_x, mut cur_y) = (0.0, 0.0);
    let (mut start_x, mut start_y) = (0.0, 0.0);

    for command in commands {
        let mapped = match *command {
            PathCommand::MoveTo(x, y) => {
                (cur_x, cur_y) = (x, y);
                (start_x, start_y) = (x, y);
                let (x, y) = transform.transform_point(x, y);
                PathCommand::MoveTo(x, y)
            }
            PathCommand::LineTo(x, y) => {
                (cur_x, cur_y) = (x, y);
                let (x, y) = transform.transform_point(x, y);
                PathCommand::LineTo(x, y)
            }
            PathCommand::HorizontalTo(x) => {
                cur_x = x;
                let (x, y) = transform.transform_point(x, cur_y);
                PathCommand::LineTo(x, y)
            }
            PathCommand::VerticalTo(y) => {
                cur_y = y;
                let (x, y) = transform.transform_point(cur_x, y);
                PathCommand::LineTo(x, y)
            }
            PathCommand::QuadTo(cx, cy, x, y) => {
                (cur_x, cur_y) = (x, y);
                let (cx, cy) = transform.transform_point(cx, cy);
                let (x, y) = transform.transform_point(x, y);
                PathCommand::QuadTo(cx, cy, x, y)
            }
            PathCommand::CubicTo(cx1, cy1, cx2, cy2, x, y) => {
                (cur_x, cur_y) = (x, y);
                let (cx1, cy1) = transform.transform_point(cx1, cy1);
                let (cx2, cy2) = transform.transform_point(cx2, cy2);
                let (x, y) = transform.transform_point(x, y);
                PathCommand::CubicTo(cx1, cy1, cx2, cy2, x, y)
            }
            PathCommand::Close => {
                (cur_x, cur_y) = (start_x, start_y);
                PathCommand::Close
            }
        };
        out.push(mapped);
    }

    out
}

/// Fill winding rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    pub(crate) fn to_tiny_skia(self) -> tiny_skia::FillRule {
        match self {
            FillRule::NonZero => tiny_skia::FillRule::Winding,
            FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        }
    }
}

/// Path fill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    /// Solid color fill
    Solid(Color),
    /// Reference to a gradient defined on the icon
    Gradient(String),
}

impl From<Color> for Fill {
    fn from(color: Color) -> Self {
        Fill::Solid(color)
    }
}

/// Stroke applied to a path outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    /// Width in viewBox units
    pub width: f32,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Style of one icon path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    pub fill: Option<Fill>,
    pub fill_rule: FillRule,
    pub stroke: Option<StrokeStyle>,
    /// Per-path opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            fill: Some(Fill::Solid(Color::BLACK)),
            fill_rule: FillRule::NonZero,
            stroke: None,
            opacity: 1.0,
        }
    }
}

/// One drawable element of an icon
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IconPath {
    pub commands: Vec<PathCommand>,
    pub style: PathStyle,
}

impl IconPath {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands, style: PathStyle::default() }
    }

    /// Closed axis-aligned rectangle
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(vec![
            PathCommand::MoveTo(x, y),
            PathCommand::HorizontalTo(x + width),
            PathCommand::VerticalTo(y + height),
            PathCommand::HorizontalTo(x),
            PathCommand::Close,
        ])
    }

    pub fn with_fill(mut self, fill: impl Into<Fill>) -> Self {
        self.style.fill = Some(fill.into());
        self
    }

    pub fn without_fill(mut self) -> Self {
        self.style.fill = None;
        self
    }

    pub fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.style.fill_rule = rule;
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.style.stroke = Some(stroke);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.style.opacity = opacity;
        self
    }
}

/// Gradient color stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient (0.0 - 1.0)
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Linear gradient in viewBox coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, stops: Vec<GradientStop>) -> Self {
        Self { x1, y1, x2, y2, stops }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_resolves_axis_lines() {
        let path = IconPath::rect(1.0, 2.0, 3.0, 4.0);
        let t = Transform2D::scale(2.0, 2.0);
        let out = transform_commands(&path.commands, &t);
        assert_eq!(
            out,
            vec![
                PathCommand::MoveTo(2.0, 4.0),
                PathCommand::LineTo(8.0, 4.0),
                PathCommand::LineTo(8.0, 12.0),
                PathCommand::LineTo(2.0, 12.0),
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn test_close_resets_current_point() {
        let commands = [
            PathCommand::MoveTo(5.0, 5.0),
            PathCommand::LineTo(9.0, 9.0),
            PathCommand::Close,
            PathCommand::HorizontalTo(0.0),
        ];
        let out = transform_commands(&commands, &Transform2D::identity());
        assert_eq!(out[3], PathCommand::LineTo(0.0, 5.0));
    }

    #[test]
    fn test_default_style() {
        let path = IconPath::new(Vec::new());
        assert_eq!(path.style.fill, Some(Fill::Solid(Color::BLACK)));
        assert_eq!(path.style.opacity, 1.0);
        assert!(path.style.stroke.is_none());
    }
}
