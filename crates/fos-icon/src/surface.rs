//! Rasterizer surface
//!
//! The drawing target paths are submitted to. `PixmapSurface` scan-converts
//! with tiny-skia; other implementations can record or forward submissions.

use crate::Color;
use crate::error::{IconError, PathFailureReason, Result};
use crate::path::{FillRule, GradientStop, PathCommand};
use crate::render::PixelBuffer;

/// Paint for one submission, opacity already applied
#[derive(Debug, Clone, PartialEq)]
pub enum SurfacePaint {
    Solid(Color),
    /// Linear gradient with endpoints in pixel space
    Linear {
        start: (f32, f32),
        end: (f32, f32),
        stops: Vec<GradientStop>,
    },
}

/// Drawing surface accepting geometry already in pixel space
pub trait Surface {
    /// Surface size in pixels
    fn size(&self) -> (u32, u32);

    /// Fill the area enclosed by `geometry`
    fn fill(
        &mut self,
        geometry: &[PathCommand],
        paint: &SurfacePaint,
        rule: FillRule,
    ) -> std::result::Result<(), PathFailureReason>;

    /// Stroke the outline of `geometry` with a pixel-space `width`
    fn stroke(
        &mut self,
        geometry: &[PathCommand],
        paint: &SurfacePaint,
        width: f32,
    ) -> std::result::Result<(), PathFailureReason>;
}

/// Widest row tiny-skia allocates (row bytes must fit in an i32)
const MAX_ROW_PIXELS: u64 = i32::MAX as u64 / 4;

/// Surface backed by a tiny-skia Pixmap
pub struct PixmapSurface {
    pixmap: tiny_skia::Pixmap,
    anti_alias: bool,
}

impl PixmapSurface {
    /// Allocate a transparent surface.
    ///
    /// A zero dimension is `EmptyTarget`; a size tiny-skia cannot allocate
    /// (row bytes past `i32::MAX`) is `TargetTooLarge`.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(IconError::EmptyTarget {
                width: width as f32,
                height: height as f32,
            });
        }
        let pixmap = tiny_skia::Pixmap::new(width, height).ok_or(IconError::TargetTooLarge {
            width,
            height,
            max_pixels: MAX_ROW_PIXELS,
        })?;
        Ok(Self { pixmap, anti_alias: true })
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    pub fn pixmap(&self) -> &tiny_skia::Pixmap {
        &self.pixmap
    }

    /// Convert premultiplied pixmap storage into straight RGBA
    pub fn into_pixel_buffer(self) -> PixelBuffer {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let pixels: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        PixelBuffer::from_rgba(pixels, width, height)
    }

    fn paint(&self, paint: &SurfacePaint) -> std::result::Result<tiny_skia::Paint<'static>, PathFailureReason> {
        let mut out = tiny_skia::Paint::default();
        out.anti_alias = self.anti_alias;

        match paint {
            SurfacePaint::Solid(color) => out.set_color(color.to_tiny_skia()),
            SurfacePaint::Linear { start, end, stops } => {
                let stops = stops
                    .iter()
                    .map(|s| tiny_skia::GradientStop::new(s.offset, s.color.to_tiny_skia()))
                    .collect();
                out.shader = tiny_skia::LinearGradient::new(
                    tiny_skia::Point::from_xy(start.0, start.1),
                    tiny_skia::Point::from_xy(end.0, end.1),
                    stops,
                    tiny_skia::SpreadMode::Pad,
                    tiny_skia::Transform::identity(),
                )
                .ok_or_else(|| PathFailureReason::InvalidGradient(String::new()))?;
            }
        }

        Ok(out)
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn fill(
        &mut self,
        geometry: &[PathCommand],
        paint: &SurfacePaint,
        rule: FillRule,
    ) -> std::result::Result<(), PathFailureReason> {
        let path = build_path(geometry)?;
        let paint = self.paint(paint)?;
        self.pixmap.fill_path(
            &path,
            &paint,
            rule.to_tiny_skia(),
            tiny_skia::Transform::identity(),
            None,
        );
        Ok(())
    }

    fn stroke(
        &mut self,
        geometry: &[PathCommand],
        paint: &SurfacePaint,
        width: f32,
    ) -> std::result::Result<(), PathFailureReason> {
        if !width.is_finite() || width <= 0.0 {
            return Err(PathFailureReason::InvalidStroke);
        }
        let path = build_path(geometry)?;
        let paint = self.paint(paint)?;
        let stroke = tiny_skia::Stroke {
            width,
            ..tiny_skia::Stroke::default()
        };
        self.pixmap.stroke_path(&path, &paint, &stroke, tiny_skia::Transform::identity(), None);
        Ok(())
    }
}

/// Convert commands to a tiny-skia path
fn build_path(geometry: &[PathCommand]) -> std::result::Result<tiny_skia::Path, PathFailureReason> {
    let mut builder = tiny_skia::PathBuilder::new();

    for command in geometry {
        if !is_finite(command) {
            return Err(PathFailureReason::NonFiniteGeometry);
        }
        match *command {
            PathCommand::MoveTo(x, y) => builder.move_to(x, y),
            PathCommand::LineTo(x, y) => builder.line_to(x, y),
            // Already resolved by the drawer; kept total for direct callers.
            PathCommand::HorizontalTo(_) | PathCommand::VerticalTo(_) => {
                return Err(PathFailureReason::EmptyGeometry);
            }
            PathCommand::QuadTo(cx, cy, x, y) => builder.quad_to(cx, cy, x, y),
            PathCommand::CubicTo(cx1, cy1, cx2, cy2, x, y) => builder.cubic_to(cx1, cy1, cx2, cy2, x, y),
            PathCommand::Close => builder.close(),
        }
    }

    builder.finish().ok_or(PathFailureReason::EmptyGeometry)
}

fn is_finite(command: &PathCommand) -> bool {
    match *command {
        PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => x.is_finite() && y.is_finite(),
        PathCommand::HorizontalTo(v) | PathCommand::VerticalTo(v) => v.is_finite(),
        PathCommand::QuadTo(a, b, c, d) => [a, b, c, d].iter().all(|v| v.is_finite()),
        PathCommand::CubicTo(a, b, c, d, e, f) => [a, b, c, d, e, f].iter().all(|v| v.is_finite()),
        PathCommand::Close => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32, size: f32) -> Vec<PathCommand> {
        vec![
            PathCommand::MoveTo(x, y),
            PathCommand::LineTo(x + size, y),
            PathCommand::LineTo(x + size, y + size),
            PathCommand::LineTo(x, y + size),
            PathCommand::Close,
        ]
    }

    #[test]
    fn test_surface_zero_size() {
        assert!(matches!(PixmapSurface::new(0, 10), Err(IconError::EmptyTarget { .. })));
        assert!(matches!(PixmapSurface::new(10, 0), Err(IconError::EmptyTarget { .. })));
    }

    #[test]
    fn test_surface_row_too_wide() {
        let width = u32::MAX / 2;
        assert!(matches!(
            PixmapSurface::new(width, 1),
            Err(IconError::TargetTooLarge { width: w, height: 1, max_pixels: MAX_ROW_PIXELS }) if w == width
        ));
    }

    #[test]
    fn test_fill_square() {
        let mut surface = PixmapSurface::new(10, 10).unwrap();
        surface
            .fill(&square(0.0, 0.0, 5.0), &SurfacePaint::Solid(Color::RED), FillRule::NonZero)
            .unwrap();
        let buffer = surface.into_pixel_buffer();
        assert_eq!(buffer.get_pixel(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(buffer.get_pixel(7, 7), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_fill_rejects_empty_and_non_finite() {
        let mut surface = PixmapSurface::new(10, 10).unwrap();
        let paint = SurfacePaint::Solid(Color::RED);
        assert_eq!(
            surface.fill(&[], &paint, FillRule::NonZero),
            Err(PathFailureReason::EmptyGeometry)
        );
        assert_eq!(
            surface.fill(&[PathCommand::MoveTo(f32::NAN, 0.0)], &paint, FillRule::NonZero),
            Err(PathFailureReason::NonFiniteGeometry)
        );
    }

    #[test]
    fn test_stroke_rejects_bad_width() {
        let mut surface = PixmapSurface::new(10, 10).unwrap();
        let paint = SurfacePaint::Solid(Color::BLACK);
        assert_eq!(
            surface.stroke(&square(1.0, 1.0, 5.0), &paint, 0.0),
            Err(PathFailureReason::InvalidStroke)
        );
        assert!(surface.stroke(&square(1.0, 1.0, 5.0), &paint, 1.0).is_ok());
    }

    #[test]
    fn test_linear_gradient_paint() {
        let mut surface = PixmapSurface::new(10, 1).unwrap();
        let paint = SurfacePaint::Linear {
            start: (0.0, 0.0),
            end: (10.0, 0.0),
            stops: vec![GradientStop::new(0.0, Color::BLACK), GradientStop::new(1.0, Color::WHITE)],
        };
        surface.fill(&square(0.0, 0.0, 10.0), &paint, FillRule::NonZero).unwrap();
        let buffer = surface.into_pixel_buffer();
        let left = buffer.get_pixel(0, 0).unwrap();
        let right = buffer.get_pixel(9, 0).unwrap();
        assert!(left[0] < right[0]);
        assert_eq!(right[3], 255);
    }
}
