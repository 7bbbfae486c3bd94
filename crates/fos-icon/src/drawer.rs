//! Path drawer - submits one transformed path to a surface

use std::collections::HashMap;

use crate::error::PathFailureReason;
use crate::path::{Fill, GradientStop, IconPath, LinearGradient, transform_commands};
use crate::surface::{Surface, SurfacePaint};
use crate::transform::Transform2D;

/// Clamp an opacity factor into 0.0..=1.0 (NaN becomes 0.0)
pub(crate) fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) }
}

/// Draw `path` onto `surface` through `transform`.
///
/// Every coordinate is mapped into pixel space before submission. The
/// effective opacity is `opacity * path.style.opacity`, each factor clamped
/// into 0.0..=1.0. Gradient fills are looked up in `gradients`.
pub fn draw_path<S: Surface + ?Sized>(
    surface: &mut S,
    path: &IconPath,
    transform: &Transform2D,
    opacity: f32,
    gradients: &HashMap<String, LinearGradient>,
) -> Result<(), PathFailureReason> {
    let opacity = clamp_opacity(opacity) * clamp_opacity(path.style.opacity);
    let geometry = transform_commands(&path.commands, transform);

    if let Some(fill) = &path.style.fill {
        let paint = match fill {
            Fill::Solid(color) => SurfacePaint::Solid(color.with_opacity(opacity)),
            Fill::Gradient(id) => {
                let gradient = gradients
                    .get(id)
                    .ok_or_else(|| PathFailureReason::MissingGradient(id.clone()))?;
                gradient_paint(gradient, transform, opacity)
            }
        };
        let rule = path.style.fill_rule;
        surface.fill(&geometry, &paint, rule).map_err(|reason| match (reason, fill) {
            (PathFailureReason::InvalidGradient(_), Fill::Gradient(id)) => {
                PathFailureReason::InvalidGradient(id.clone())
            }
            (reason, _) => reason,
        })?;
    }

    if let Some(stroke) = &path.style.stroke {
        let paint = SurfacePaint::Solid(stroke.color.with_opacity(opacity));
        surface.stroke(&geometry, &paint, stroke.width * transform.mean_scale())?;
    }

    tracing::trace!(commands = geometry.len(), opacity, "submitted path");
    Ok(())
}

fn gradient_paint(gradient: &LinearGradient, transform: &Transform2D, opacity: f32) -> SurfacePaint {
    SurfacePaint::Linear {
        start: transform.transform_point(gradient.x1, gradient.y1),
        end: transform.transform_point(gradient.x2, gradient.y2),
        stops: gradient
            .stops
            .iter()
            .map(|stop| GradientStop::new(stop.offset, stop.color.with_opacity(opacity)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use crate::path::{FillRule, PathCommand, StrokeStyle};

    /// Records submissions instead of rasterizing
    #[derive(Default)]
    struct RecordingSurface {
        fills: Vec<(Vec<PathCommand>, SurfacePaint)>,
        strokes: Vec<f32>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (100, 100)
        }

        fn fill(
            &mut self,
            geometry: &[PathCommand],
            paint: &SurfacePaint,
            _rule: FillRule,
        ) -> Result<(), PathFailureReason> {
            self.fills.push((geometry.to_vec(), paint.clone()));
            Ok(())
        }

        fn stroke(
            &mut self,
            _geometry: &[PathCommand],
            _paint: &SurfacePaint,
            width: f32,
        ) -> Result<(), PathFailureReason> {
            self.strokes.push(width);
            Ok(())
        }
    }

    #[test]
    fn test_geometry_is_transformed() {
        let mut surface = RecordingSurface::default();
        let path = IconPath::new(vec![PathCommand::MoveTo(1.0, 1.0), PathCommand::LineTo(2.0, 3.0)]);
        let t = Transform2D::translate(10.0, 0.0).multiply(&Transform2D::scale(2.0, 2.0));
        draw_path(&mut surface, &path, &t, 1.0, &HashMap::new()).unwrap();
        assert_eq!(
            surface.fills[0].0,
            vec![PathCommand::MoveTo(12.0, 2.0), PathCommand::LineTo(14.0, 6.0)]
        );
    }

    #[test]
    fn test_opacity_is_clamped_and_combined() {
        let mut surface = RecordingSurface::default();
        let path = IconPath::rect(0.0, 0.0, 1.0, 1.0).with_fill(Color::RED).with_opacity(0.5);
        let gradients = HashMap::new();

        draw_path(&mut surface, &path, &Transform2D::identity(), 3.0, &gradients).unwrap();
        draw_path(&mut surface, &path, &Transform2D::identity(), -1.0, &gradients).unwrap();
        draw_path(&mut surface, &path, &Transform2D::identity(), f32::NAN, &gradients).unwrap();

        assert_eq!(surface.fills[0].1, SurfacePaint::Solid(Color::rgba(255, 0, 0, 128)));
        assert_eq!(surface.fills[1].1, SurfacePaint::Solid(Color::rgba(255, 0, 0, 0)));
        assert_eq!(surface.fills[2].1, SurfacePaint::Solid(Color::rgba(255, 0, 0, 0)));
    }

    #[test]
    fn test_stroke_width_scales_with_transform() {
        let mut surface = RecordingSurface::default();
        let path = IconPath::rect(0.0, 0.0, 1.0, 1.0)
            .without_fill()
            .with_stroke(StrokeStyle::solid(Color::BLACK, 1.5));
        draw_path(&mut surface, &path, &Transform2D::scale(4.0, 4.0), 1.0, &HashMap::new()).unwrap();
        assert!(surface.fills.is_empty());
        assert_eq!(surface.strokes, vec![6.0]);
    }

    #[test]
    fn test_missing_gradient() {
        let mut surface = RecordingSurface::default();
        let path = IconPath::rect(0.0, 0.0, 1.0, 1.0).with_fill(Fill::Gradient("sky".into()));
        let result = draw_path(&mut surface, &path, &Transform2D::identity(), 1.0, &HashMap::new());
        assert_eq!(result, Err(PathFailureReason::MissingGradient("sky".into())));
        assert!(surface.fills.is_empty());
    }

    #[test]
    fn test_gradient_endpoints_transformed() {
        let mut surface = RecordingSurface::default();
        let mut gradients = HashMap::new();
        gradients.insert(
            "sky".to_string(),
            LinearGradient::new(0.0, 0.0, 10.0, 0.0, vec![GradientStop::new(0.0, Color::BLUE)]),
        );
        let path = IconPath::rect(0.0, 0.0, 10.0, 10.0).with_fill(Fill::Gradient("sky".into()));
        draw_path(&mut surface, &path, &Transform2D::scale(2.0, 2.0), 1.0, &gradients).unwrap();
        match &surface.fills[0].1 {
            SurfacePaint::Linear { start, end, stops } => {
                assert_eq!(*start, (0.0, 0.0));
                assert_eq!(*end, (20.0, 0.0));
                assert_eq!(stops[0].color, Color::BLUE);
            }
            other => panic!("expected gradient paint, got {:?}", other),
        }
    }
}
