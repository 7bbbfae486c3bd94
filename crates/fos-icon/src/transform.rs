//! Coordinate transforms
//!
//! Maps the icon's viewBox space onto output pixel space.

use crate::error::{IconError, Result};
use serde::{Deserialize, Serialize};

/// Logical frame the icon's paths are authored in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    pub fn new(min_x: f32, min_y: f32, width: f32, height: f32) -> Self {
        Self { min_x, min_y, width, height }
    }

    /// Check the frame can be divided by
    pub fn validate(&self) -> Result<()> {
        let finite = self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        if finite && self.width > 0.0 && self.height > 0.0 {
            Ok(())
        } else {
            Err(IconError::DegenerateViewBox { width: self.width, height: self.height })
        }
    }

    /// Get aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0.0 { 1.0 } else { self.width / self.height }
    }
}

/// 2D affine matrix
///
/// | a c e |
/// | b d f |
/// | 0 0 1 |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub a: f32,  // scale-x
    pub b: f32,  // skew-y
    pub c: f32,  // skew-x
    pub d: f32,  // scale-y
    pub e: f32,  // translate-x
    pub f: f32,  // translate-y
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub const fn identity() -> Self {
        Self {
            a: 1.0, b: 0.0,
            c: 0.0, d: 1.0,
            e: 0.0, f: 0.0,
        }
    }

    /// Matrix from row values (a, b, c, d, e, f)
    pub const fn from_row(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Translation transform
    pub fn translate(tx: f32, ty: f32) -> Self {
        Self {
            a: 1.0, b: 0.0,
            c: 0.0, d: 1.0,
            e: tx, f: ty,
        }
    }

    /// Scale transform
    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx, b: 0.0,
            c: 0.0, d: sy,
            e: 0.0, f: 0.0,
        }
    }

    /// Rotation transform (angle in radians)
    pub fn rotate(angle: f32) -> Self {
        let cos = angle.cos();
        let sin = angle.sin();
        Self {
            a: cos, b: sin,
            c: -sin, d: cos,
            e: 0.0, f: 0.0,
        }
    }

    /// Skew both axes (angles in radians)
    pub fn skew(ax: f32, ay: f32) -> Self {
        Self {
            a: 1.0, b: ay.tan(),
            c: ax.tan(), d: 1.0,
            e: 0.0, f: 0.0,
        }
    }

    /// Matrix multiplication
    /// Returns self * other (self applied after other)
    pub fn multiply(&self, other: &Transform2D) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }

    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det.abs() > f32::EPSILON * f32::EPSILON
    }

    pub fn inverse(&self) -> Option<Self> {
        if !self.is_invertible() {
            return None;
        }
        let inv_det = 1.0 / self.determinant();
        Some(Self {
            a: self.d * inv_det,
            b: -self.b * inv_det,
            c: -self.c * inv_det,
            d: self.a * inv_det,
            e: (self.c * self.f - self.d * self.e) * inv_det,
            f: (self.b * self.e - self.a * self.f) * inv_det,
        })
    }

    /// Average linear scale factor, used for stroke widths
    pub fn mean_scale(&self) -> f32 {
        self.determinant().abs().sqrt()
    }

    /// Finite and invertible, or `DegenerateTransform`
    pub fn checked(self) -> Result<Self> {
        if self.is_finite() && self.is_invertible() {
            Ok(self)
        } else {
            Err(IconError::DegenerateTransform)
        }
    }

    pub fn to_tiny_skia(&self) -> tiny_skia::Transform {
        tiny_skia::Transform::from_row(self.a, self.b, self.c, self.d, self.e, self.f)
    }
}

/// Transform placing `view_box` into the pixel rectangle (x, y, w, h)
///
/// Computed as `translate(x - min_x, y - min_y) * scale(w / width, h / height)`:
/// points are scaled first, then translated. With a non-zero viewBox origin
/// the origin therefore lands at `min * scale + (x - min)`, not at (x, y).
pub fn target_transform(view_box: &ViewBox, x: f32, y: f32, w: f32, h: f32) -> Result<Transform2D> {
    view_box.validate()?;
    let scale_w = w / view_box.width;
    let scale_h = h / view_box.height;
    let transform = Transform2D::translate(x - view_box.min_x, y - view_box.min_y)
        .multiply(&Transform2D::scale(scale_w, scale_h))
        .checked()?;
    tracing::debug!(scale_w, scale_h, tx = transform.e, ty = transform.f, "computed target transform");
    Ok(transform)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-4 && (a.1 - b.1).abs() < 1e-4
    }

    #[test]
    fn test_identity() {
        let t = Transform2D::identity();
        assert_eq!(t.transform_point(10.0, 20.0), (10.0, 20.0));
    }

    #[test]
    fn test_multiply_order() {
        let scale = Transform2D::scale(2.0, 2.0);
        let translate = Transform2D::translate(10.0, 0.0);
        // translate * scale: scale first
        let t = translate.multiply(&scale);
        assert_eq!(t.transform_point(1.0, 1.0), (12.0, 2.0));
        // scale * translate: translate first
        let t = scale.multiply(&translate);
        assert_eq!(t.transform_point(1.0, 1.0), (22.0, 2.0));
    }

    #[test]
    fn test_inverse() {
        let t = Transform2D::translate(5.0, -3.0).multiply(&Transform2D::scale(2.0, 4.0));
        let inv = t.inverse().unwrap();
        let (x, y) = t.transform_point(3.0, 7.0);
        assert!(approx(inv.transform_point(x, y), (3.0, 7.0)));
        assert!(Transform2D::scale(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn test_target_transform_maps_corners() {
        let vb = ViewBox::new(0.0, 0.0, 50.0, 25.0);
        let t = target_transform(&vb, 0.0, 0.0, 100.0, 100.0).unwrap();
        assert!(approx(t.transform_point(0.0, 0.0), (0.0, 0.0)));
        assert!(approx(t.transform_point(50.0, 25.0), (100.0, 100.0)));

        let t = target_transform(&vb, 10.0, 20.0, 100.0, 50.0).unwrap();
        assert!(approx(t.transform_point(0.0, 0.0), (10.0, 20.0)));
        assert!(approx(t.transform_point(50.0, 25.0), (110.0, 70.0)));
    }

    #[test]
    fn test_target_transform_offset_origin() {
        // Scale is applied before the origin shift.
        let vb = ViewBox::new(10.0, 10.0, 10.0, 10.0);
        let t = target_transform(&vb, 0.0, 0.0, 20.0, 20.0).unwrap();
        assert!(approx(t.transform_point(10.0, 10.0), (10.0, 10.0)));
        assert_eq!((t.e, t.f), (-10.0, -10.0));
    }

    #[test]
    fn test_target_transform_degenerate() {
        let vb = ViewBox::new(0.0, 0.0, 0.0, 10.0);
        assert!(matches!(
            target_transform(&vb, 0.0, 0.0, 10.0, 10.0),
            Err(IconError::DegenerateViewBox { .. })
        ));
        let vb = ViewBox::new(0.0, 0.0, 10.0, -1.0);
        assert!(vb.validate().is_err());
        let vb = ViewBox::new(0.0, 0.0, f32::NAN, 10.0);
        assert!(vb.validate().is_err());
    }

    #[test]
    fn test_target_transform_zero_size_target() {
        let vb = ViewBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(matches!(
            target_transform(&vb, 0.0, 0.0, 0.0, 10.0),
            Err(IconError::DegenerateTransform)
        ));
    }

    #[test]
    fn test_mean_scale() {
        assert!((Transform2D::scale(2.0, 8.0).mean_scale() - 4.0).abs() < 1e-6);
        assert!((Transform2D::rotate(0.7).mean_scale() - 1.0).abs() < 1e-5);
    }
}
