//! fOS Icon - Icon compositing and raster output
//!
//! Turns a parsed vector icon (a viewBox plus ordered path outlines) into a
//! fixed-size RGBA image and writes it out as PNG or JPEG.
//!
//! This crate provides:
//! - Viewbox to pixel mapping (`Transform2D`, `target_transform`)
//! - Per-path drawing with opacity onto a rasterizer `Surface`
//! - Painter's-order compositing of a whole `Icon`
//! - Pixel buffer materialization at a requested `RenderSize`
//! - Buffered PNG/JPEG file output
//!
//! Parsing SVG markup is not handled here; callers build `Icon` values
//! directly. Scan conversion and anti-aliasing are done by tiny-skia.

mod drawer;
mod encode;
mod error;
mod icon;
mod options;
mod path;
mod render;
mod surface;
pub mod transform;

pub use drawer::draw_path;
pub use encode::{OutputFormat, encode, save};
pub use error::{IconError, PathFailure, PathFailureReason, Result};
pub use icon::Icon;
pub use options::RenderOptions;
pub use path::{Fill, FillRule, GradientStop, IconPath, LinearGradient, PathCommand, PathStyle, StrokeStyle};
pub use render::{PixelBuffer, RenderSize, Rendered};
pub use surface::{PixmapSurface, Surface, SurfacePaint};
pub use transform::{Transform2D, ViewBox, target_transform};

use serde::{Deserialize, Serialize};

/// Color (straight RGBA)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create from hex string (e.g., "#ff0000", "#f00", "#ff000080")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::rgb(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Color::rgba(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Same color with alpha multiplied by `opacity` (expected in 0.0..=1.0)
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (self.a as f32 * opacity).round().clamp(0.0, 255.0) as u8;
        Self { a, ..self }
    }

    pub(crate) fn to_tiny_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}
