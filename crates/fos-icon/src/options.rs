//! Render and output configuration

use crate::Color;
use serde::{Deserialize, Serialize};

/// Largest target edge accepted by default (16384 x 16384 pixels)
const DEFAULT_MAX_EDGE: u64 = 16_384;

/// Options shared by rendering and file output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Upper bound on width * height of a render target
    pub max_pixels: u64,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Color that transparent pixels are flattened against in JPEG output
    pub jpeg_background: Color,
    /// Anti-alias path edges
    pub anti_alias: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_EDGE * DEFAULT_MAX_EDGE,
            jpeg_quality: 75,
            jpeg_background: Color::WHITE,
            anti_alias: true,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    /// Set JPEG quality, clamped into 1..=100
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn with_jpeg_background(mut self, background: Color) -> Self {
        self.jpeg_background = background;
        self
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// Quality actually handed to the JPEG encoder
    pub(crate) fn effective_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.jpeg_quality, 75);
        assert_eq!(options.jpeg_background, Color::WHITE);
        assert_eq!(options.max_pixels, 16_384 * 16_384);
        assert!(options.anti_alias);
    }

    #[test]
    fn test_quality_clamped() {
        assert_eq!(RenderOptions::new().with_jpeg_quality(0).jpeg_quality, 1);
        assert_eq!(RenderOptions::new().with_jpeg_quality(250).jpeg_quality, 100);

        let mut options = RenderOptions::new();
        options.jpeg_quality = 0;
        assert_eq!(options.effective_jpeg_quality(), 1);
    }
}
