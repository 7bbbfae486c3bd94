//! Image materialization
//!
//! Resolves a requested size, allocates a fresh pixel buffer and composites
//! the icon into it.

use crate::Color;
use crate::error::{IconError, PathFailure, Result};
use crate::icon::Icon;
use crate::options::RenderOptions;
use crate::surface::PixmapSurface;
use crate::transform::{ViewBox, target_transform};

/// Requested output size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RenderSize {
    /// The viewBox size, one pixel per unit
    #[default]
    Natural,
    /// Fixed width, height follows the viewBox aspect ratio
    Width(f32),
    /// Fixed height, width follows the viewBox aspect ratio
    Height(f32),
    /// Both dimensions fixed
    Exact(f32, f32),
}

impl RenderSize {
    /// Map the "less than 1 means unspecified" convention.
    ///
    /// An unspecified width falls back to the viewBox width. An unspecified
    /// height is derived from the width and the viewBox aspect ratio.
    pub fn from_sentinel(view_box: &ViewBox, width: f32, height: f32) -> Self {
        match (width >= 1.0, height >= 1.0) {
            (false, false) => RenderSize::Natural,
            (true, false) => RenderSize::Width(width),
            (false, true) => RenderSize::Exact(view_box.width, height),
            (true, true) => RenderSize::Exact(width, height),
        }
    }

    /// Fractional (width, height) for `view_box`
    pub fn resolve(&self, view_box: &ViewBox) -> (f32, f32) {
        match *self {
            RenderSize::Natural => (view_box.width, view_box.height),
            RenderSize::Width(w) => (w, view_box.height * (w / view_box.width)),
            RenderSize::Height(h) => (view_box.width * (h / view_box.height), h),
            RenderSize::Exact(w, h) => (w, h),
        }
    }
}

/// Straight RGBA8 pixel buffer, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// RGBA pixel data
    pub pixels: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelBuffer {
    /// Create from raw RGBA data
    pub fn from_rgba(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        Self { pixels, width, height }
    }

    /// Fully transparent buffer
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::from_rgba(vec![0; width as usize * height as usize * 4], width, height)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// RGB8 data with alpha composited over `background`
    pub fn to_rgb_over(&self, background: Color) -> Vec<u8> {
        let blend = |c: u8, bg: u8, a: u16| -> u8 {
            ((c as u16 * a + bg as u16 * (255 - a) + 127) / 255) as u8
        };
        self.pixels
            .chunks_exact(4)
            .flat_map(|p| {
                let a = p[3] as u16;
                [
                    blend(p[0], background.r, a),
                    blend(p[1], background.g, a),
                    blend(p[2], background.b, a),
                ]
            })
            .collect()
    }
}

/// Output of a render call
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: PixelBuffer,
    /// Paths skipped while compositing
    pub warnings: Vec<PathFailure>,
}

impl Icon {
    /// Render at `size` with default options
    pub fn render(&self, size: RenderSize) -> Result<Rendered> {
        self.render_with_options(size, &RenderOptions::default())
    }

    /// Render at `size`.
    ///
    /// The viewBox-to-pixel transform is derived for this call only; the
    /// stored transform is neither read nor changed. Fractional sizes are
    /// truncated toward zero.
    pub fn render_with_options(&self, size: RenderSize, options: &RenderOptions) -> Result<Rendered> {
        self.view_box.validate()?;
        let (width, height) = size.resolve(&self.view_box);
        let (px_width, px_height) = pixel_size(width, height, options)?;
        let transform = target_transform(&self.view_box, 0.0, 0.0, width, height)?;

        let mut surface = allocate(px_width, px_height, options)?;
        let warnings = self.draw_with(&mut surface, &transform, 1.0);
        Ok(Rendered { image: surface.into_pixel_buffer(), warnings })
    }

    /// Render into a `width` x `height` buffer with the stored transform
    pub fn render_current(&self, width: u32, height: u32, options: &RenderOptions) -> Result<Rendered> {
        let (px_width, px_height) = check_pixels(width, height, options)?;
        let mut surface = allocate(px_width, px_height, options)?;
        let warnings = self.draw(&mut surface, 1.0);
        Ok(Rendered { image: surface.into_pixel_buffer(), warnings })
    }

    /// Store the target mapping for `size`, then render with it.
    ///
    /// Same pixels as `render_with_options`, but leaves the icon's transform
    /// set to the target mapping.
    pub fn set_target_and_render(&mut self, size: RenderSize, options: &RenderOptions) -> Result<Rendered> {
        self.view_box.validate()?;
        let (width, height) = size.resolve(&self.view_box);
        let (px_width, px_height) = pixel_size(width, height, options)?;
        self.set_viewport(0.0, 0.0, width, height)?;
        self.render_current(px_width, px_height, options)
    }
}

/// Truncate a resolved size to whole pixels and check it against the limits
fn pixel_size(width: f32, height: f32, options: &RenderOptions) -> Result<(u32, u32)> {
    if !width.is_finite() || !height.is_finite() || width < 1.0 || height < 1.0 {
        return Err(IconError::EmptyTarget { width, height });
    }
    check_pixels(width.trunc() as u32, height.trunc() as u32, options)
}

fn check_pixels(width: u32, height: u32, options: &RenderOptions) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(IconError::EmptyTarget {
            width: width as f32,
            height: height as f32,
        });
    }
    if width as u64 * height as u64 > options.max_pixels {
        return Err(IconError::TargetTooLarge {
            width,
            height,
            max_pixels: options.max_pixels,
        });
    }
    Ok((width, height))
}

fn allocate(width: u32, height: u32, options: &RenderOptions) -> Result<PixmapSurface> {
    tracing::debug!(width, height, "allocating pixel buffer");
    Ok(PixmapSurface::new(width, height)?.with_anti_alias(options.anti_alias))
}
