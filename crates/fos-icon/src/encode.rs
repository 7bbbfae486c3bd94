//! PNG/JPEG encoding and file output

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::error::{ParameterError, ParameterErrorKind};
use image::{ExtendedColorType, ImageEncoder, ImageError};

use crate::error::{IconError, PathFailure, Result};
use crate::icon::Icon;
use crate::options::RenderOptions;
use crate::render::{PixelBuffer, RenderSize};

/// Output file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless, keeps alpha
    Png,
    /// Lossy, no alpha: pixels are flattened over a background color
    Jpeg,
}

impl OutputFormat {
    /// Get format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Encode `buffer` as `format` into `writer`
pub fn encode<W: Write>(buffer: &PixelBuffer, format: OutputFormat, writer: W, options: &RenderOptions) -> Result<()> {
    let expected = buffer.width as usize * buffer.height as usize * 4;
    if buffer.pixels.len() != expected {
        return Err(IconError::Encode(ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ))));
    }

    match format {
        OutputFormat::Png => {
            PngEncoder::new(writer).write_image(
                &buffer.pixels,
                buffer.width,
                buffer.height,
                ExtendedColorType::Rgba8,
            )?;
        }
        OutputFormat::Jpeg => {
            let rgb = buffer.to_rgb_over(options.jpeg_background);
            JpegEncoder::new_with_quality(writer, options.effective_jpeg_quality()).write_image(
                &rgb,
                buffer.width,
                buffer.height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }

    Ok(())
}

/// Encode `buffer` and write it to `path`.
///
/// Creation, write and flush failures come back as `Create`, `Write` and
/// `Flush`; a codec failure as `Encode`. The file is closed before
/// returning on every path.
///
/// Match on the variant, not on the source's `io::ErrorKind`: the PNG codec
/// wraps OS errors, so a full disk reaches `Write` as `ErrorKind::Other`.
pub fn save(path: impl AsRef<Path>, buffer: &PixelBuffer, format: OutputFormat, options: &RenderOptions) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| IconError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    encode(buffer, format, &mut writer, options).map_err(|err| match err {
        IconError::Encode(ImageError::IoError(source)) => IconError::Write {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    writer.flush().map_err(|source| IconError::Flush {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        format = format.extension(),
        width = buffer.width,
        height = buffer.height,
        "saved icon image"
    );
    Ok(())
}

impl Icon {
    /// Render at `size` and save as PNG
    pub fn save_png(&self, path: impl AsRef<Path>, size: RenderSize) -> Result<Vec<PathFailure>> {
        self.save_with_options(path, size, OutputFormat::Png, &RenderOptions::default())
    }

    /// Render at `size` and save as JPEG (transparency is lost)
    pub fn save_jpeg(&self, path: impl AsRef<Path>, size: RenderSize) -> Result<Vec<PathFailure>> {
        self.save_with_options(path, size, OutputFormat::Jpeg, &RenderOptions::default())
    }

    /// Render at `size` and save in the format named by the file extension
    pub fn save_as(&self, path: impl AsRef<Path>, size: RenderSize) -> Result<Vec<PathFailure>> {
        let path = path.as_ref();
        let format = OutputFormat::from_path(path).ok_or_else(|| IconError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        self.save_with_options(path, size, format, &RenderOptions::default())
    }

    /// Render a `width` x `height` image with the stored transform and save
    /// it as `format`.
    ///
    /// Unlike the other `save_*` helpers this keeps whatever `set_viewport`
    /// and `apply_transform` produced.
    pub fn save_current(
        &self,
        path: impl AsRef<Path>,
        width: u32,
        height: u32,
        format: OutputFormat,
        options: &RenderOptions,
    ) -> Result<Vec<PathFailure>> {
        let rendered = self.render_current(width, height, options)?;
        save(path, &rendered.image, format, options)?;
        Ok(rendered.warnings)
    }

    /// Render at `size` and save as `format`.
    ///
    /// Returns the paths skipped while rendering. Nothing is written when
    /// rendering itself fails.
    pub fn save_with_options(
        &self,
        path: impl AsRef<Path>,
        size: RenderSize,
        format: OutputFormat,
        options: &RenderOptions,
    ) -> Result<Vec<PathFailure>> {
        let rendered = self.render_with_options(size, options)?;
        save(path, &rendered.image, format, options)?;
        Ok(rendered.warnings)
    }
}
