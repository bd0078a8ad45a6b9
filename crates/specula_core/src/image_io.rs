//! Reading and writing frame buffers.
//!
//! PPM (P3 ascii or P6 binary, maxval 255) is the native output format.
//! Any other raster format the `image` crate can encode is chosen by file
//! extension.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, ImageEncoder, ImageFormat};
use thiserror::Error;

use crate::frame::{FrameBuffer, Pixel};

/// Errors that can occur while reading or writing images.
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Frame buffer holds {actual} pixels but {width}x{height} needs {expected}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type ImageIoResult<T> = Result<T, ImageIoError>;

/// Encoding used when writing a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Portable pixmap; `ascii` selects P3 over P6.
    Ppm { ascii: bool },
    /// Anything else the `image` crate can encode.
    Raster(ImageFormat),
}

impl OutputFormat {
    /// Pick a format from the file extension (`.ppm`/`.pnm` -> binary PPM).
    pub fn from_path(path: impl AsRef<Path>) -> ImageIoResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "ppm" | "pnm" => Ok(OutputFormat::Ppm { ascii: false }),
            _ => ImageFormat::from_path(path)
                .map(OutputFormat::Raster)
                .map_err(|_| ImageIoError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

fn check_size(frame: &FrameBuffer) -> ImageIoResult<()> {
    let expected = frame.width as usize * frame.height as usize;
    if frame.pixels.len() != expected {
        return Err(ImageIoError::SizeMismatch {
            width: frame.width,
            height: frame.height,
            expected,
            actual: frame.pixels.len(),
        });
    }
    Ok(())
}

/// Encode a frame buffer as PPM into any writer.
pub fn encode_ppm<W: Write>(writer: W, frame: &FrameBuffer, ascii: bool) -> ImageIoResult<()> {
    check_size(frame)?;

    let encoding = if ascii {
        SampleEncoding::Ascii
    } else {
        SampleEncoding::Binary
    };
    PnmEncoder::new(writer)
        .with_subtype(PnmSubtype::Pixmap(encoding))
        .write_image(frame.as_bytes(), frame.width, frame.height, ColorType::Rgb8)?;
    Ok(())
}

/// Write a frame buffer to disk.
pub fn write_image(
    path: impl AsRef<Path>,
    frame: &FrameBuffer,
    format: OutputFormat,
) -> ImageIoResult<()> {
    let path = path.as_ref();
    check_size(frame)?;

    match format {
        OutputFormat::Ppm { ascii } => {
            let mut writer = BufWriter::new(File::create(path)?);
            encode_ppm(&mut writer, frame, ascii)?;
            writer.flush()?;
        }
        OutputFormat::Raster(format) => {
            image::save_buffer_with_format(
                path,
                frame.as_bytes(),
                frame.width,
                frame.height,
                ColorType::Rgb8,
                format,
            )?;
        }
    }

    log::debug!(
        "Wrote {}x{} image to {} ({:?})",
        frame.width,
        frame.height,
        path.display(),
        format
    );
    Ok(())
}

/// Decode raw image bytes into a frame buffer. Alpha is dropped.
pub fn decode_image(bytes: &[u8]) -> ImageIoResult<FrameBuffer> {
    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    frame_from_rgb(rgb)
}

/// Read an image from disk into a frame buffer. Alpha is dropped.
pub fn read_image(path: impl AsRef<Path>) -> ImageIoResult<FrameBuffer> {
    let rgb = image::open(path.as_ref())?.to_rgb8();
    frame_from_rgb(rgb)
}

fn frame_from_rgb(rgb: image::RgbImage) -> ImageIoResult<FrameBuffer> {
    let (width, height) = rgb.dimensions();
    let raw = rgb.into_raw();
    let pixels: Vec<Pixel> = bytemuck::cast_slice(&raw).to_vec();
    let actual = pixels.len();

    FrameBuffer::from_pixels(width, height, pixels).ok_or(ImageIoError::SizeMismatch {
        width,
        height,
        expected: width as usize * height as usize,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> FrameBuffer {
        let mut frame = FrameBuffer::new(3, 2, Pixel::BLACK);
        frame.set(0, 0, Pixel::new(255, 0, 0));
        frame.set(1, 0, Pixel::new(0, 255, 0));
        frame.set(2, 0, Pixel::new(0, 0, 255));
        frame.set(1, 1, Pixel::new(12, 34, 56));
        frame
    }

    #[test]
    fn test_binary_ppm_header() {
        let mut bytes = Vec::new();
        encode_ppm(&mut bytes, &checker(), false).unwrap();

        assert!(bytes.starts_with(b"P6"));
        // Header followed by exactly width * height * 3 payload bytes
        assert!(bytes.ends_with(checker().as_bytes()));
    }

    #[test]
    fn test_ascii_ppm_header() {
        let mut bytes = Vec::new();
        encode_ppm(&mut bytes, &checker(), true).unwrap();

        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("P3"));
        assert!(text.contains("255"));
    }

    #[test]
    fn test_ppm_decodes_back() {
        for ascii in [false, true] {
            let mut bytes = Vec::new();
            encode_ppm(&mut bytes, &checker(), ascii).unwrap();

            let decoded = decode_image(&bytes).unwrap();
            assert_eq!(decoded, checker(), "ascii={}", ascii);
        }
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let frame = FrameBuffer {
            width: 4,
            height: 4,
            pixels: vec![Pixel::BLACK; 3],
        };
        let mut bytes = Vec::new();
        let err = encode_ppm(&mut bytes, &frame, false).unwrap_err();
        assert!(matches!(err, ImageIoError::SizeMismatch { expected: 16, actual: 3, .. }));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path("out.ppm").unwrap(),
            OutputFormat::Ppm { ascii: false }
        );
        assert_eq!(
            OutputFormat::from_path("OUT.PNM").unwrap(),
            OutputFormat::Ppm { ascii: false }
        );
        assert_eq!(
            OutputFormat::from_path("out.png").unwrap(),
            OutputFormat::Raster(ImageFormat::Png)
        );
        assert!(OutputFormat::from_path("out.nope").is_err());
    }

    #[test]
    fn test_write_and_read_file() {
        let path = std::env::temp_dir().join(format!("specula_io_{}.ppm", std::process::id()));
        write_image(&path, &checker(), OutputFormat::Ppm { ascii: false }).unwrap();

        let read = read_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(read, checker());
    }
}
