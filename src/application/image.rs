//! # Image Sniffing
//!
//! Identifies JPEG, PNG and GIF payloads from their magic numbers and reads
//! their dimensions from the container headers.
//! Dimensions are best effort: any decode failure yields `0x0` so the image
//! itself can still be delivered.

use bytes::Bytes;
use std::io::Cursor;

use crate::domain::types::ImageContent;

const JPEG_MAGIC: &[u8] = &[0xff, 0xd8, 0xff];
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];
const GIF_MAGIC: &[u8] = b"GIF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
        }
    }

    fn decoder_format(self) -> ::image::ImageFormat {
        match self {
            ImageFormat::Jpeg => ::image::ImageFormat::Jpeg,
            ImageFormat::Png => ::image::ImageFormat::Png,
            ImageFormat::Gif => ::image::ImageFormat::Gif,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("unrecognized image format")]
    UnrecognizedFormat,
}

pub fn identify(data: &[u8]) -> Result<ImageFormat, ImageError> {
    [
        (JPEG_MAGIC, ImageFormat::Jpeg),
        (PNG_MAGIC, ImageFormat::Png),
        (GIF_MAGIC, ImageFormat::Gif),
    ]
    .into_iter()
    .find(|(magic, _)| data.starts_with(magic))
    .map(|(_, format)| format)
    .ok_or(ImageError::UnrecognizedFormat)
}

/// Reads the dimensions of an already identified image, `0x0` on failure.
/// Only the header is parsed; pixel data is never decoded.
pub fn decode(data: &[u8], format: ImageFormat) -> Dimensions {
    let reader = ::image::ImageReader::with_format(Cursor::new(data), format.decoder_format());

    match reader.into_dimensions() {
        Ok((width, height)) => {
            tracing::info!("Decoded image as {:?} with size {}*{}.", format, width, height);
            Dimensions { width, height }
        }
        Err(e) => {
            tracing::warn!("Failed to decode image as {:?}: {}", format, e);
            Dimensions::default()
        }
    }
}

/// Wraps downloaded bytes into an [`ImageContent`], sniffing whatever it can.
pub fn describe(data: Bytes) -> ImageContent {
    match identify(&data) {
        Ok(format) => {
            let Dimensions { width, height } = decode(&data, format);
            ImageContent {
                data,
                width,
                height,
                mime_type: format.mime_type().to_string(),
                extension: format.extension().to_string(),
            }
        }
        Err(e) => {
            tracing::error!("{}", e);
            ImageContent {
                data,
                width: 0,
                height: 0,
                mime_type: "application/octet-stream".to_string(),
                extension: String::new(),
            }
        }
    }
}
