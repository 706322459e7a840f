// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JPEG encoding for engine-produced result images.

use std::path::Path;

use docscan_core::error::DocscanError;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use tracing::{debug, instrument};

/// Encode an image as JPEG bytes with the given quality (1-100).
///
/// Alpha is dropped; JPEG has no transparency.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, DocscanError> {
    let mut buffer = Vec::new();
    let rgb = image.to_rgb8();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|err| DocscanError::ImageError(format!("JPEG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Encode `image` and write it to `path`, replacing any existing content.
#[instrument(skip(image), fields(path = %path.display(), width = image.width(), height = image.height()))]
pub fn write_jpeg(image: &DynamicImage, path: &Path, quality: u8) -> Result<(), DocscanError> {
    let bytes = encode_jpeg(image, quality)?;
    std::fs::write(path, &bytes)?;
    debug!(bytes = bytes.len(), quality, "JPEG written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        }))
    }

    #[test]
    fn written_jpeg_decodes_with_same_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.jpg");

        write_jpeg(&sample(321, 123), &path, 90).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), 321);
        assert_eq!(decoded.height(), 123);
    }

    #[test]
    fn encoded_bytes_are_jpeg() {
        let bytes = encode_jpeg(&sample(16, 16), 90).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone").join("page.jpg");
        match write_jpeg(&sample(4, 4), &path, 90) {
            Err(DocscanError::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
