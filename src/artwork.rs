//! Artwork decoding for PDF embedding.

use std::io::Cursor;

use image::ImageFormat;

use crate::error::{Error, Result};

/// A decoded artwork raster ready for embedding.
///
/// JPEG input is kept as-is (PDF viewers decode it natively); other formats
/// are expanded to RGB with an optional alpha channel. Decode failure is not
/// fatal to an export: the caller degrades to a document without the image.
pub struct Artwork {
    /// Pixel width.
    pub width: u32,

    /// Pixel height.
    pub height: u32,

    pub(crate) encoding: ArtworkEncoding,
}

pub(crate) enum ArtworkEncoding {
    /// JPEG data passed through to a DCT-encoded image stream.
    Jpeg(Vec<u8>),

    /// Decoded RGB samples, deflated at write time; alpha becomes a soft mask.
    Raw {
        rgb: Vec<u8>,
        alpha: Option<Vec<u8>>,
    },
}

impl Artwork {
    /// Decode uploaded image bytes (JPEG, PNG, or WebP).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::ArtworkDecode("empty image data".to_string()));
        }

        let format = image::guess_format(bytes)?;
        if format == ImageFormat::Jpeg {
            let (width, height) =
                image::ImageReader::with_format(Cursor::new(bytes), ImageFormat::Jpeg)
                    .into_dimensions()?;
            return Ok(Self {
                width,
                height,
                encoding: ArtworkEncoding::Jpeg(bytes.to_vec()),
            });
        }

        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = (rgba.width(), rgba.height());
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

        let rgb = rgba
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();
        let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());

        Ok(Self {
            width,
            height,
            encoding: ArtworkEncoding::Raw { rgb, alpha },
        })
    }

    /// Scale the pixel dimensions to fit a bounding box, preserving aspect.
    pub fn fit(&self, max_width: f32, max_height: f32) -> (f32, f32) {
        let (w, h) = (self.width as f32, self.height as f32);
        let scale = (max_width / w).min(max_height / h).min(1.0);
        (w * scale, h * scale)
    }
}
