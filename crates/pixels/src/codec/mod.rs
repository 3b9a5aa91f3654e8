//! Adapters over the external codecs.
//!
//! Every adapter has the same shape, [`DecodeFn`], and returns the codec's
//! native row-major RGBA tensor: `[height, width, 4]`, or
//! `[frames, height, width, 4]` for multi-frame GIFs.

pub(crate) mod bmp;
pub(crate) mod gif;
pub(crate) mod jpeg;
pub(crate) mod png;

use crate::{ImageFormat, Limits, PixelsError, Stage};
use base::Tensor;
use crates_image::{DynamicImage, ImageDecoder, RgbaImage};

pub(crate) type DecodeFn = fn(&[u8], &Limits) -> Result<Tensor<u8>, PixelsError>;

/// Checks limits against the header, then decodes to 8-bit RGBA.
fn decode_rgba(
    format: ImageFormat,
    decoder: impl ImageDecoder,
    limits: &Limits,
) -> Result<RgbaImage, PixelsError> {
    let (width, height) = decoder.dimensions();
    limits.check_dimensions(width as u64, height as u64)?;

    let image = DynamicImage::from_decoder(decoder)
        .map_err(|e| PixelsError::codec(format, Stage::Decode, e))?;
    Ok(image.into_rgba8())
}

fn rgba_tensor(image: RgbaImage) -> Result<Tensor<u8>, PixelsError> {
    let shape = vec![image.height() as usize, image.width() as usize, 4];
    Ok(Tensor::new(shape, image.into_raw())?)
}
