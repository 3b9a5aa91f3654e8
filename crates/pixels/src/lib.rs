//! Format-sniffing pixel decoder.
//!
//! Detects PNG, JPEG, GIF or BMP from the leading bytes of a buffer and
//! decodes it into a `Tensor<u8>` from `base` with one layout for every
//! format: `[width, height, 4]` RGBA for still images and
//! `[frames, width, height, 4]` for GIF frame stacks.

mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod pixels;

pub use base::Tensor;
pub use config::{DecodeOptions, Limits};
pub use dispatch::{
    Layout, decode_format, decode_format_with, decode_named, get_pixels_blocking,
    get_pixels_blocking_with, layout_of,
};
pub use error::{PixelsError, Stage};
pub use format::{ImageFormat, sniff};
pub use pixels::Pixels;

/// Detects the format of `data` and decodes it.
///
/// Detection runs on the caller; the CPU-bound decoding work runs on tokio's
/// blocking thread pool.
///
/// # Errors
///
/// Returns `PixelsError::UnknownFormat` if no signature matches.
/// Returns `PixelsError::Codec` or `PixelsError::NullResult` if the codec rejects the data.
pub async fn get_pixels(data: &[u8]) -> Result<Pixels, PixelsError> {
    get_pixels_with(data, DecodeOptions::default()).await
}

pub async fn get_pixels_with(data: &[u8], options: DecodeOptions) -> Result<Pixels, PixelsError> {
    let format = dispatch::detect(data)?;
    decode_with(format, data, options).await
}

/// Decodes `data` as `format` on tokio's blocking thread pool, skipping detection.
pub async fn decode(format: ImageFormat, data: &[u8]) -> Result<Pixels, PixelsError> {
    decode_with(format, data, DecodeOptions::default()).await
}

pub async fn decode_with(
    format: ImageFormat,
    data: &[u8],
    options: DecodeOptions,
) -> Result<Pixels, PixelsError> {
    let owned = data.to_vec();
    tokio::task::spawn_blocking(move || decode_format_with(format, &owned, &options)).await?
}
