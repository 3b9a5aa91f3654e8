use crate::{ImageFormat, Limits, PixelsError, Stage};
use base::Tensor;
use crates_image::codecs::png::PngDecoder;
use std::io::Cursor;

pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<Tensor<u8>, PixelsError> {
    let decoder = PngDecoder::new(Cursor::new(data))
        .map_err(|e| PixelsError::codec(ImageFormat::Png, Stage::Construct, e))?;
    super::rgba_tensor(super::decode_rgba(ImageFormat::Png, decoder, limits)?)
}
