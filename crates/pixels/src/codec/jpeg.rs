use crate::{ImageFormat, Limits, PixelsError, Stage};
use base::Tensor;
use crates_image::codecs::jpeg::JpegDecoder;
use std::io::Cursor;

pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<Tensor<u8>, PixelsError> {
    let decoder = JpegDecoder::new(Cursor::new(data))
        .map_err(|e| PixelsError::codec(ImageFormat::Jpeg, Stage::Construct, e))?;
    let rgba = super::decode_rgba(ImageFormat::Jpeg, decoder, limits)?;

    // `JpegDecoder` errors before yielding zero-sized output, so this is a backstop
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(PixelsError::NullResult(ImageFormat::Jpeg));
    }
    super::rgba_tensor(rgba)
}
