use crate::{ImageFormat, Limits, PixelsError, Stage};
use base::{NdSource, Tensor, pack};
use crates_image::{RgbaImage, codecs::bmp::BmpDecoder};
use std::io::Cursor;

/// Exposes a decoded bitmap as a `[height, width, 4]` array.
struct BitmapSource<'a>(&'a RgbaImage);

impl NdSource<u8> for BitmapSource<'_> {
    fn shape(&self) -> Vec<usize> {
        vec![self.0.height() as usize, self.0.width() as usize, 4]
    }

    fn at(&self, index: &[usize]) -> u8 {
        self.0.get_pixel(index[1] as u32, index[0] as u32).0[index[2]]
    }
}

pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<Tensor<u8>, PixelsError> {
    // BmpDecoder::new parses the file and info headers
    let decoder = BmpDecoder::new(Cursor::new(data))
        .map_err(|e| PixelsError::codec(ImageFormat::Bmp, Stage::Init, e))?;
    let bitmap = super::decode_rgba(ImageFormat::Bmp, decoder, limits)?;

    let source = BitmapSource(&bitmap);
    let mut tensor = Tensor::zeros(source.shape())?;
    pack(&source, &mut tensor)?;
    Ok(tensor)
}
