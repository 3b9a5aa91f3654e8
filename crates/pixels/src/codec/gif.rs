use crate::{ImageFormat, Limits, PixelsError, Stage};
use base::Tensor;

struct RawFrame {
    left: usize,
    top: usize,
    width: usize,
    height: usize,
    rgba: Vec<u8>,
}

/// GIF reader with per-frame access.
///
/// Frames are kept as the file stores them (sub-rectangles, no disposal or
/// compositing), so each blitted frame is independent of the others.
pub(crate) struct GifReader {
    width: usize,
    height: usize,
    frames: Vec<RawFrame>,
}

fn construct_error(err: impl std::fmt::Display) -> PixelsError {
    PixelsError::codec(ImageFormat::Gif, Stage::Construct, err)
}

fn blit_error(frame: usize, message: &str) -> PixelsError {
    PixelsError::codec(ImageFormat::Gif, Stage::Blit { frame }, message)
}

impl GifReader {
    pub(crate) fn new(data: &[u8], limits: &Limits) -> Result<Self, PixelsError> {
        let mut options = ::gif::DecodeOptions::new();
        options.set_color_output(::gif::ColorOutput::RGBA);
        let mut decoder = options.read_info(data).map_err(construct_error)?;

        let width = decoder.width() as usize;
        let height = decoder.height() as usize;
        limits.check_dimensions(width as u64, height as u64)?;

        let mut frames = Vec::new();
        while let Some(frame) = decoder.read_next_frame().map_err(construct_error)? {
            limits.check_frames(frames.len() as u64 + 1)?;
            frames.push(RawFrame {
                left: frame.left as usize,
                top: frame.top as usize,
                width: frame.width as usize,
                height: frame.height as usize,
                rgba: frame.buffer.to_vec(),
            });
        }

        Ok(Self {
            width,
            height,
            frames,
        })
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Writes frame `index` into a zeroed, canvas-sized RGBA slice.
    ///
    /// Fully transparent pixels leave `dest` untouched.
    pub(crate) fn blit_frame_rgba(&self, index: usize, dest: &mut [u8]) -> Result<(), PixelsError> {
        let frame = self
            .frames
            .get(index)
            .ok_or_else(|| blit_error(index, "frame index out of range"))?;
        if dest.len() != self.width * self.height * 4 {
            return Err(blit_error(index, "destination does not match canvas size"));
        }
        if frame.left + frame.width > self.width || frame.top + frame.height > self.height {
            return Err(blit_error(index, "frame rectangle exceeds canvas"));
        }
        if frame.rgba.len() != frame.width * frame.height * 4 {
            return Err(blit_error(index, "frame data is truncated"));
        }
        if frame.width == 0 {
            return Ok(());
        }

        for (row, src) in frame.rgba.chunks_exact(frame.width * 4).enumerate() {
            let start = ((frame.top + row) * self.width + frame.left) * 4;
            let dst = &mut dest[start..start + frame.width * 4];
            for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                if px[3] != 0 {
                    out.copy_from_slice(px);
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<Tensor<u8>, PixelsError> {
    let reader = GifReader::new(data, limits)?;
    let (width, height) = (reader.width(), reader.height());
    let frames = reader.frame_count();

    if frames > 0 {
        let mut tensor = Tensor::zeros(vec![frames, height, width, 4])?;
        for i in 0..frames {
            let range = tensor.index(&[i, 0, 0, 0])..tensor.index(&[i + 1, 0, 0, 0]);
            reader.blit_frame_rgba(i, &mut tensor.data[range])?;
        }
        Ok(tensor)
    } else {
        let mut tensor = Tensor::zeros(vec![height, width, 4])?;
        reader.blit_frame_rgba(0, &mut tensor.data)?;
        Ok(tensor)
    }
}
