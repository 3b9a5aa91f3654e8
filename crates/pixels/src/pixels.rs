use base::Tensor;

/// RGBA samples in width-major layout.
///
/// `Still` is shaped `[width, height, 4]`, `Animated` is shaped
/// `[frames, width, height, 4]`. Both are usually strided views, index them
/// through [`Tensor::get`] or copy with [`Tensor::to_contiguous`].
#[derive(Debug, Clone, PartialEq)]
pub enum Pixels {
    Still(Tensor<u8>),
    Animated(Tensor<u8>),
}

impl Pixels {
    pub fn tensor(&self) -> &Tensor<u8> {
        match self {
            Pixels::Still(t) | Pixels::Animated(t) => t,
        }
    }

    pub fn into_tensor(self) -> Tensor<u8> {
        match self {
            Pixels::Still(t) | Pixels::Animated(t) => t,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.tensor().shape
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, Pixels::Animated(_))
    }

    pub fn frame_count(&self) -> usize {
        match self {
            Pixels::Still(_) => 1,
            Pixels::Animated(t) => t.shape.first().copied().unwrap_or(0),
        }
    }

    /// Trailing `[width, height, channels]`, all zero below rank 3.
    fn spatial(&self) -> [usize; 3] {
        match self.shape() {
            [.., width, height, channels] => [*width, *height, *channels],
            _ => [0; 3],
        }
    }

    pub fn width(&self) -> usize {
        self.spatial()[0]
    }

    pub fn height(&self) -> usize {
        self.spatial()[1]
    }

    pub fn channels(&self) -> usize {
        self.spatial()[2]
    }

    /// RGBA at `(x, y)` of a still image, or of the first frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        self.frame_pixel(0, x, y)
    }

    pub fn frame_pixel(&self, frame: usize, x: usize, y: usize) -> Option<[u8; 4]> {
        let tensor = self.tensor();
        let mut rgba = [0u8; 4];
        for (channel, sample) in rgba.iter_mut().enumerate() {
            *sample = *match self {
                Pixels::Still(_) if frame == 0 => tensor.get(&[x, y, channel])?,
                Pixels::Still(_) => return None,
                Pixels::Animated(_) => tensor.get(&[frame, x, y, channel])?,
            };
        }
        Some(rgba)
    }
}
