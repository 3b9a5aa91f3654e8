//! Format → (codec, layout) table and the blocking decode pipeline.

use crate::{DecodeOptions, ImageFormat, Pixels, PixelsError, codec, codec::DecodeFn, sniff};
use base::{
    Tensor, TensorError,
    log::{debug, warn},
};

/// How a codec's native `[.., height, width, 4]` output becomes width-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Wrap the untouched row-major bytes as `[width, height, 4]` with
    /// strides `[4, 4 * width, 1]`.
    WidthMajorStrides,
    /// Transpose the height and width axes: `(0, 1)` for a still image,
    /// `(1, 2)` for a frame stack.
    SwapSpatialAxes,
}

impl Layout {
    pub fn apply(self, native: Tensor<u8>) -> Result<Tensor<u8>, TensorError> {
        match self {
            Layout::WidthMajorStrides => {
                let [height, width, channels] = native.shape[..] else {
                    return Err(TensorError::RankMismatch {
                        expected: 3,
                        got: native.ndim(),
                    });
                };
                let native = if native.is_contiguous() {
                    native
                } else {
                    native.to_contiguous()
                };
                Tensor::from_strided(
                    vec![width, height, channels],
                    vec![channels, channels * width, 1],
                    native.data,
                )
            }
            Layout::SwapSpatialAxes => {
                let ndim = native.ndim();
                if ndim < 3 {
                    return Err(TensorError::RankMismatch {
                        expected: 3,
                        got: ndim,
                    });
                }
                native.transpose(ndim - 3, ndim - 2)
            }
        }
    }
}

struct Route {
    format: ImageFormat,
    decode: DecodeFn,
    layout: Layout,
}

static ROUTES: [Route; 4] = [
    Route {
        format: ImageFormat::Png,
        decode: codec::png::decode,
        layout: Layout::WidthMajorStrides,
    },
    Route {
        format: ImageFormat::Jpeg,
        decode: codec::jpeg::decode,
        layout: Layout::SwapSpatialAxes,
    },
    Route {
        format: ImageFormat::Gif,
        decode: codec::gif::decode,
        layout: Layout::SwapSpatialAxes,
    },
    Route {
        format: ImageFormat::Bmp,
        decode: codec::bmp::decode,
        layout: Layout::SwapSpatialAxes,
    },
];

fn route(format: ImageFormat) -> Result<&'static Route, PixelsError> {
    ROUTES
        .iter()
        .find(|route| route.format == format)
        .ok_or_else(|| PixelsError::UnsupportedFormat(format.to_string()))
}

/// The layout rule applied to a format's codec output.
pub fn layout_of(format: ImageFormat) -> Result<Layout, PixelsError> {
    Ok(route(format)?.layout)
}

/// Decodes `data` as `format`, skipping detection.
pub fn decode_format(format: ImageFormat, data: &[u8]) -> Result<Pixels, PixelsError> {
    decode_format_with(format, data, &DecodeOptions::default())
}

pub fn decode_format_with(
    format: ImageFormat,
    data: &[u8],
    options: &DecodeOptions,
) -> Result<Pixels, PixelsError> {
    let route = route(format)?;
    let native = (route.decode)(data, &options.limits)
        .inspect_err(|err| warn!("{format} decode failed: {err}"))?;
    let tensor = route.layout.apply(native)?;
    debug!("decoded {format} into shape {:?}", tensor.shape);

    Ok(if tensor.ndim() == 4 {
        Pixels::Animated(tensor)
    } else {
        Pixels::Still(tensor)
    })
}

/// Decodes `data` as the format called `name` (`png`, `jpg`, `jpeg`, `gif`, `bmp`).
pub fn decode_named(name: &str, data: &[u8]) -> Result<Pixels, PixelsError> {
    decode_format(name.parse()?, data)
}

pub(crate) fn detect(data: &[u8]) -> Result<ImageFormat, PixelsError> {
    let format = sniff(data).ok_or(PixelsError::UnknownFormat)?;
    debug!("sniffed {format} from {} byte buffer", data.len());
    Ok(format)
}

/// Sniffs the format and decodes on the calling thread.
pub fn get_pixels_blocking(data: &[u8]) -> Result<Pixels, PixelsError> {
    get_pixels_blocking_with(data, &DecodeOptions::default())
}

pub fn get_pixels_blocking_with(
    data: &[u8],
    options: &DecodeOptions,
) -> Result<Pixels, PixelsError> {
    decode_format_with(detect(data)?, data, options)
}
