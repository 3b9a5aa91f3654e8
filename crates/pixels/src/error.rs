use crate::ImageFormat;
use std::fmt;

/// Where inside a codec adapter a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Building the reader from the buffer (headers, frame table).
    Construct,
    /// Reader initialization after construction (BMP headers).
    Init,
    /// Pixel decoding.
    Decode,
    /// Copying one GIF frame into the output tensor.
    Blit { frame: usize },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Construct => write!(f, "construction"),
            Stage::Init => write!(f, "initialization"),
            Stage::Decode => write!(f, "decoding"),
            Stage::Blit { frame } => write!(f, "blit of frame {frame}"),
        }
    }
}

#[derive(Debug)]
pub enum PixelsError {
    UnknownFormat,
    UnsupportedFormat(String),
    Codec {
        format: ImageFormat,
        stage: Stage,
        message: String,
    },
    NullResult(ImageFormat),
    LimitExceeded(String),
    Tensor(base::TensorError),
    Task(String),
}

impl PixelsError {
    pub(crate) fn codec(format: ImageFormat, stage: Stage, err: impl fmt::Display) -> Self {
        PixelsError::Codec {
            format,
            stage,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for PixelsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelsError::UnknownFormat => write!(f, "Unknown file type"),
            PixelsError::UnsupportedFormat(name) => write!(f, "Unsupported file type: {name}"),
            PixelsError::Codec {
                format,
                stage,
                message,
            } => write!(f, "{format} {stage} failed: {message}"),
            PixelsError::NullResult(format) => {
                write!(f, "Error decoding {}", format.mime_type().trim_start_matches("image/"))
            }
            PixelsError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            PixelsError::Tensor(err) => write!(f, "tensor error: {err}"),
            PixelsError::Task(msg) => write!(f, "decode task failed: {msg}"),
        }
    }
}

impl std::error::Error for PixelsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PixelsError::Tensor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<base::TensorError> for PixelsError {
    fn from(err: base::TensorError) -> Self {
        PixelsError::Tensor(err)
    }
}

impl From<tokio::task::JoinError> for PixelsError {
    fn from(err: tokio::task::JoinError) -> Self {
        PixelsError::Task(err.to_string())
    }
}
