//! Decode options and resource limits.

use crate::PixelsError;

/// Resource limits applied before pixel buffers are allocated. All optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum width × height of one frame.
    pub max_pixels: Option<u64>,
    /// Maximum number of GIF frames.
    pub max_frames: Option<u64>,
}

impl Limits {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn check_dimensions(&self, width: u64, height: u64) -> Result<(), PixelsError> {
        if let Some(max_width) = self.max_width {
            if width > max_width {
                return Err(PixelsError::LimitExceeded(format!(
                    "width {width} exceeds {max_width}"
                )));
            }
        }

        if let Some(max_height) = self.max_height {
            if height > max_height {
                return Err(PixelsError::LimitExceeded(format!(
                    "height {height} exceeds {max_height}"
                )));
            }
        }

        if let Some(max_pixels) = self.max_pixels {
            let pixels = width.saturating_mul(height);
            if pixels > max_pixels {
                return Err(PixelsError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds {max_pixels}"
                )));
            }
        }

        Ok(())
    }

    pub fn check_frames(&self, frames: u64) -> Result<(), PixelsError> {
        match self.max_frames {
            Some(max_frames) if frames > max_frames => Err(PixelsError::LimitExceeded(format!(
                "frame count {frames} exceeds {max_frames}"
            ))),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub limits: Limits,
}

impl DecodeOptions {
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_limits_accepts_anything() {
        let limits = Limits::none();
        assert!(limits.check_dimensions(u64::MAX, u64::MAX).is_ok());
        assert!(limits.check_frames(u64::MAX).is_ok());
    }

    #[test]
    fn test_pixel_limit() {
        let limits = Limits {
            max_pixels: Some(100),
            ..Limits::none()
        };
        assert!(limits.check_dimensions(10, 10).is_ok());
        assert!(matches!(
            limits.check_dimensions(11, 10),
            Err(PixelsError::LimitExceeded(_))
        ));
    }

    #[test]
    fn test_frame_limit() {
        let limits = Limits {
            max_frames: Some(2),
            ..Limits::none()
        };
        assert!(limits.check_frames(2).is_ok());
        assert!(limits.check_frames(3).is_err());
    }
}
