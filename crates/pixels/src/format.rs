//! Container format tags and magic-byte sniffing.

use crate::PixelsError;
use std::{fmt, str::FromStr};

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_APP0: &[u8] = &[0xFF, 0xE0];
const JFIF_OFFSET: usize = 6;
const JFIF_IDENTIFIER: &[u8] = b"JFIF\0";
const GIF_SIGNATURE: &[u8] = b"GIF8";
const BMP_SIGNATURE: &[u8] = b"BM";

/// Formats the decoder can dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 4] = [
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Gif,
        ImageFormat::Bmp,
    ];

    /// Detect format from magic bytes. Returns None if unrecognized.
    pub fn detect(data: &[u8]) -> Option<Self> {
        sniff(data)
    }

    /// Short name, also accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Png => &["png"],
            ImageFormat::Jpeg => &["jpg", "jpeg"],
            ImageFormat::Gif => &["gif"],
            ImageFormat::Bmp => &["bmp"],
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ImageFormat {
    type Err = PixelsError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "gif" => Ok(ImageFormat::Gif),
            "bmp" => Ok(ImageFormat::Bmp),
            _ => Err(PixelsError::UnsupportedFormat(name.to_string())),
        }
    }
}

/// True when `data[offset..]` starts with `signature`. Short buffers never match.
fn matches_at(data: &[u8], offset: usize, signature: &[u8]) -> bool {
    data.get(offset..)
        .is_some_and(|tail| tail.starts_with(signature))
}

/// Identifies the container format from the leading bytes of `data`.
///
/// Checks run in fixed order (PNG, JPEG, GIF, BMP) and the first match wins.
/// The JPEG check requires an `FF E0` lead followed by `JFIF\0` at offset 6,
/// so streams starting with the `FF D8` SOI marker are not recognized.
pub fn sniff(data: &[u8]) -> Option<ImageFormat> {
    if matches_at(data, 0, PNG_SIGNATURE) {
        Some(ImageFormat::Png)
    } else if matches_at(data, 0, JPEG_APP0) && matches_at(data, JFIF_OFFSET, JFIF_IDENTIFIER) {
        Some(ImageFormat::Jpeg)
    } else if matches_at(data, 0, GIF_SIGNATURE) {
        Some(ImageFormat::Gif)
    } else if matches_at(data, 0, BMP_SIGNATURE) {
        Some(ImageFormat::Bmp)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_at_past_end() {
        assert!(!matches_at(&[0xFF], 6, JFIF_IDENTIFIER));
        assert!(!matches_at(&[0x42], 0, BMP_SIGNATURE));
        assert!(matches_at(b"BM", 0, BMP_SIGNATURE));
    }

    #[test]
    fn test_name_roundtrips_through_from_str() {
        for format in ImageFormat::ALL {
            assert_eq!(format.name().parse::<ImageFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_extensions_parse() {
        for format in ImageFormat::ALL {
            for ext in format.extensions() {
                assert_eq!(ext.parse::<ImageFormat>().unwrap(), format);
            }
        }
    }
}
