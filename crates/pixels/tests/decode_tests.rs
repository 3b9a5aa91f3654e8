use crates_image::ImageEncoder;
use pixels::{
    DecodeOptions, ImageFormat, Limits, Pixels, PixelsError, Stage, decode, decode_format,
    decode_named, get_pixels, get_pixels_blocking, get_pixels_with,
};

fn png_bytes(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::new();
    crates_image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(rgba, width, height, crates_image::ExtendedColorType::Rgba8)
        .unwrap();
    buffer
}

fn bmp_bytes(width: u32, height: u32, rgb: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::new();
    crates_image::codecs::bmp::BmpEncoder::new(&mut buffer)
        .write_image(rgb, width, height, crates_image::ExtendedColorType::Rgb8)
        .unwrap();
    buffer
}

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    let img = crates_image::RgbImage::from_fn(width, height, |x, y| {
        let val = (x + y) as u8 * 32;
        crates_image::Rgb([val, val + 16, val + 32])
    });
    crates_image::codecs::jpeg::JpegEncoder::new(&mut buffer)
        .encode_image(&img)
        .unwrap();
    buffer
}

/// 3 wide, 2 high, every pixel distinct.
fn gradient_rgba() -> Vec<u8> {
    (0..6u8)
        .flat_map(|i| [i * 40, 255 - i * 40, i, 255])
        .collect()
}

#[tokio::test]
async fn test_decode_red_pixel_png() {
    let png = png_bytes(1, 1, &[255, 0, 0, 255]);

    let decoded = get_pixels(&png).await.unwrap();

    assert!(!decoded.is_animated());
    assert_eq!(decoded.shape(), &[1, 1, 4]);
    assert_eq!(
        decoded.tensor().iter().copied().collect::<Vec<_>>(),
        vec![255, 0, 0, 255]
    );
}

#[tokio::test]
async fn test_png_is_width_major() {
    let rgba = gradient_rgba();
    let png = png_bytes(3, 2, &rgba);

    let decoded = get_pixels(&png).await.unwrap();

    assert_eq!(decoded.shape(), &[3, 2, 4]);
    assert_eq!(decoded.width(), 3);
    assert_eq!(decoded.height(), 2);
    assert_eq!(decoded.channels(), 4);
    for y in 0..2 {
        for x in 0..3 {
            let i = (y * 3 + x) * 4;
            assert_eq!(
                decoded.pixel(x, y).unwrap(),
                [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]],
                "pixel mismatch at ({x}, {y})"
            );
        }
    }
}

#[tokio::test]
async fn test_png_keeps_codec_bytes_in_place() {
    let rgba = gradient_rgba();
    let png = png_bytes(3, 2, &rgba);

    let tensor = get_pixels(&png).await.unwrap().into_tensor();

    assert_eq!(tensor.data, rgba);
    assert_eq!(tensor.strides, vec![4, 12, 1]);
}

#[tokio::test]
async fn test_bmp_is_width_major_and_opaque() {
    let rgb: Vec<u8> = (0..6u8).flat_map(|i| [i * 40, 10, 255 - i * 40]).collect();
    let bmp = bmp_bytes(3, 2, &rgb);

    let decoded = get_pixels(&bmp).await.unwrap();

    assert_eq!(decoded.shape(), &[3, 2, 4]);
    for y in 0..2 {
        for x in 0..3 {
            let i = (y * 3 + x) * 3;
            assert_eq!(
                decoded.pixel(x, y).unwrap(),
                [rgb[i], rgb[i + 1], rgb[i + 2], 255]
            );
        }
    }
}

#[tokio::test]
async fn test_jpeg_shape_and_alpha() {
    let jpeg = jpeg_bytes(4, 2);

    let decoded = decode(ImageFormat::Jpeg, &jpeg).await.unwrap();

    assert_eq!(decoded.shape(), &[4, 2, 4]);
    assert!(decoded.tensor().iter().skip(3).step_by(4).all(|&a| a == 255));
}

#[tokio::test]
async fn test_jpeg_with_soi_marker_is_not_sniffed() {
    let jpeg = jpeg_bytes(2, 2);

    let result = get_pixels(&jpeg).await;

    assert!(matches!(result, Err(PixelsError::UnknownFormat)));
}

#[test]
fn test_decode_named_aliases() {
    let jpeg = jpeg_bytes(2, 3);
    for name in ["jpg", "jpeg"] {
        let decoded = decode_named(name, &jpeg).unwrap();
        assert_eq!(decoded.shape(), &[2, 3, 4]);
    }
}

#[test]
fn test_decode_named_unsupported() {
    let err = decode_named("webp", &[]).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported file type: webp");
}

#[tokio::test]
async fn test_truncated_png_is_codec_error() {
    let png = png_bytes(3, 2, &gradient_rgba());
    let truncated = &png[..png.len() / 2];

    let result = get_pixels(truncated).await;

    assert!(matches!(
        result,
        Err(PixelsError::Codec {
            format: ImageFormat::Png,
            ..
        })
    ));
}

#[tokio::test]
async fn test_corrupt_bmp_header() {
    let result = get_pixels(b"BM\x00\x00").await;

    assert!(matches!(
        result,
        Err(PixelsError::Codec {
            format: ImageFormat::Bmp,
            ..
        })
    ));
}

#[tokio::test]
async fn test_corrupt_jpeg() {
    let result = decode(ImageFormat::Jpeg, &[0xFF, 0xD8, 0x00, 0x01]).await;

    assert!(matches!(
        result,
        Err(PixelsError::Codec {
            format: ImageFormat::Jpeg,
            ..
        })
    ));
}

#[tokio::test]
async fn test_sniffed_jfif_without_soi_is_jpeg_error() {
    // sniffs as JPEG, but the decoder wants FF D8 first
    let data = [
        0xFF, 0xE0, 0x00, 0x10, 0x00, 0x00, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x02,
    ];

    let result = get_pixels(&data).await;

    assert!(matches!(
        result,
        Err(PixelsError::Codec {
            format: ImageFormat::Jpeg,
            stage: Stage::Construct,
            ..
        })
    ));
}

#[tokio::test]
async fn test_unknown_prefix() {
    let result = get_pixels(&[0x00, 0x01, 0x02, 0x03]).await;
    assert!(matches!(result, Err(PixelsError::UnknownFormat)));
}

#[tokio::test]
async fn test_empty_buffer() {
    let err = get_pixels(&[]).await.unwrap_err();
    assert!(matches!(err, PixelsError::UnknownFormat));
    assert_eq!(err.to_string(), "Unknown file type");
}

#[tokio::test]
async fn test_limits_reject_large_image() {
    let png = png_bytes(3, 2, &gradient_rgba());
    let options = DecodeOptions::with_limits(Limits {
        max_pixels: Some(4),
        ..Limits::none()
    });

    let result = get_pixels_with(&png, options).await;

    assert!(matches!(result, Err(PixelsError::LimitExceeded(_))));
}

#[test]
fn test_blocking_matches_async_shape() {
    let png = png_bytes(3, 2, &gradient_rgba());
    let decoded = get_pixels_blocking(&png).unwrap();
    assert_eq!(decoded.shape(), &[3, 2, 4]);
    assert_eq!(decoded, decode_format(ImageFormat::Png, &png).unwrap());
}

#[tokio::test]
async fn test_concurrent_decodes_are_independent() {
    let red = png_bytes(1, 1, &[255, 0, 0, 255]);
    let blue = png_bytes(1, 1, &[0, 0, 255, 255]);

    let (a, b) = tokio::join!(get_pixels(&red), get_pixels(&blue));

    assert_eq!(a.unwrap().pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(b.unwrap().pixel(0, 0), Some([0, 0, 255, 255]));
}

#[tokio::test]
async fn test_still_image_variant() {
    let png = png_bytes(1, 1, &[1, 2, 3, 4]);
    assert!(matches!(get_pixels(&png).await.unwrap(), Pixels::Still(_)));
}
