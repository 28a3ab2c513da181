//! Source image decoding (uploads and camera captures) with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{InputError, Orientation};
use crate::raster::RasterImage;

/// Decode a PNG or JPEG image from bytes, applying EXIF orientation correction.
///
/// The format is sniffed from the content, so the caller does not need to
/// know whether the upload was a PNG or a JPEG. Camera captures usually
/// carry an orientation tag; it is applied so the pipeline sees the photo
/// upright.
///
/// # Errors
///
/// Returns `InputError::InvalidFormat` if the bytes are not a recognised image.
/// Returns `InputError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, InputError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    let oriented = apply_orientation(img, orientation);

    let raster = RasterImage::from_dynamic(oriented);
    tracing::debug!(
        width = raster.width,
        height = raster.height,
        mode = ?raster.mode,
        ?orientation,
        "Decoded source image"
    );
    Ok(raster)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, InputError> {
    if bytes.is_empty() {
        return Err(InputError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| InputError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(InputError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| InputError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ColorMode;
    use image::{ImageFormat, RgbImage, RgbaImage};

    fn png_bytes(img: DynamicImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn jpeg_bytes(img: RgbImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Jpeg)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_rgba_png_keeps_alpha() {
        let src = RgbaImage::from_pixel(6, 4, image::Rgba([200, 100, 50, 64]));
        let bytes = png_bytes(DynamicImage::ImageRgba8(src));

        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.mode, ColorMode::Rgba);
        assert_eq!((img.width, img.height), (6, 4));
        assert_eq!(img.pixel(5, 3), &[200, 100, 50, 64]);
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = jpeg_bytes(RgbImage::from_pixel(16, 8, image::Rgb([120, 60, 30])));

        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.mode, ColorMode::Rgb);
        assert_eq!((img.width, img.height), (16, 8));
        assert_eq!(img.pixels.len(), 16 * 8 * 3);
    }

    /// Splice an APP1 segment carrying only an orientation tag after SOI.
    fn with_exif_orientation(jpeg: &[u8], orientation: u8) -> Vec<u8> {
        let mut app1 = vec![0xFF, 0xE1, 0x00, 0x22];
        app1.extend_from_slice(b"Exif\0\0");
        // Little-endian TIFF header, one IFD entry: 0x0112 SHORT x1
        app1.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00]);
        app1.extend_from_slice(&[0x01, 0x00]);
        app1.extend_from_slice(&[0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00]);
        app1.extend_from_slice(&[orientation, 0x00, 0x00, 0x00]);
        app1.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&app1);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_decode_applies_exif_rotation() {
        let plain = jpeg_bytes(RgbImage::from_pixel(16, 8, image::Rgb([90, 90, 90])));
        let bytes = with_exif_orientation(&plain, 6);

        assert_eq!(extract_orientation(&bytes), Orientation::Rotate90CW);
        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (8, 16));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(InputError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(InputError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(DynamicImage::ImageRgb8(RgbImage::new(32, 32)));
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(InputError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        let bytes = png_bytes(DynamicImage::ImageRgb8(RgbImage::new(2, 2)));
        assert_eq!(extract_orientation(&bytes), Orientation::Normal);
    }

    #[test]
    fn test_orientation_extraction_invalid_data() {
        assert_eq!(extract_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        let img = DynamicImage::ImageRgb8(RgbImage::from_raw(2, 1, pixels).unwrap());

        let result = apply_orientation(img, Orientation::Rotate90CW).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let pixels = vec![255, 0, 0, 0, 255, 0];
        let img = DynamicImage::ImageRgb8(RgbImage::from_raw(2, 1, pixels).unwrap());

        let result = apply_orientation(img, Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
