use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use crate::types::Rotation;

/// Rotate a JPEG by the given quarter turn and re-encode it. The identity
/// rotation is a cheap copy; the bytes are not decoded.
pub fn rotate_jpeg(bytes: &[u8], rotation: Rotation) -> Result<Vec<u8>, image::ImageError> {
    if rotation == Rotation::Deg0 {
        return Ok(bytes.to_vec());
    }
    let img = image::load_from_memory(bytes)?;
    let rotated = match rotation {
        Rotation::Deg0 => img,
        Rotation::Deg90 => img.rotate90(),
        Rotation::Deg180 => img.rotate180(),
        Rotation::Deg270 => img.rotate270(),
    };
    encode_jpeg(&rotated)
}

/// Get image dimensions from encoded bytes
pub fn dimensions(bytes: &[u8]) -> Result<(u32, u32), image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    Ok((img.width(), img.height()))
}

fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Jpeg)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([180, 40, 90])));
        encode_jpeg(&img).unwrap()
    }

    #[test]
    fn quarter_turn_swaps_dimensions() {
        let original = jpeg(20, 10);
        let rotated = rotate_jpeg(&original, Rotation::Deg90).unwrap();
        assert_eq!(dimensions(&rotated).unwrap(), (10, 20));

        let rotated = rotate_jpeg(&original, Rotation::Deg270).unwrap();
        assert_eq!(dimensions(&rotated).unwrap(), (10, 20));
    }

    #[test]
    fn half_turn_keeps_dimensions() {
        let original = jpeg(20, 10);
        let rotated = rotate_jpeg(&original, Rotation::Deg180).unwrap();
        assert_eq!(dimensions(&rotated).unwrap(), (20, 10));
    }

    #[test]
    fn identity_rotation_copies_bytes() {
        let original = jpeg(8, 8);
        let out = rotate_jpeg(&original, Rotation::Deg0).unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(rotate_jpeg(b"not a jpeg", Rotation::Deg90).is_err());
        assert!(dimensions(b"not a jpeg").is_err());
    }
}
