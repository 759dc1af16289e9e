use base::{Rect, Vec2};
use image::{Image, ImageError, Orientation, PixelFormat, center_crop_rect, fourcc_to_string};

// Rgb8 image where each pixel encodes its own coordinates: [x, y, 0].
fn coordinate_image(width: usize, height: usize) -> Image {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[x as u8, y as u8, 0]);
        }
    }
    Image::new(Vec2::new(width, height), data, PixelFormat::Rgb8)
}

fn pixel(image: &Image, x: usize, y: usize) -> [u8; 3] {
    let i = (y * image.width() + x) * 3;
    [image.data[i], image.data[i + 1], image.data[i + 2]]
}

#[test]
fn test_image_new_defaults() {
    let image = Image::new(Vec2::new(2, 3), vec![0; 18], PixelFormat::Rgb8);
    assert_eq!(image.orientation, Orientation::Up);
    assert_eq!(image.scale, 1.0);
    assert_eq!(image.width(), 2);
    assert_eq!(image.height(), 3);
    assert!(image.validate().is_ok());
}

#[test]
fn test_validate_short_buffer() {
    let image = Image::new(Vec2::new(4, 4), vec![0; 10], PixelFormat::Rgb8);
    assert!(matches!(image.validate(), Err(ImageError::InvalidImage(_))));
}

#[test]
fn test_validate_empty_and_bad_scale() {
    let empty = Image::new(Vec2::new(0, 4), vec![], PixelFormat::Rgb8);
    assert!(empty.validate().is_err());

    let scaled = Image::new(Vec2::new(1, 1), vec![0; 3], PixelFormat::Rgb8).with_scale(0.0);
    assert!(scaled.validate().is_err());
}

#[test]
fn test_argb_to_rgb8() {
    let image = Image::new(Vec2::new(2, 1), vec![255, 10, 20, 30, 255, 40, 50, 60], PixelFormat::Argb8);
    let rgb = image.to_rgb8().unwrap();
    assert_eq!(rgb.format, PixelFormat::Rgb8);
    assert_eq!(rgb.data, vec![10, 20, 30, 40, 50, 60]);
}

#[test]
fn test_yuyv_to_rgb8_keeps_orientation() {
    let image = Image::new(Vec2::new(2, 1), vec![255, 128, 0, 128], PixelFormat::Yuyv)
        .with_orientation(Orientation::Right)
        .with_scale(3.0);
    let rgb = image.to_rgb8().unwrap();
    assert_eq!(rgb.data, vec![255, 255, 255, 0, 0, 0]);
    assert_eq!(rgb.orientation, Orientation::Right);
    assert_eq!(rgb.scale, 3.0);
}

#[test]
fn test_crop_copies_region() {
    let image = coordinate_image(4, 4);
    let cropped = image.crop(Rect::new(Vec2::new(1, 2), Vec2::new(2, 2))).unwrap();
    assert_eq!(cropped.size, Vec2::new(2, 2));
    assert_eq!(pixel(&cropped, 0, 0), [1, 2, 0]);
    assert_eq!(pixel(&cropped, 1, 1), [2, 3, 0]);
}

#[test]
fn test_crop_outside_bounds_is_error() {
    let image = coordinate_image(4, 4);
    let result = image.crop(Rect::new(Vec2::new(3, 0), Vec2::new(2, 2)));
    assert!(matches!(result, Err(ImageError::InvalidImage(_))));
}

#[test]
fn test_center_crop_300_to_250() {
    let image = coordinate_image(300, 300);
    let cropped = image.center_crop(250.0).unwrap();
    assert_eq!(cropped.size, Vec2::new(250, 250));
    assert_eq!(cropped.data.len(), 250 * 250 * 3);
    // (300 - 250) / 2 = 25
    assert_eq!(pixel(&cropped, 0, 0), [25, 25, 0]);
    assert_eq!(pixel(&cropped, 249, 249), [(25 + 249) as u8, (25 + 249) as u8, 0]);
}

#[test]
fn test_center_crop_uses_pixel_density() {
    let image = coordinate_image(200, 120).with_scale(2.0);
    let cropped = image.center_crop(50.0).unwrap();
    assert_eq!(cropped.size, Vec2::new(100, 100));
    assert_eq!(pixel(&cropped, 0, 0), [50, 10, 0]);
}

#[test]
fn test_center_crop_small_image_clamps() {
    let image = coordinate_image(120, 260);
    let cropped = image.center_crop(250.0).unwrap();
    assert_eq!(cropped.size, Vec2::new(120, 250));
    assert_eq!(pixel(&cropped, 0, 0), [0, 5, 0]);
}

#[test]
fn test_center_crop_rect() {
    let rect = center_crop_rect(Vec2::new(1920, 1080), 250.0, 3.0);
    assert_eq!(rect.size, Vec2::new(750, 750));
    assert_eq!(rect.origin, Vec2::new(585, 165));
}

#[test]
fn test_resize_uniform_image() {
    let image = Image::new(Vec2::new(40, 20), vec![200; 40 * 20 * 3], PixelFormat::Rgb8);
    let resized = image.resize(Vec2::new(10, 10)).unwrap();
    assert_eq!(resized.size, Vec2::new(10, 10));
    assert_eq!(resized.data.len(), 300);
    assert!(resized.data.iter().all(|&b| b.abs_diff(200) <= 1));
}

#[test]
fn test_resize_rejects_empty_target_and_non_rgb() {
    let image = coordinate_image(4, 4);
    assert!(image.resize(Vec2::new(0, 4)).is_err());

    let argb = Image::new(Vec2::new(1, 1), vec![255, 1, 2, 3], PixelFormat::Argb8);
    assert!(argb.resize(Vec2::new(2, 2)).is_err());
}

#[test]
fn test_image_error_display() {
    let err = ImageError::Decode("test error".to_string());
    assert_eq!(format!("{}", err), "decode error: test error");

    let err = ImageError::InvalidImage("too small".to_string());
    assert_eq!(format!("{}", err), "invalid image: too small");
}

#[test]
fn test_fourcc_mapping() {
    let mjpg = u32::from_le_bytes(*b"MJPG");
    assert_eq!(PixelFormat::from_fourcc(mjpg), Some(PixelFormat::Jpeg));
    assert_eq!(PixelFormat::Yuyv.as_fourcc(), u32::from_le_bytes(*b"YUYV"));
    assert_eq!(PixelFormat::from_fourcc(u32::from_le_bytes(*b"NV12")), None);
    assert_eq!(fourcc_to_string(u32::from_le_bytes(*b"NV12")), "NV12");
}
