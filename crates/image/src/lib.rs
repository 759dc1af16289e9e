//! Images for the capture pipeline.
//!
//! An [`Image`] is a pixel buffer with its format, orientation and pixel
//! density. Everything downstream of the camera works on upright `Rgb8`
//! images produced by [`Image::upright`].

mod error;
pub use error::*;

mod image;
pub use image::*;

mod orientation;
pub use orientation::*;

mod pixelformat;
pub use pixelformat::*;

mod rgb;
pub use rgb::*;

use {crates_image::ImageDecoder, std::io::Cursor};

fn decode_image_inner(data: &[u8]) -> Result<Image, ImageError> {
    let mut decoder = crates_image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::Decode(e.to_string()))?
        .into_decoder()?;
    let orientation = decoder.orientation()?;
    let decoded = crates_image::DynamicImage::from_decoder(decoder)?;
    Ok(Image::from_buffer(decoded.to_rgb8()).with_orientation(orientation.into()))
}

fn encode_jpeg_inner(image: &Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    let rgb = image.to_rgb8()?;
    let mut buffer = Vec::new();
    let encoder = crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    crates_image::ImageEncoder::write_image(
        encoder,
        &rgb.data,
        rgb.size.x as u32,
        rgb.size.y as u32,
        crates_image::ExtendedColorType::Rgb8,
    )
    .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Decode a still picture (JPEG, PNG, BMP, WebP) into an `Rgb8` image.
///
/// The EXIF orientation, when present, is carried on the image rather than
/// applied; call [`Image::upright`] to materialize it. Decoding runs on
/// tokio's blocking thread pool.
pub async fn decode_image(data: &[u8]) -> Result<Image, ImageError> {
    let owned = data.to_vec();
    tokio::task::spawn_blocking(move || decode_image_inner(&owned))
        .await
        .map_err(|e| ImageError::Decode(e.to_string()))?
}

/// Encode an image as JPEG bytes. `quality` is 1-100.
pub async fn encode_jpeg(image: Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    tokio::task::spawn_blocking(move || encode_jpeg_inner(&image, quality))
        .await
        .map_err(|e| ImageError::Encode(e.to_string()))?
}
