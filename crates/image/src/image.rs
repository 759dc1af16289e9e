use {
    crate::*,
    base::{Rect, Vec2},
    crates_image::{RgbImage, imageops},
};

/// A picture in memory: pixel bytes plus what is needed to interpret them.
///
/// `size` is in pixels as stored. `orientation` says how to turn the stored
/// pixels upright. `scale` is the pixel density (pixels per point), used when
/// a region is given in display points.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
    pub format: PixelFormat,
    pub orientation: Orientation,
    pub scale: f32,
}

impl Image {
    pub fn new(size: Vec2<usize>, data: Vec<u8>, format: PixelFormat) -> Self {
        Self {
            size,
            data,
            format,
            orientation: Orientation::Up,
            scale: 1.0,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    /// Check that the byte length matches the size for packed formats.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.size.x == 0 || self.size.y == 0 {
            return Err(ImageError::InvalidImage(format!(
                "empty image {}x{}",
                self.size.x, self.size.y
            )));
        }
        if let Some(bpp) = self.format.bytes_per_pixel() {
            let expected = self.size.area() * bpp;
            if self.data.len() < expected {
                return Err(ImageError::InvalidImage(format!(
                    "{:?} {}x{} needs {} bytes, got {}",
                    self.format,
                    self.size.x,
                    self.size.y,
                    expected,
                    self.data.len()
                )));
            }
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ImageError::InvalidImage(format!("bad scale {}", self.scale)));
        }
        Ok(())
    }

    /// Convert to packed RGB, keeping orientation and scale.
    pub fn to_rgb8(&self) -> Result<Image, ImageError> {
        self.validate()?;
        let converted = match self.format {
            PixelFormat::Rgb8 => {
                let mut image = self.clone();
                image.data.truncate(self.size.area() * 3);
                image
            }
            PixelFormat::Argb8 => Image::new(self.size, argb_to_rgb(&self.data), PixelFormat::Rgb8),
            PixelFormat::Yuyv => Image::new(self.size, yuyv_to_rgb(self.size, &self.data), PixelFormat::Rgb8),
            PixelFormat::Jpeg => jpeg_to_rgb(self)?,
        };
        Ok(converted
            .with_orientation(self.orientation)
            .with_scale(self.scale))
    }

    /// Materialize an upright RGB picture, applying the orientation.
    pub fn upright(&self) -> Result<Image, ImageError> {
        let rgb = self.to_rgb8()?;
        if rgb.orientation == Orientation::Up {
            return Ok(rgb);
        }
        let buffer = rgb.into_buffer()?;
        let oriented = orient_rgb(buffer, self.orientation);
        Ok(Image::from_buffer(oriented).with_scale(self.scale))
    }

    /// Copy out `rect` (in pixels) of an RGB image.
    pub fn crop(&self, rect: Rect<usize>) -> Result<Image, ImageError> {
        if self.format != PixelFormat::Rgb8 {
            return Err(ImageError::InvalidImage(format!(
                "crop needs Rgb8, got {:?}",
                self.format
            )));
        }
        if !rect.fits_in(self.size) {
            return Err(ImageError::InvalidImage(format!(
                "crop {:?}+{:?} outside {:?}",
                rect.origin, rect.size, self.size
            )));
        }
        let row_bytes = self.size.x * 3;
        let mut data = Vec::with_capacity(rect.size.area() * 3);
        for y in rect.origin.y..rect.max().y {
            let start = y * row_bytes + rect.origin.x * 3;
            data.extend_from_slice(&self.data[start..start + rect.size.x * 3]);
        }
        Ok(Image::new(rect.size, data, PixelFormat::Rgb8)
            .with_orientation(self.orientation)
            .with_scale(self.scale))
    }

    /// Crop a centered square of `side` points from the upright picture.
    ///
    /// The side is scaled by the pixel density and the origin on each axis is
    /// `(size - crop) / 2` in whole pixels. Pictures smaller than the square are
    /// clamped: the crop shrinks to the available extent on that axis.
    pub fn center_crop(&self, side: f32) -> Result<Image, ImageError> {
        let upright = self.upright()?;
        let rect = center_crop_rect(upright.size, side, upright.scale);
        upright.crop(rect)
    }

    /// Scale an RGB image to exactly `size` pixels with a triangle filter.
    pub fn resize(&self, size: Vec2<usize>) -> Result<Image, ImageError> {
        if size.x == 0 || size.y == 0 {
            return Err(ImageError::InvalidImage(format!(
                "cannot resize to {}x{}",
                size.x, size.y
            )));
        }
        if self.format != PixelFormat::Rgb8 {
            return Err(ImageError::InvalidImage(format!(
                "resize needs Rgb8, got {:?}",
                self.format
            )));
        }
        if size == self.size {
            return Ok(self.clone());
        }
        let buffer = self.clone().into_buffer()?;
        let resized = imageops::resize(
            &buffer,
            size.x as u32,
            size.y as u32,
            imageops::FilterType::Triangle,
        );
        Ok(Image::from_buffer(resized)
            .with_orientation(self.orientation)
            .with_scale(self.scale))
    }

    pub(crate) fn into_buffer(self) -> Result<RgbImage, ImageError> {
        let (w, h) = (self.size.x as u32, self.size.y as u32);
        RgbImage::from_raw(w, h, self.data)
            .ok_or_else(|| ImageError::InvalidImage(format!("buffer too small for {}x{}", w, h)))
    }

    pub(crate) fn from_buffer(buffer: RgbImage) -> Image {
        let (w, h) = buffer.dimensions();
        Image::new(Vec2::new(w as usize, h as usize), buffer.into_raw(), PixelFormat::Rgb8)
    }
}

/// Pixel rectangle of a centered `side`-point square in a picture of `size` pixels.
pub fn center_crop_rect(size: Vec2<usize>, side: f32, scale: f32) -> Rect<usize> {
    let pixels = (side * scale).max(0.0).round() as usize;
    Rect::centered(size, Vec2::new(pixels, pixels))
}
