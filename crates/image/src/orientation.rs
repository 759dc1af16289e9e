use {base::Vec2, crates_image::{RgbImage, imageops}};

/// How stored pixels must be transformed to appear upright.
///
/// Names follow the camera convention: `Right` means the sensor delivered the
/// picture rotated so that it must be turned 90 degrees clockwise for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
    UpMirrored,
    DownMirrored,
    LeftMirrored,
    RightMirrored,
}

impl Orientation {
    /// Map an EXIF orientation tag (1..=8).
    pub fn from_exif(tag: u16) -> Option<Self> {
        match tag {
            1 => Some(Orientation::Up),
            2 => Some(Orientation::UpMirrored),
            3 => Some(Orientation::Down),
            4 => Some(Orientation::DownMirrored),
            5 => Some(Orientation::LeftMirrored),
            6 => Some(Orientation::Right),
            7 => Some(Orientation::RightMirrored),
            8 => Some(Orientation::Left),
            _ => None,
        }
    }

    /// Orientation of a frame from a sensor rotated clockwise by `degrees`
    /// relative to the device's natural orientation. Anything that is not a
    /// multiple of 90 snaps down to the previous quarter turn.
    pub fn from_rotation(degrees: u32) -> Self {
        match (degrees % 360) / 90 {
            0 => Orientation::Up,
            1 => Orientation::Right,
            2 => Orientation::Down,
            _ => Orientation::Left,
        }
    }

    pub fn swaps_axes(&self) -> bool {
        matches!(
            self,
            Orientation::Left
                | Orientation::Right
                | Orientation::LeftMirrored
                | Orientation::RightMirrored
        )
    }

    /// Size of the upright picture for stored pixels of `size`.
    pub fn upright_size(&self, size: Vec2<usize>) -> Vec2<usize> {
        if self.swaps_axes() { size.transposed() } else { size }
    }
}

impl From<crates_image::metadata::Orientation> for Orientation {
    fn from(value: crates_image::metadata::Orientation) -> Self {
        use crates_image::metadata::Orientation as Exif;
        match value {
            Exif::NoTransforms => Orientation::Up,
            Exif::Rotate90 => Orientation::Right,
            Exif::Rotate180 => Orientation::Down,
            Exif::Rotate270 => Orientation::Left,
            Exif::FlipHorizontal => Orientation::UpMirrored,
            Exif::FlipVertical => Orientation::DownMirrored,
            Exif::Rotate90FlipH => Orientation::LeftMirrored,
            Exif::Rotate270FlipH => Orientation::RightMirrored,
        }
    }
}

/// Apply `orientation` to an RGB buffer, returning the upright buffer.
pub(crate) fn orient_rgb(buffer: RgbImage, orientation: Orientation) -> RgbImage {
    match orientation {
        Orientation::Up => buffer,
        Orientation::Down => imageops::rotate180(&buffer),
        Orientation::Left => imageops::rotate270(&buffer),
        Orientation::Right => imageops::rotate90(&buffer),
        Orientation::UpMirrored => imageops::flip_horizontal(&buffer),
        Orientation::DownMirrored => imageops::flip_vertical(&buffer),
        // transpose
        Orientation::LeftMirrored => imageops::flip_horizontal(&imageops::rotate90(&buffer)),
        // transverse
        Orientation::RightMirrored => imageops::flip_horizontal(&imageops::rotate270(&buffer)),
    }
}
