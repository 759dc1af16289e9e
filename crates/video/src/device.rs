use {
    crate::*,
    base::Vec2,
    image::{Image, PixelFormat},
};

/// What an opened device actually delivers.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    pub name: String,
    pub size: Vec2<usize>,
    pub format: PixelFormat,
    pub frame_rate: f32,
    pub has_torch: bool,
}

/// Platform camera surface.
///
/// All methods run on the frame worker's blocking thread, so an
/// implementation may keep thread-affine handles. `open` must fail with
/// `DeviceUnavailable` when there is no device and `DeviceBusy` when the
/// input cannot be attached.
pub trait CameraDevice: Send + 'static {
    fn open(&mut self, config: &CameraConfig) -> Result<DeviceInfo, VideoError>;

    /// Release the device. Called at most once per successful `open`.
    fn close(&mut self);

    /// Block until the next frame is available.
    fn blocking_capture(&mut self) -> Result<Image, VideoError>;

    /// Take one still picture.
    ///
    /// Devices with a separate photo path override this; the default takes
    /// the next streamed frame.
    fn capture_still(&mut self) -> Result<Image, VideoError> {
        self.blocking_capture()
    }

    fn set_torch(&mut self, on: bool) -> Result<(), VideoError> {
        let _ = on;
        Err(VideoError::TorchUnavailable)
    }
}
