use {
    base::Vec2,
    image::Orientation,
    std::{path::PathBuf, time::Duration},
};

/// Configuration for a camera session.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    device: Option<PathBuf>,
    size: Option<Vec2<usize>>,
    frame_rate: Option<f32>,
    orientation: Option<Orientation>,
    reconnect_delay: Duration,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: None,
            size: None,
            frame_rate: None,
            orientation: None,
            reconnect_delay: Duration::from_millis(100),
        }
    }
}

impl CameraConfig {
    /// Open this device instead of the platform default.
    pub fn with_device(mut self, device: impl Into<PathBuf>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Request a capture size in pixels. The device may pick another.
    pub fn with_size(mut self, size: Vec2<usize>) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: f32) -> Self {
        self.frame_rate = Some(frame_rate);
        self
    }

    /// Stamp every frame with this orientation, overriding what the device reports.
    ///
    /// Use it for sensors mounted rotated relative to the device body.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Wait this long between reopen attempts after a capture failure.
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn device(&self) -> Option<&PathBuf> {
        self.device.as_ref()
    }

    pub fn size(&self) -> Option<Vec2<usize>> {
        self.size
    }

    pub fn frame_rate(&self) -> Option<f32> {
        self.frame_rate
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn reconnect_delay(&self) -> Duration {
        self.reconnect_delay
    }
}
