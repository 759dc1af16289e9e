use {
    crate::*,
    image::Image,
    std::time::Duration,
};

/// A camera that replays still images at a fixed rate.
///
/// Stands in for a physical device on machines without one.
pub struct ReplayDevice {
    frames: Vec<Image>,
    next: usize,
    interval: Duration,
    has_torch: bool,
    torch: bool,
    open: bool,
}

impl ReplayDevice {
    pub fn new(image: Image) -> Self {
        Self::from_frames(vec![image])
    }

    /// Cycle through `frames` in order.
    pub fn from_frames(frames: Vec<Image>) -> Self {
        Self {
            frames,
            next: 0,
            interval: Duration::from_millis(33),
            has_torch: false,
            torch: false,
            open: false,
        }
    }

    pub fn with_frame_rate(mut self, frame_rate: f32) -> Self {
        self.interval = Duration::from_secs_f32(1.0 / frame_rate.max(0.1));
        self
    }

    pub fn with_torch(mut self, has_torch: bool) -> Self {
        self.has_torch = has_torch;
        self
    }

    pub fn torch(&self) -> bool {
        self.torch
    }
}

impl CameraDevice for ReplayDevice {
    fn open(&mut self, _config: &CameraConfig) -> Result<DeviceInfo, VideoError> {
        let first = self
            .frames
            .first()
            .ok_or_else(|| VideoError::DeviceUnavailable("nothing to replay".to_string()))?;
        self.open = true;
        Ok(DeviceInfo {
            name: "replay".to_string(),
            size: first.size,
            format: first.format,
            frame_rate: 1.0 / self.interval.as_secs_f32(),
            has_torch: self.has_torch,
        })
    }

    fn close(&mut self) {
        self.open = false;
        self.torch = false;
    }

    fn blocking_capture(&mut self) -> Result<Image, VideoError> {
        if !self.open {
            return Err(VideoError::Stream("replay device is closed".to_string()));
        }
        std::thread::sleep(self.interval);
        let frame = self.frames[self.next % self.frames.len()].clone();
        self.next = self.next.wrapping_add(1);
        Ok(frame)
    }

    fn set_torch(&mut self, on: bool) -> Result<(), VideoError> {
        if !self.has_torch {
            return Err(VideoError::TorchUnavailable);
        }
        self.torch = on;
        Ok(())
    }
}
