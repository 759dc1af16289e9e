use std::time::Duration;

/// Capture pipeline settings.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    live_window: Duration,
    crop_side: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            live_window: Duration::from_millis(500),
            crop_side: 250.0,
        }
    }
}

impl PipelineConfig {
    /// Classify at most one live frame per `window`.
    pub fn with_live_window(mut self, window: Duration) -> Self {
        self.live_window = window;
        self
    }

    /// Side in points of the square cut from a captured frame for display.
    pub fn with_crop_side(mut self, side: f32) -> Self {
        self.crop_side = side;
        self
    }

    pub fn live_window(&self) -> Duration {
        self.live_window
    }

    pub fn crop_side(&self) -> f32 {
        self.crop_side
    }
}
