use {image::Image, std::time::Instant};

/// One sampled picture from the camera.
///
/// `sequence` increases by one per acquired frame within a session, so a
/// consumer can tell how many frames it skipped.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub image: Image,
    pub sequence: u64,
    pub captured_at: Instant,
}
