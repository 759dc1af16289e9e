use {
    base::Vec2,
    image::{Image, Orientation, PixelFormat},
    std::time::Duration,
    video::{
        CameraConfig, CameraDevice, DeviceInfo, FrameSource, ReplayDevice, SessionState,
        VideoError,
    },
};

fn gray(width: usize, height: usize) -> Image {
    Image::new(Vec2::new(width, height), vec![128; width * height * 3], PixelFormat::Rgb8)
}

fn fast_replay() -> ReplayDevice {
    ReplayDevice::new(gray(8, 6)).with_frame_rate(200.0)
}

enum Failure {
    Missing,
    Busy,
}

struct BrokenDevice {
    failure: Failure,
}

impl CameraDevice for BrokenDevice {
    fn open(&mut self, _config: &CameraConfig) -> Result<DeviceInfo, VideoError> {
        match self.failure {
            Failure::Missing => Err(VideoError::DeviceUnavailable("no camera".to_string())),
            Failure::Busy => Err(VideoError::DeviceBusy("input in use".to_string())),
        }
    }

    fn close(&mut self) {}

    fn blocking_capture(&mut self) -> Result<Image, VideoError> {
        Err(VideoError::Stream("never opened".to_string()))
    }
}

async fn wait_for_frame(source: &FrameSource) {
    let mut slot = source.subscribe();
    tokio::time::timeout(Duration::from_secs(5), slot.wait_for(|frame| frame.is_some()))
        .await
        .expect("no frame within 5s")
        .unwrap();
}

#[tokio::test]
async fn test_start_delivers_frames_and_stop_clears_slot() {
    let mut source = FrameSource::new(fast_replay(), CameraConfig::default());
    assert_eq!(source.state(), SessionState::Stopped);
    assert!(source.latest_frame().is_none());

    source.start().await.unwrap();
    assert_eq!(source.state(), SessionState::Running);
    assert_eq!(source.info().unwrap().size, Vec2::new(8, 6));

    wait_for_frame(&source).await;
    let frame = source.latest_frame().unwrap();
    assert_eq!(frame.image.size, Vec2::new(8, 6));
    assert!(frame.sequence >= 1);

    source.stop().await;
    assert_eq!(source.state(), SessionState::Stopped);
    assert!(source.latest_frame().is_none());
    assert!(source.info().is_none());
}

#[tokio::test]
async fn test_start_is_idempotent_and_restartable() {
    let mut source = FrameSource::new(fast_replay(), CameraConfig::default());
    source.start().await.unwrap();
    source.start().await.unwrap();
    assert_eq!(source.state(), SessionState::Running);

    source.stop().await;
    source.stop().await;
    assert_eq!(source.state(), SessionState::Stopped);

    source.start().await.unwrap();
    wait_for_frame(&source).await;
    source.stop().await;
}

#[tokio::test]
async fn test_sequence_increases() {
    let mut source = FrameSource::new(fast_replay(), CameraConfig::default());
    source.start().await.unwrap();
    let mut slot = source.subscribe();

    let mut last = 0;
    for _ in 0..3 {
        slot.changed().await.unwrap();
        let sequence = slot.borrow_and_update().as_ref().map(|f| f.sequence).unwrap_or(0);
        assert!(sequence > last);
        last = sequence;
    }
    source.stop().await;
}

#[tokio::test]
async fn test_missing_device() {
    let device = BrokenDevice { failure: Failure::Missing };
    let mut source = FrameSource::new(device, CameraConfig::default());

    let result = source.start().await;
    assert!(matches!(result, Err(VideoError::DeviceUnavailable(_))));
    assert_eq!(source.state(), SessionState::Stopped);

    // the device is handed back, so a retry reaches it again
    let result = source.start().await;
    assert!(matches!(result, Err(VideoError::DeviceUnavailable(_))));
}

#[tokio::test]
async fn test_busy_device() {
    let device = BrokenDevice { failure: Failure::Busy };
    let mut source = FrameSource::new(device, CameraConfig::default());
    assert!(matches!(source.start().await, Err(VideoError::DeviceBusy(_))));
}

#[tokio::test]
async fn test_torch_toggle() {
    let mut source = FrameSource::new(fast_replay().with_torch(true), CameraConfig::default());

    // no-op while stopped
    assert!(!source.toggle_torch().unwrap());

    source.start().await.unwrap();
    assert!(source.toggle_torch().unwrap());
    assert!(source.torch_on());
    assert!(!source.toggle_torch().unwrap());
    assert!(!source.torch_on());
    source.stop().await;
}

#[tokio::test]
async fn test_torch_unavailable_is_reported() {
    let mut source = FrameSource::new(fast_replay(), CameraConfig::default());
    source.start().await.unwrap();
    assert!(matches!(source.toggle_torch(), Err(VideoError::TorchUnavailable)));
    // stream keeps running
    wait_for_frame(&source).await;
    assert_eq!(source.state(), SessionState::Running);
    source.stop().await;
}

#[tokio::test]
async fn test_config_orientation_is_stamped() {
    let config = CameraConfig::default().with_orientation(Orientation::Right);
    let mut source = FrameSource::new(fast_replay(), config);
    source.start().await.unwrap();
    wait_for_frame(&source).await;
    assert_eq!(source.latest_frame().unwrap().image.orientation, Orientation::Right);
    source.stop().await;
}

#[tokio::test]
async fn test_empty_replay_is_unavailable() {
    let mut source = FrameSource::new(ReplayDevice::from_frames(vec![]), CameraConfig::default());
    assert!(matches!(source.start().await, Err(VideoError::DeviceUnavailable(_))));
}

/// Streams small gray frames but takes full-size white stills.
struct PhotoDevice {
    inner: ReplayDevice,
}

impl CameraDevice for PhotoDevice {
    fn open(&mut self, config: &CameraConfig) -> Result<DeviceInfo, VideoError> {
        self.inner.open(config)
    }

    fn close(&mut self) {
        self.inner.close()
    }

    fn blocking_capture(&mut self) -> Result<Image, VideoError> {
        self.inner.blocking_capture()
    }

    fn capture_still(&mut self) -> Result<Image, VideoError> {
        Ok(Image::new(Vec2::new(16, 12), vec![255; 16 * 12 * 3], PixelFormat::Rgb8))
    }
}

#[tokio::test]
async fn test_capture_still_needs_running_camera() {
    let mut source = FrameSource::new(fast_replay(), CameraConfig::default());
    assert!(matches!(source.capture_still().await, Err(VideoError::Stream(_))));

    source.start().await.unwrap();
    source.stop().await;
    assert!(matches!(source.capture_still().await, Err(VideoError::Stream(_))));
}

#[tokio::test]
async fn test_capture_still_defaults_to_streamed_frame() {
    let mut source = FrameSource::new(fast_replay(), CameraConfig::default());
    source.start().await.unwrap();
    let still = source.capture_still().await.unwrap();
    assert_eq!(still.size, Vec2::new(8, 6));
    assert!(still.data.iter().all(|&v| v == 128));
    source.stop().await;
}

#[tokio::test]
async fn test_capture_still_uses_device_photo_path() {
    let device = PhotoDevice { inner: fast_replay() };
    let config = CameraConfig::default().with_orientation(Orientation::Right);
    let mut source = FrameSource::new(device, config);
    source.start().await.unwrap();

    let still = source.capture_still().await.unwrap();
    assert_eq!(still.size, Vec2::new(16, 12));
    assert!(still.data.iter().all(|&v| v == 255));
    assert_eq!(still.orientation, Orientation::Right);

    // streaming carries on after the still
    wait_for_frame(&source).await;
    assert_eq!(source.latest_frame().unwrap().image.size, Vec2::new(8, 6));
    source.stop().await;
}
