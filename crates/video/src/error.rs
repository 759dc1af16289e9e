use {image::ImageError, std::fmt};

#[derive(Debug)]
pub enum VideoError {
    /// No camera device exists (or it vanished).
    DeviceUnavailable(String),
    /// The device exists but its input could not be attached.
    DeviceBusy(String),
    /// The device has no torch. Never fatal.
    TorchUnavailable,
    Stream(String),
    Decode(ImageError),
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::DeviceUnavailable(msg) => write!(f, "device unavailable: {msg}"),
            VideoError::DeviceBusy(msg) => write!(f, "device busy: {msg}"),
            VideoError::TorchUnavailable => write!(f, "torch unavailable"),
            VideoError::Stream(msg) => write!(f, "stream error: {msg}"),
            VideoError::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl std::error::Error for VideoError {}

impl From<std::io::Error> for VideoError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => VideoError::DeviceUnavailable(err.to_string()),
            std::io::ErrorKind::ResourceBusy | std::io::ErrorKind::PermissionDenied => {
                VideoError::DeviceBusy(err.to_string())
            }
            _ => VideoError::Stream(err.to_string()),
        }
    }
}

impl From<ImageError> for VideoError {
    fn from(err: ImageError) -> Self {
        VideoError::Decode(err)
    }
}
