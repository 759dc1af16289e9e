use {image::ImageError, inference::InferError, std::fmt};

/// Why a capture request produced no result.
///
/// Classification failures are not here: they resolve as a degraded
/// [`PredictionResult`](crate::PredictionResult) instead.
#[derive(Debug)]
pub enum CaptureError {
    /// Another capture is still being classified.
    CaptureInProgress,
    /// The camera has not delivered a frame yet.
    NoFrameAvailable,
    /// The pipeline is not streaming.
    NotStreaming,
    /// The latest frame could not be turned into a picture.
    InvalidImage(ImageError),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::CaptureInProgress => write!(f, "capture already in progress"),
            CaptureError::NoFrameAvailable => write!(f, "no frame available"),
            CaptureError::NotStreaming => write!(f, "camera is not streaming"),
            CaptureError::InvalidImage(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<ImageError> for CaptureError {
    fn from(err: ImageError) -> Self {
        CaptureError::InvalidImage(err)
    }
}

/// Failure of a gallery import. The display text is shown to the user.
#[derive(Debug)]
pub enum ImportError {
    Load(ImageError),
    Analyze(InferError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Load(err) => write!(f, "Failed to load image: {err}"),
            ImportError::Analyze(err) => write!(f, "Failed to analyze image: {err}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<ImageError> for ImportError {
    fn from(err: ImageError) -> Self {
        ImportError::Load(err)
    }
}

impl From<InferError> for ImportError {
    fn from(err: InferError) -> Self {
        ImportError::Analyze(err)
    }
}
