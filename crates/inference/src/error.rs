use {image::ImageError, std::fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum InferError {
    /// The model failed to load. Permanent for the classifier's lifetime.
    ModelUnavailable(String),
    /// The model produced no candidates. Retryable.
    NoResult,
    InvalidImage(String),
    Runtime(String),
}

impl InferError {
    /// Whether calling again might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, InferError::NoResult | InferError::Runtime(_))
    }
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelUnavailable(msg) => write!(f, "model failed to load: {msg}"),
            InferError::NoResult => write!(f, "no prediction results available"),
            InferError::InvalidImage(msg) => write!(f, "invalid image: {msg}"),
            InferError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<ImageError> for InferError {
    fn from(err: ImageError) -> Self {
        InferError::InvalidImage(err.to_string())
    }
}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::ModelUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for InferError {
    fn from(err: serde_json::Error) -> Self {
        InferError::ModelUnavailable(format!("bad model config: {err}"))
    }
}

#[cfg(feature = "onnx")]
impl From<ort::Error> for InferError {
    fn from(err: ort::Error) -> Self {
        InferError::Runtime(err.to_string())
    }
}
