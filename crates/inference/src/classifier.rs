use {
    crate::*,
    base::log_error,
    image::Image,
    std::{future::Future, sync::Arc},
};

/// Single-shot image classification.
///
/// Implemented by [`Classifier`]; tests and callers with their own model
/// plumbing implement it directly.
pub trait Classify: Send + Sync + 'static {
    /// Classify one image, returning the best candidate.
    ///
    /// Confidence is always in `[0, 1]`.
    fn classify(
        &self,
        image: Arc<Image>,
    ) -> impl Future<Output = Result<Classification, InferError>> + Send;
}

enum ModelState {
    Ready(Arc<dyn Model>),
    Unavailable(String),
}

/// Classifier over a loaded model.
///
/// Whether the model loaded is settled at construction. A classifier
/// without a model fails every call with `ModelUnavailable`.
pub struct Classifier {
    state: ModelState,
}

impl Classifier {
    pub fn from_model(model: impl Model) -> Self {
        Self {
            state: ModelState::Ready(Arc::new(model)),
        }
    }

    /// A classifier whose model could not be loaded.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ModelState::Unavailable(reason.into()),
        }
    }

    /// Load the model described by `config`.
    #[cfg(feature = "onnx")]
    pub fn try_load(config: &ModelConfig) -> Result<Self, InferError> {
        config.validate()?;
        let model = OnnxModel::load(config.clone())?;
        base::log_info!(
            "model {} loaded, {} labels",
            config.model.display(),
            config.labels.len()
        );
        Ok(Self::from_model(model))
    }

    /// Load the model described by `config`.
    ///
    /// Without an inference backend compiled in, every model is unavailable.
    #[cfg(not(feature = "onnx"))]
    pub fn try_load(config: &ModelConfig) -> Result<Self, InferError> {
        config.validate()?;
        Err(InferError::ModelUnavailable(format!(
            "cannot run {}: built without the onnx feature",
            config.model.display()
        )))
    }

    /// Load the model, or build an unavailable classifier if that fails.
    ///
    /// The failure is logged here, once.
    pub fn load(config: &ModelConfig) -> Self {
        match Self::try_load(config) {
            Ok(classifier) => classifier,
            Err(error) => {
                log_error!("failed to load model: {}", error);
                Self::unavailable(error.to_string())
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }
}

impl Classify for Classifier {
    async fn classify(&self, image: Arc<Image>) -> Result<Classification, InferError> {
        let model = match &self.state {
            ModelState::Ready(model) => Arc::clone(model),
            ModelState::Unavailable(reason) => {
                return Err(InferError::ModelUnavailable(reason.clone()));
            }
        };
        image.validate()?;
        let candidates = tokio::task::spawn_blocking(move || model.predict(&image))
            .await
            .map_err(|e| InferError::Runtime(e.to_string()))??;
        best(candidates)
    }
}

/// Take the first candidate, clamping its confidence to `[0, 1]`.
pub fn best(candidates: Vec<Classification>) -> Result<Classification, InferError> {
    let mut first = candidates.into_iter().next().ok_or(InferError::NoResult)?;
    if first.confidence.is_nan() {
        return Err(InferError::NoResult);
    }
    first.confidence = first.confidence.clamp(0.0, 1.0);
    Ok(first)
}
