use {
    crate::*,
    base::log_debug,
    image::Image,
    ndarray::Array4,
    ort::{inputs, session::Session, value::TensorRef},
    std::sync::Mutex,
};

/// ONNX image classifier run through ONNX Runtime.
///
/// Expects one NCHW f32 input and one output of per-label scores.
pub struct OnnxModel {
    session: Mutex<Session>,
    config: ModelConfig,
}

impl OnnxModel {
    pub fn load(config: ModelConfig) -> Result<Self, InferError> {
        let builder = Session::builder()
            .map_err(|e| InferError::ModelUnavailable(format!("session builder: {e}")))?;
        #[cfg(feature = "cuda")]
        let builder = builder
            .with_execution_providers([
                ort::execution_providers::CUDAExecutionProvider::default().build(),
                ort::execution_providers::CPUExecutionProvider::default().build(),
            ])
            .map_err(|e| InferError::ModelUnavailable(e.to_string()))?;
        let session = builder.commit_from_file(&config.model).map_err(|e| {
            InferError::ModelUnavailable(format!("{}: {e}", config.model.display()))
        })?;
        log_debug!("onnx session ready for {}", config.model.display());
        Ok(Self {
            session: Mutex::new(session),
            config,
        })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

impl Model for OnnxModel {
    fn predict(&self, image: &Image) -> Result<Vec<Classification>, InferError> {
        let input = preprocess(image, &self.config)?;
        let array = Array4::from_shape_vec(input.shape, input.data)
            .map_err(|e| InferError::Runtime(format!("input shape: {e}")))?;
        let tensor = TensorRef::from_array_view(array.view())?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferError::Runtime("session lock poisoned".to_string()))?;
        let outputs = session.run(inputs![tensor])?;
        let scores = outputs[0].try_extract_array::<f32>()?;
        let scores: Vec<f32> = scores.iter().copied().collect();

        Ok(rank(&self.config.labels, &scores, self.config.output))
    }
}
