use {
    crate::*,
    serde::{Deserialize, Serialize},
    std::path::{Path, PathBuf},
};

/// How to read the model's output vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Raw scores, softmax is applied.
    #[default]
    Logits,
    /// Already probabilities, clamped to `[0, 1]`.
    Probabilities,
}

fn default_input_side() -> usize {
    224
}

fn default_mean() -> [f32; 3] {
    [0.485, 0.456, 0.406]
}

fn default_std() -> [f32; 3] {
    [0.229, 0.224, 0.225]
}

/// Image-classification model description, usually stored as JSON next to
/// the model file.
///
/// ```json
/// { "model": "apple_ripeness.onnx", "labels": ["ripe", "rotten", "unripe"] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model: PathBuf,
    pub labels: Vec<String>,
    #[serde(default = "default_input_side")]
    pub input_side: usize,
    #[serde(default = "default_mean")]
    pub mean: [f32; 3],
    #[serde(default = "default_std")]
    pub std: [f32; 3],
    #[serde(default)]
    pub output: OutputKind,
}

impl ModelConfig {
    pub fn new(model: impl Into<PathBuf>, labels: Vec<String>) -> Self {
        Self {
            model: model.into(),
            labels,
            input_side: default_input_side(),
            mean: default_mean(),
            std: default_std(),
            output: OutputKind::default(),
        }
    }

    pub fn with_input_side(mut self, side: usize) -> Self {
        self.input_side = side;
        self
    }

    pub fn with_normalization(mut self, mean: [f32; 3], std: [f32; 3]) -> Self {
        self.mean = mean;
        self.std = std;
        self
    }

    pub fn with_output(mut self, output: OutputKind) -> Self {
        self.output = output;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, InferError> {
        let config: ModelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. A relative model path is resolved against the
    /// config file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InferError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&json)?;
        if config.model.is_relative() {
            if let Some(dir) = path.parent() {
                config.model = dir.join(&config.model);
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InferError> {
        if self.labels.is_empty() {
            return Err(InferError::ModelUnavailable("model has no labels".to_string()));
        }
        if self.input_side == 0 {
            return Err(InferError::ModelUnavailable("input side is zero".to_string()));
        }
        if self.std.iter().any(|s| *s == 0.0) {
            return Err(InferError::ModelUnavailable("normalization std is zero".to_string()));
        }
        Ok(())
    }
}
