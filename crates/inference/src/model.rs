use {crate::*, image::Image};

/// Image-classification model boundary.
///
/// `predict` returns candidates ordered best first. It may block; the
/// classifier calls it from tokio's blocking pool.
pub trait Model: Send + Sync + 'static {
    fn predict(&self, image: &Image) -> Result<Vec<Classification>, InferError>;
}
