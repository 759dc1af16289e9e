//! Image classification.
//!
//! A [`Model`] turns an image into ranked [`Classification`] candidates; the
//! [`Classifier`] runs it off the async runtime and keeps the best one. With
//! the `onnx` feature, [`OnnxModel`] runs an exported network described by a
//! [`ModelConfig`].

mod classification;
pub use classification::*;

mod classifier;
pub use classifier::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod model;
pub use model::*;

mod preprocess;
pub use preprocess::*;

#[cfg(feature = "onnx")]
mod onnx;
#[cfg(feature = "onnx")]
pub use onnx::*;
