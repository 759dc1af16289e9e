//! Apple ripeness from a camera or a picked photo.
//!
//! [`CapturePipeline`] owns a [`FrameSource`](video::FrameSource) and a
//! classifier. While streaming it publishes throttled [`LiveText`]; on
//! request it captures the newest frame, classifies it and returns a
//! [`PredictionResult`]. [`import_image`] classifies a picture from elsewhere.

mod config;
pub use config::*;

mod error;
pub use error::*;

mod gallery;
pub use gallery::*;

mod live;
pub use live::*;

mod pipeline;
pub use pipeline::*;

mod result;
pub use result::*;

mod status;
pub use status::*;
