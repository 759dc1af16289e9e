//! Camera frame acquisition.
//!
//! A [`FrameSource`] owns one [`CameraDevice`] and keeps the newest frame in
//! a single-slot buffer that any number of consumers can read or watch.

mod config;
pub use config::*;

mod device;
pub use device::*;

mod error;
pub use error::*;

mod framesource;
pub use framesource::*;

mod replay;
pub use replay::*;

mod videoframe;
pub use videoframe::*;

#[cfg(feature = "v4l2")]
mod v4l2;
#[cfg(feature = "v4l2")]
pub use v4l2::*;
