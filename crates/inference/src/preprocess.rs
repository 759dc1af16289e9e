use {
    crate::*,
    base::{Rect, Vec2},
    image::Image,
};

/// Model input: one image in NCHW layout.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    pub shape: [usize; 4],
    pub data: Vec<f32>,
}

/// Turn an image into the model's input tensor.
///
/// The image is made upright, the largest centered square is cut out and
/// scaled to `input_side`, then each channel is normalized as
/// `(v / 255 - mean) / std`.
pub fn preprocess(image: &Image, config: &ModelConfig) -> Result<InputTensor, InferError> {
    let upright = image.upright()?;
    let side = upright.size.x.min(upright.size.y);
    let square = upright.crop(Rect::centered(upright.size, Vec2::new(side, side)))?;
    let scaled = square.resize(Vec2::new(config.input_side, config.input_side))?;

    let plane = config.input_side * config.input_side;
    let mut data = vec![0.0f32; 3 * plane];
    for (i, pixel) in scaled.data.chunks_exact(3).take(plane).enumerate() {
        for c in 0..3 {
            data[c * plane + i] = (pixel[c] as f32 / 255.0 - config.mean[c]) / config.std[c];
        }
    }

    Ok(InputTensor {
        shape: [1, 3, config.input_side, config.input_side],
        data,
    })
}
