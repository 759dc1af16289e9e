use {
    crate::*,
    base::{log_info, log_warn},
    image::{Image, decode_image},
    inference::Classify,
    std::sync::Arc,
};

/// Classify a picture picked by the user, bypassing the camera.
///
/// `data` is an encoded picture (JPEG, PNG, BMP or WebP). It is turned
/// upright and classified whole; the result carries the whole picture.
/// Unlike camera captures, failures are returned as errors to be shown.
pub async fn import_image<C: Classify>(
    classifier: &C,
    data: &[u8],
) -> Result<PredictionResult, ImportError> {
    let image = decode_image(data)
        .await
        .and_then(|image| image.upright())
        .map_err(|error| {
            log_warn!("gallery image rejected: {}", error);
            ImportError::Load(error)
        })?;
    classify_image(classifier, image).await
}

/// Classify an already decoded picture.
pub async fn classify_image<C: Classify>(
    classifier: &C,
    image: Image,
) -> Result<PredictionResult, ImportError> {
    let image = Arc::new(image);
    let classification = classifier
        .classify(Arc::clone(&image))
        .await
        .map_err(|error| {
            log_warn!("gallery classification failed: {}", error);
            ImportError::Analyze(error)
        })?;
    let result = PredictionResult::new(
        Some(image),
        classification.label,
        classification.confidence as f64,
    );
    log_info!(
        "gallery result {}: {} {}",
        result.id,
        result.label,
        result.formatted_confidence()
    );
    Ok(result)
}
