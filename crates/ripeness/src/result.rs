use {
    crate::*,
    base::log_info,
    image::Image,
    std::{
        sync::{
            Arc,
            atomic::{AtomicU64, Ordering},
        },
        time::SystemTime,
    },
};

/// Label given to results where nothing could be classified.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Headline shown instead of a status when classification failed.
pub const NOT_DETECTED: &str = "Not detected, please retry with better lighting";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// The outcome of one classification.
#[derive(Debug, Clone)]
pub struct PredictionResult {
    /// Unique within the process.
    pub id: u64,
    /// The picture shown with the result: the 250-point crop for camera
    /// captures, the whole picture for gallery imports.
    pub image: Option<Arc<Image>>,
    pub label: String,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub timestamp: SystemTime,
    degraded: bool,
}

impl PredictionResult {
    /// A successful classification. Confidence is clamped to `[0, 1]`.
    pub fn new(image: Option<Arc<Image>>, label: impl Into<String>, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            image,
            label: label.into(),
            confidence,
            timestamp: SystemTime::now(),
            degraded: false,
        }
    }

    /// A result standing in for a failed classification.
    pub fn degraded(image: Option<Arc<Image>>) -> Self {
        Self {
            degraded: true,
            ..Self::new(image, UNKNOWN_LABEL, 0.0)
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn ripeness_status(&self) -> RipenessStatus {
        RipenessStatus::from_label(&self.label)
    }

    /// Confidence as a whole percentage, truncated: 0.879 is "87%".
    pub fn formatted_confidence(&self) -> String {
        format!("{}%", (self.confidence * 100.0) as u32)
    }

    pub fn summary(&self) -> Summary {
        let status = self.ripeness_status();
        Summary {
            headline: if self.degraded {
                NOT_DETECTED.to_string()
            } else {
                format!("{} ({})", self.label, self.formatted_confidence())
            },
            title: status.title(),
            description: status.description(),
            color: status.color(),
            confidence: self.formatted_confidence(),
            date: base::format_time(self.timestamp),
        }
    }

    /// Keep the result. Results are not persisted, so this only logs.
    pub fn save(&self) {
        log_info!("result {} ({}) kept for this session", self.id, self.label);
    }
}

/// Display values for a result screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub headline: String,
    pub title: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub confidence: String,
    pub date: String,
}
