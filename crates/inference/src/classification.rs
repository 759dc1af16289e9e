use crate::*;

/// One candidate from a classification model.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    /// In `[0, 1]`.
    pub confidence: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Numerically stable softmax.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exp: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exp.iter().sum();
    exp.into_iter().map(|v| v / sum).collect()
}

/// Pair raw model scores with their labels, best first.
///
/// Scores are turned into probabilities according to `output`. Non-finite
/// scores are dropped; surplus scores without a label are dropped too.
pub fn rank(labels: &[String], scores: &[f32], output: OutputKind) -> Vec<Classification> {
    let probabilities = match output {
        OutputKind::Logits => softmax(scores),
        OutputKind::Probabilities => scores.to_vec(),
    };
    let mut ranked: Vec<Classification> = labels
        .iter()
        .zip(probabilities)
        .filter(|(_, p)| p.is_finite())
        .map(|(label, p)| Classification::new(label.clone(), p.clamp(0.0, 1.0)))
        .collect();
    ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    ranked
}
