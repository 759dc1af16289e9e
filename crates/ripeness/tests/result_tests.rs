use ripeness::{NOT_DETECTED, PredictionResult, RipenessStatus};

#[test]
fn test_status_from_label() {
    assert_eq!(RipenessStatus::from_label("ripe"), RipenessStatus::Ripe);
    assert_eq!(RipenessStatus::from_label("RIPE"), RipenessStatus::Ripe);
    assert_eq!(RipenessStatus::from_label("Unripe"), RipenessStatus::Unripe);
    assert_eq!(RipenessStatus::from_label("rotten"), RipenessStatus::Rotten);
    assert_eq!(RipenessStatus::from_label("banana"), RipenessStatus::Unknown);
    assert_eq!(RipenessStatus::from_label(""), RipenessStatus::Unknown);
}

#[test]
fn test_status_display_values() {
    let colors: Vec<&str> = RipenessStatus::ALL.iter().map(|s| s.color()).collect();
    assert_eq!(colors, vec!["orange", "green", "red", "gray"]);
    for status in RipenessStatus::ALL {
        assert!(!status.title().is_empty());
        assert!(!status.description().is_empty());
    }
    assert_eq!(RipenessStatus::Rotten.to_string(), "Rotten");
}

#[test]
fn test_formatted_confidence_truncates() {
    assert_eq!(PredictionResult::new(None, "ripe", 0.879).formatted_confidence(), "87%");
    assert_eq!(PredictionResult::new(None, "ripe", 0.87).formatted_confidence(), "87%");
    assert_eq!(PredictionResult::new(None, "ripe", 1.0).formatted_confidence(), "100%");
    assert_eq!(PredictionResult::new(None, "ripe", 0.004).formatted_confidence(), "0%");
}

#[test]
fn test_confidence_is_clamped() {
    assert_eq!(PredictionResult::new(None, "ripe", 1.5).confidence, 1.0);
    assert_eq!(PredictionResult::new(None, "ripe", -0.5).confidence, 0.0);
    assert_eq!(PredictionResult::new(None, "ripe", f64::NAN).confidence, 0.0);
}

#[test]
fn test_ids_are_unique() {
    let a = PredictionResult::new(None, "ripe", 0.5);
    let b = PredictionResult::new(None, "ripe", 0.5);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_summary() {
    let result = PredictionResult::new(None, "Ripe", 0.92);
    let summary = result.summary();
    assert_eq!(summary.headline, "Ripe (92%)");
    assert_eq!(summary.title, "Ripe");
    assert_eq!(summary.color, "green");
    assert_eq!(summary.confidence, "92%");
    assert_eq!(summary.date.len(), 19);
    result.save();
}

#[test]
fn test_degraded_summary() {
    let result = PredictionResult::degraded(None);
    assert!(result.is_degraded());
    assert_eq!(result.label, "unknown");
    assert_eq!(result.confidence, 0.0);
    let summary = result.summary();
    assert_eq!(summary.headline, NOT_DETECTED);
    assert_eq!(summary.color, "gray");
}
