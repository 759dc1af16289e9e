use std::fmt;

/// Ripeness read from a model label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RipenessStatus {
    Unripe,
    Ripe,
    Rotten,
    Unknown,
}

impl RipenessStatus {
    pub const ALL: [RipenessStatus; 4] = [
        RipenessStatus::Unripe,
        RipenessStatus::Ripe,
        RipenessStatus::Rotten,
        RipenessStatus::Unknown,
    ];

    /// Case-insensitive; anything unrecognized is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "unripe" => RipenessStatus::Unripe,
            "ripe" => RipenessStatus::Ripe,
            "rotten" => RipenessStatus::Rotten,
            _ => RipenessStatus::Unknown,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RipenessStatus::Unripe => "Unripe",
            RipenessStatus::Ripe => "Ripe",
            RipenessStatus::Rotten => "Rotten",
            RipenessStatus::Unknown => "Unknown",
        }
    }

    /// Storage advice shown with the result.
    pub fn description(&self) -> &'static str {
        match self {
            RipenessStatus::Unripe => "Still firm and not yet sweet",
            RipenessStatus::Ripe => "Ready to eat, at its sweetest",
            RipenessStatus::Rotten => "No longer fit to eat",
            RipenessStatus::Unknown => "Could not determine the apple's condition",
        }
    }

    /// Display color name.
    pub fn color(&self) -> &'static str {
        match self {
            RipenessStatus::Unripe => "orange",
            RipenessStatus::Ripe => "green",
            RipenessStatus::Rotten => "red",
            RipenessStatus::Unknown => "gray",
        }
    }
}

impl fmt::Display for RipenessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
