//! Wait time after assignment, and the bands it is reported in.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<h>\d+):(?P<m>\d{1,2})(?::(?P<s>\d{1,2}))?$").expect("clock pattern is valid")
    })
}

/// Time a customer waited after the conversation was assigned, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaitTime(f64);

impl WaitTime {
    /// Create a wait time from minutes. Negative or non-finite values are rejected.
    pub fn from_minutes(minutes: f64) -> Option<Self> {
        (minutes.is_finite() && minutes >= 0.0).then_some(Self(minutes))
    }

    /// Parse the export's `H:MM` / `H:MM:SS` text.
    ///
    /// Hours are not capped at 24. A dash, an empty cell or anything that is
    /// not a clock reading means "no wait recorded".
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() || text == "-" {
            return None;
        }

        let caps = clock_pattern().captures(text)?;
        let hours: f64 = caps.name("h")?.as_str().parse().ok()?;
        let minutes: f64 = caps.name("m")?.as_str().parse().ok()?;
        let seconds: f64 = match caps.name("s") {
            Some(s) => s.as_str().parse().ok()?,
            None => 0.0,
        };

        Self::from_minutes(hours * 60.0 + minutes + seconds / 60.0)
    }

    /// Value in minutes.
    pub fn minutes(self) -> f64 {
        self.0
    }

    /// Band this wait falls in.
    pub fn band(self) -> WaitBand {
        WaitBand::classify(Some(self))
    }
}

/// Reporting band for a wait time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitBand {
    /// Up to one minute
    UpToOneMinute,
    /// More than 1, up to 5 minutes
    OneToFive,
    /// More than 5, up to 10 minutes
    SixToTen,
    /// More than 10, up to 30 minutes
    ElevenToThirty,
    /// More than 30 minutes, up to 2 hours
    ThirtyToTwoHours,
    /// More than 2 hours
    OverTwoHours,
    /// No wait recorded
    NoData,
}

impl WaitBand {
    /// All bands in reporting order.
    pub const ALL: [WaitBand; 7] = [
        WaitBand::UpToOneMinute,
        WaitBand::OneToFive,
        WaitBand::SixToTen,
        WaitBand::ElevenToThirty,
        WaitBand::ThirtyToTwoHours,
        WaitBand::OverTwoHours,
        WaitBand::NoData,
    ];

    /// Classify an optional wait time.
    pub fn classify(wait: Option<WaitTime>) -> Self {
        let Some(wait) = wait else {
            return WaitBand::NoData;
        };
        match wait.minutes() {
            m if m <= 1.0 => WaitBand::UpToOneMinute,
            m if m <= 5.0 => WaitBand::OneToFive,
            m if m <= 10.0 => WaitBand::SixToTen,
            m if m <= 30.0 => WaitBand::ElevenToThirty,
            m if m <= 120.0 => WaitBand::ThirtyToTwoHours,
            _ => WaitBand::OverTwoHours,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            WaitBand::UpToOneMinute => "Up to 1 min",
            WaitBand::OneToFive => "1-5 min",
            WaitBand::SixToTen => "6-10 min",
            WaitBand::ElevenToThirty => "11-30 min",
            WaitBand::ThirtyToTwoHours => "30min-2h",
            WaitBand::OverTwoHours => "Over 2h",
            WaitBand::NoData => "No data",
        }
    }
}

impl std::fmt::Display for WaitBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
