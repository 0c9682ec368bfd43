use crate::series::EventSeries;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// The four categories a user can log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    SmallGood,
    BigGood,
    SmallBad,
    Horrible,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::SmallGood,
        EventKind::BigGood,
        EventKind::SmallBad,
        EventKind::Horrible,
    ];

    /// Magnitude bounds of the delta, before the sign is applied.
    pub fn magnitude(self) -> RangeInclusive<f64> {
        match self {
            EventKind::SmallGood | EventKind::SmallBad => 0.1..=0.3,
            EventKind::BigGood | EventKind::Horrible => 0.5..=1.0,
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, EventKind::SmallGood | EventKind::BigGood)
    }

    /// Draws a signed delta uniformly from this category's range.
    pub fn delta<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        let magnitude = rng.gen_range(self.magnitude());
        if self.is_positive() {
            magnitude
        } else {
            -magnitude
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::SmallGood => "small-good",
            EventKind::BigGood => "big-good",
            EventKind::SmallBad => "small-bad",
            EventKind::Horrible => "horrible",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventKind::SmallGood => "Small Good Event",
            EventKind::BigGood => "Big Good Event",
            EventKind::SmallBad => "Small Bad Event",
            EventKind::Horrible => "Horrible Event",
        }
    }

    pub fn example(self) -> &'static str {
        match self {
            EventKind::SmallGood => "ex. Bought a new book",
            EventKind::BigGood => "ex. Got promoted at work",
            EventKind::SmallBad => "ex. Missed the bus",
            EventKind::Horrible => "ex. Experienced a major accident",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown event kind `{0}` (expected small-good, big-good, small-bad or horrible)")]
pub struct UnknownEventKind(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownEventKind(raw.to_string()))
    }
}

/// Applies a random delta for `kind` to the running value and appends the
/// result. Returns the new running value.
pub fn classify_and_append<R: Rng + ?Sized>(
    series: &mut EventSeries,
    kind: EventKind,
    rng: &mut R,
) -> f64 {
    let value = series.current_value() + kind.delta(rng);
    series.append(value);
    value
}
