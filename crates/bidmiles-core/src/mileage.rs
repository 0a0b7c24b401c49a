//! Mileage arithmetic and the per-row record produced by the aggregator.

use std::fmt;
use std::num::NonZeroU32;

use serde::Serialize;

use crate::error::ParseError;
use crate::geo::GeoPoint;

pub const METERS_PER_MILE: f64 = 1609.344;

/// Region label used whenever a region cannot be determined.
pub const UNKNOWN_REGION: &str = "Unknown";

/// Rounds to two decimal places, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[must_use]
pub fn meters_to_miles(meters: f64) -> f64 {
    round2(meters / METERS_PER_MILE)
}

/// A travel distance in miles, or an explicit marker that no usable value
/// was obtained. Never conflated with zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DistanceResult {
    Miles(f64),
    Unresolved,
}

impl DistanceResult {
    #[must_use]
    pub fn miles(self) -> Option<f64> {
        match self {
            DistanceResult::Miles(m) => Some(m),
            DistanceResult::Unresolved => None,
        }
    }

    #[must_use]
    pub fn is_resolved(self) -> bool {
        matches!(self, DistanceResult::Miles(_))
    }

    /// The larger of two distances. Unresolved if either side is.
    #[must_use]
    pub fn furthest(self, other: DistanceResult) -> DistanceResult {
        match (self, other) {
            (DistanceResult::Miles(a), DistanceResult::Miles(b)) => DistanceResult::Miles(a.max(b)),
            _ => DistanceResult::Unresolved,
        }
    }

    /// Multiplies by a tracker count, rounded to two decimals.
    #[must_use]
    pub fn scaled(self, trackers: NonZeroU32) -> DistanceResult {
        match self {
            DistanceResult::Miles(m) => DistanceResult::Miles(round2(m * f64::from(trackers.get()))),
            DistanceResult::Unresolved => DistanceResult::Unresolved,
        }
    }
}

impl From<Option<f64>> for DistanceResult {
    fn from(value: Option<f64>) -> Self {
        value.map_or(DistanceResult::Unresolved, DistanceResult::Miles)
    }
}

impl fmt::Display for DistanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceResult::Miles(m) => write!(f, "{m:.2}"),
            DistanceResult::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// The two field points of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Launcher,
    Receiver,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Launcher => write!(f, "launcher"),
            Endpoint::Receiver => write!(f, "receiver"),
        }
    }
}

/// Why a record is not fully populated.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordIssue {
    Parse {
        endpoint: Endpoint,
        error: ParseError,
    },
    /// The routing provider gave no usable route (including transport failures).
    RouteUnresolved { endpoint: Endpoint },
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIssue::Parse { endpoint, error } => {
                write!(f, "could not parse {endpoint} coordinates: {error}")
            }
            RecordIssue::RouteUnresolved { endpoint } => {
                write!(f, "no driving route from the office to the {endpoint}")
            }
        }
    }
}

/// One unit of work: a manual submission or one uploaded row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordInput {
    pub label: Option<String>,
    pub launcher: String,
    pub receiver: String,
}

impl RecordInput {
    pub fn new(launcher: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            label: None,
            launcher: launcher.into(),
            receiver: receiver.into(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// The populated result for one [`RecordInput`].
///
/// `*_region` is `None` when region lookup is disabled; `total_mileage` is
/// `None` when no tracker count was supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct MileageRecord {
    pub label: Option<String>,
    pub launcher_text: String,
    pub receiver_text: String,
    pub launcher: Option<GeoPoint>,
    pub receiver: Option<GeoPoint>,
    pub distance_to_launcher: DistanceResult,
    pub distance_to_receiver: DistanceResult,
    pub furthest: DistanceResult,
    pub launcher_region: Option<String>,
    pub receiver_region: Option<String>,
    pub total_mileage: Option<DistanceResult>,
    pub issues: Vec<RecordIssue>,
}

impl MileageRecord {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.issues.is_empty() && self.furthest.is_resolved()
    }

    #[must_use]
    pub fn has_parse_error(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i, RecordIssue::Parse { .. }))
    }
}
