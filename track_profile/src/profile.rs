//! Parsed track description: grade segments plus trackside markers.

use serde::{Deserialize, Serialize};

/// Straight run of track with a constant grade.
///
/// `grade` is stored in per-mille: 5.0 means a rise of 5 units per 1000 units
/// of distance. Negative values are descents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeSegment {
    pub length: u64,
    pub grade: f64,
}

impl GradeSegment {
    pub fn new(length: u64, grade: f64) -> Self {
        Self { length, grade }
    }
}

/// Signal position along the track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalMarker {
    pub coord: u64,
    pub name: String,
}

/// Station platform starting at `coord` and extending `length` units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationMarker {
    pub coord: u64,
    pub length: u64,
    pub name: String,
}

/// Result of reading a track profile file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackProfile {
    pub segments: Vec<GradeSegment>,
    pub signals: Vec<SignalMarker>,
    pub stations: Vec<StationMarker>,
    /// Signalling metadata carried through from the file, not used by the geometry.
    pub four_digit_blocking: bool,
}

impl TrackProfile {
    pub fn new(segments: Vec<GradeSegment>) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    /// Sum of all segment lengths, `None` if it does not fit in a `u64`.
    pub fn total_length(&self) -> Option<u64> {
        self.segments
            .iter()
            .try_fold(0u64, |acc, s| acc.checked_add(s.length))
    }

    /// Returns the profile traversed in the opposite direction.
    ///
    /// Only the segment order changes; marker coordinates are kept as read.
    pub fn reversed(mut self) -> Self {
        self.segments.reverse();
        self
    }
}
