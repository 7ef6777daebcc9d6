//! Vertical curves joining segments of different grade.
//!
//! Each boundary between two segments gets a circular transition of radius
//! `radius`, modelled as a linear grade ramp over `2 * half_length` of track
//! centred on the boundary.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::profile::GradeSegment;

/// Largest transition radius, in distance units.
pub const R_CONJ: f64 = 15000.0;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Conjugation {
    pub radius: f64,
    /// Distance from the boundary to either end of the transition.
    pub half_length: f64,
}

impl Conjugation {
    /// Join with no transition curve.
    pub const STRAIGHT: Conjugation = Conjugation {
        radius: R_CONJ,
        half_length: 0.0,
    };

    /// Fits a transition between `prev_grade` and `next_grade`.
    ///
    /// Starting from [`R_CONJ`], the radius is halved until the half length is
    /// strictly below a third of `length_limit`.
    pub fn fit(prev_grade: f64, next_grade: f64, length_limit: f64) -> Self {
        let bound = length_limit / 3.0;
        if prev_grade == next_grade || bound <= 0.0 {
            return Self::STRAIGHT;
        }

        // Small-angle view of the two grades as lines meeting at a vertex.
        let arc = (1.0 / (0.001 * (prev_grade - next_grade).abs())).atan() + FRAC_PI_2;
        let opposite_angle = (PI - arc) / 2.0;
        let tan = opposite_angle.tan();

        let mut radius = R_CONJ;
        let mut half_length = radius * tan;
        while half_length >= bound {
            radius /= 2.0;
            half_length = radius * tan;
            log::trace!("halved radius to {radius} (half length {half_length:.3}, bound {bound:.3})");
        }
        Self {
            radius,
            half_length,
        }
    }

    /// Grade change per unit distance inside the transition, in per-mille.
    pub fn ramp_rate(&self) -> f64 {
        1000.0 / self.radius
    }

    pub fn is_straight(&self) -> bool {
        self.half_length == 0.0
    }
}

/// Computes one conjugation per segment.
///
/// Entry `i` describes the boundary between segments `i` and `i + 1`; the
/// final entry has no following boundary and is always straight. Each
/// transition is bounded by the shorter of its two neighbours.
pub fn conjugate(segments: &[GradeSegment]) -> Vec<Conjugation> {
    let mut table: Vec<Conjugation> = segments
        .windows(2)
        .map(|pair| {
            let limit = pair[0].length.min(pair[1].length) as f64;
            Conjugation::fit(pair[0].grade, pair[1].grade, limit)
        })
        .collect();
    if !segments.is_empty() {
        table.push(Conjugation::STRAIGHT);
    }
    let curved = table.iter().filter(|c| !c.is_straight()).count();
    log::debug!("fitted {} vertical curves over {} segments", curved, segments.len());
    table
}
