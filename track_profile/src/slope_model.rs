//! Queryable grade and elevation profile of a track.
//!
//! Grades are per-mille throughout: elevation gain over a distance `d` at
//! grade `g` is `0.001 * g * d`, and a transition of radius `R` changes the
//! grade by `1000 / R` per unit distance.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::ProfileCatalog;
use crate::config::ProfileConfig;
use crate::conjugation::{conjugate, Conjugation};
use crate::error::{ProfileError, Result};
use crate::io::read_profile_file;
use crate::profile::{GradeSegment, SignalMarker, StationMarker, TrackProfile};
use crate::search::{interpolate, lower_bound};

/// Construction parameters for a [`SlopeModel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    /// Traverse the segments in the opposite direction.
    pub reverse: bool,
    /// Elevation sampling step. Memory grows linearly as it shrinks.
    pub sample_step: f64,
    /// Wrap query distances modulo the track length.
    pub cyclic: bool,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            reverse: false,
            sample_step: 10.0,
            cyclic: true,
        }
    }
}

/// Upper limit on the number of elevation samples a model may hold.
pub const MAX_ELEVATION_SAMPLES: f64 = 10_000_000.0;

impl ModelOptions {
    pub fn validate(&self) -> Result<()> {
        if self.sample_step.is_finite() && self.sample_step > 0.0 {
            Ok(())
        } else {
            Err(ProfileError::InvalidSampleStep(self.sample_step))
        }
    }

    /// Checks the step and that sampling `total_length` stays within
    /// [`MAX_ELEVATION_SAMPLES`].
    pub fn validate_for_length(&self, total_length: u64) -> Result<()> {
        self.validate()?;
        if total_length as f64 / self.sample_step > MAX_ELEVATION_SAMPLES {
            return Err(ProfileError::InvalidSampleStep(self.sample_step));
        }
        Ok(())
    }
}

/// Integrated height at a sampled distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationSample {
    pub distance: f64,
    pub height: f64,
}

pub type ElevationTable = Vec<ElevationSample>;

/// Grade profile with vertical curves and a precomputed elevation table.
///
/// Built once and read-only afterwards. A model with zero total length
/// answers every query with 0.
#[derive(Debug, Clone)]
pub struct SlopeModel {
    source: Option<String>,
    options: ModelOptions,
    segments: Vec<GradeSegment>,
    coords: Vec<u64>,
    conjugations: Vec<Conjugation>,
    elevations: ElevationTable,
    signals: Option<Vec<SignalMarker>>,
    stations: Option<Vec<StationMarker>>,
    four_digit_blocking: bool,
}

impl SlopeModel {
    /// Builds a model from a parsed profile.
    pub fn build(profile: TrackProfile, options: &ModelOptions) -> Result<Self> {
        options.validate()?;
        let profile = if options.reverse {
            profile.reversed()
        } else {
            profile
        };
        let TrackProfile {
            segments,
            signals,
            stations,
            four_digit_blocking,
        } = profile;

        let mut coords = Vec::with_capacity(segments.len());
        let mut total = 0u64;
        for seg in &segments {
            total = total
                .checked_add(seg.length)
                .ok_or(ProfileError::TrackTooLong)?;
            coords.push(total);
        }
        options.validate_for_length(total)?;
        let conjugations = conjugate(&segments);

        let mut model = Self {
            source: None,
            options: *options,
            segments,
            coords,
            conjugations,
            elevations: Vec::new(),
            signals: Some(signals),
            stations: Some(stations),
            four_digit_blocking,
        };
        model.elevations = model.sample_elevation();
        log::debug!(
            "built slope model: {} segments, length {}, {} elevation samples",
            model.segments.len(),
            model.total_length(),
            model.elevations.len()
        );
        Ok(model)
    }

    /// Placeholder used when no profile file is available.
    pub fn empty() -> Self {
        Self {
            source: None,
            options: ModelOptions::default(),
            segments: vec![GradeSegment::new(0, 0.0)],
            coords: vec![0],
            conjugations: vec![Conjugation::STRAIGHT],
            elevations: vec![ElevationSample {
                distance: 0.0,
                height: 0.0,
            }],
            signals: None,
            stations: None,
            four_digit_blocking: false,
        }
    }

    /// Reads `path` and builds a model, or returns [`SlopeModel::empty`] when
    /// the file does not exist.
    pub fn from_file(path: impl AsRef<Path>, options: &ModelOptions) -> Result<Self> {
        options.validate()?;
        match read_profile_file(path.as_ref())? {
            Some(profile) => Self::build(profile, options),
            None => Ok(Self {
                options: *options,
                ..Self::empty()
            }),
        }
    }

    /// Loads the profile selected by `config`.
    pub fn load(config: &ProfileConfig) -> Result<Self> {
        let catalog = ProfileCatalog::standard(config.data_dir());
        Self::load_from(&catalog, config)
    }

    /// Loads the profile selected by `config`, resolving names through `catalog`.
    pub fn load_from(catalog: &ProfileCatalog, config: &ProfileConfig) -> Result<Self> {
        let path = catalog.resolve(&config.source);
        log::info!("loading profile {} from {}", config.source, path.display());
        let mut model = Self::from_file(&path, &config.options)?;
        model.source = Some(config.source.clone());
        Ok(model)
    }

    /// Total track length; the modulus of cyclic queries.
    pub fn total_length(&self) -> u64 {
        self.coords.last().copied().unwrap_or(0)
    }

    /// `false` for the placeholder returned when no file was found.
    pub fn is_loaded(&self) -> bool {
        self.signals.is_some()
    }

    pub fn is_cyclic(&self) -> bool {
        self.options.cyclic
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Catalogue name or path the model was loaded from.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Segments in traversal order, after any reversal.
    pub fn segments(&self) -> &[GradeSegment] {
        &self.segments
    }

    /// Cumulative end coordinate of each segment.
    pub fn coordinates(&self) -> &[u64] {
        &self.coords
    }

    pub fn conjugations(&self) -> &[Conjugation] {
        &self.conjugations
    }

    pub fn elevation_table(&self) -> &[ElevationSample] {
        &self.elevations
    }

    pub fn signals(&self) -> Option<&[SignalMarker]> {
        self.signals.as_deref()
    }

    pub fn stations(&self) -> Option<&[StationMarker]> {
        self.stations.as_deref()
    }

    pub fn four_digit_blocking(&self) -> bool {
        self.four_digit_blocking
    }

    /// Grade at distance `x`, in per-mille.
    ///
    /// With `smooth` the grade ramps linearly through each vertical curve;
    /// without it the raw segment grade is returned.
    pub fn get_slope(&self, x: f64, smooth: bool) -> f64 {
        match self.normalize(x) {
            Some(x) if x >= 0.0 => self.locate_slope(x, smooth),
            _ => 0.0,
        }
    }

    /// Smoothed grade at distance `x`.
    pub fn slope_at(&self, x: f64) -> f64 {
        self.get_slope(x, true)
    }

    /// Height above the start of the track at distance `x`.
    pub fn get_elevation(&self, x: f64) -> f64 {
        let x = match self.normalize(x) {
            Some(x) => x,
            None => return 0.0,
        };
        let table = &self.elevations;
        let idx = lower_bound(table, x, |s| s.distance);
        match (idx.checked_sub(1).and_then(|i| table.get(i)), table.get(idx)) {
            (Some(a), Some(b)) => interpolate(x, (a.distance, a.height), (b.distance, b.height)),
            (None, Some(first)) => first.height,
            (Some(last), None) => last.height,
            (None, None) => 0.0,
        }
    }

    /// Applies the cyclic wrap. `None` when the model has no length.
    fn normalize(&self, x: f64) -> Option<f64> {
        let total = self.total_length();
        if total == 0 || x.is_nan() {
            return None;
        }
        if self.options.cyclic {
            let total = total as f64;
            // Tiny negative inputs round up to exactly `total`.
            let wrapped = x.rem_euclid(total);
            Some(if wrapped >= total { 0.0 } else { wrapped })
        } else {
            Some(x)
        }
    }

    /// Grade at a distance already inside `[0, total]`.
    fn locate_slope(&self, x: f64, smooth: bool) -> f64 {
        let last = match self.segments.len().checked_sub(1) {
            Some(last) => last,
            None => return 0.0,
        };
        let start = lower_bound(&self.coords, x, |&c| c as f64).saturating_sub(1);

        for i in start..last {
            let seg = &self.segments[i];
            let end = self.coords[i] as f64;
            if !smooth {
                if x < end {
                    return seg.grade;
                }
                continue;
            }

            let conj = &self.conjugations[i];
            let window_start = end - conj.half_length;
            if x < window_start {
                return seg.grade;
            }
            if x <= end + conj.half_length {
                let sign = if self.segments[i + 1].grade >= seg.grade {
                    1.0
                } else {
                    -1.0
                };
                return seg.grade + conj.ramp_rate() * sign * (x - window_start);
            }
        }
        self.segments[last].grade
    }

    fn sample_elevation(&self) -> ElevationTable {
        let total = self.total_length() as f64;
        let dx = self.options.sample_step;
        let mut table = Vec::with_capacity(((total / dx) as usize).saturating_add(2));
        table.push(ElevationSample {
            distance: 0.0,
            height: 0.0,
        });

        let mut prev = 0.0;
        let mut height = 0.0;
        let mut k = 1u64;
        while prev < total {
            // Multiplying avoids drift from repeated addition of dx.
            let x = (k as f64 * dx).min(total);
            height += 0.001 * self.locate_slope(x, true) * (x - prev);
            table.push(ElevationSample {
                distance: x,
                height,
            });
            prev = x;
            k += 1;
        }
        table
    }
}

impl Default for SlopeModel {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for SlopeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SlopeModel(source='{}', reverse={}, dx={}, length={})",
            self.source.as_deref().unwrap_or("<none>"),
            self.options.reverse,
            self.options.sample_step,
            self.total_length()
        )
    }
}
