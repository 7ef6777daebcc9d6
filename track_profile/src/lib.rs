//! Core library for the railway track profile model.
//!
//! A track is described by a list of grade segments (per-mille slopes over
//! integer distances) annotated with signals and stations. [`SlopeModel`]
//! turns that list into a queryable profile with smooth vertical curves
//! between segments and an integrated elevation table.

pub mod catalog;
pub mod config;
pub mod conjugation;
pub mod error;
pub mod io;
pub mod profile;
pub mod search;
pub mod slope_model;

pub use catalog::ProfileCatalog;
pub use config::ProfileConfig;
pub use error::{ProfileError, Result};
pub use profile::{GradeSegment, SignalMarker, StationMarker, TrackProfile};
pub use slope_model::{ModelOptions, SlopeModel};
