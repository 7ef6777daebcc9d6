//! Reader and writer for the line-oriented track profile format.
//!
//! Section sentinels are recognised at the start of a trimmed line.
//!
//! ```text
//! <length> <grade>              one grade segment per line
//! semaphores[:N]                N = 4 selects four-digit block codes
//! <coord> <name>                one signal per line
//! stations:
//! <coord> <length> <name...>    station name runs to the end of the line
//! ```

use std::io::ErrorKind;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use crate::error::{ProfileError, Result};
use crate::profile::{GradeSegment, SignalMarker, StationMarker, TrackProfile};

const SIGNALS_SENTINEL: &str = "semaphores";
const STATIONS_SENTINEL: &str = "stations";
const FOUR_DIGIT_MARKER: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Segments,
    Signals,
    Stations,
}

/// Parses the text of a profile file.
///
/// Blank lines are ignored. Any malformed numeric field aborts the parse.
pub fn parse_profile(text: &str) -> Result<TrackProfile> {
    let mut profile = TrackProfile::default();
    let mut section = Section::Segments;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match section {
            Section::Segments => {
                if line.starts_with(SIGNALS_SENTINEL) {
                    profile.four_digit_blocking = parse_block_marker(line, line_no)?;
                    section = Section::Signals;
                } else {
                    profile.segments.push(parse_segment(line, line_no)?);
                }
            }
            Section::Signals => {
                if line.starts_with(STATIONS_SENTINEL) {
                    section = Section::Stations;
                } else {
                    profile.signals.push(parse_signal(line, line_no)?);
                }
            }
            Section::Stations => profile.stations.push(parse_station(line, line_no)?),
        }
    }

    log::debug!(
        "parsed {} segments, {} signals, {} stations",
        profile.segments.len(),
        profile.signals.len(),
        profile.stations.len()
    );
    Ok(profile)
}

/// Reads and parses a profile file.
///
/// Returns `Ok(None)` when the file does not exist so the caller can fall
/// back to an empty model.
pub fn read_profile_file(path: impl AsRef<Path>) -> Result<Option<TrackProfile>> {
    let path = path.as_ref();
    match crate::io::read_to_string(path) {
        Ok(text) => parse_profile(&text).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("profile file {} not found", path.display());
            Ok(None)
        }
        Err(e) => Err(ProfileError::io(path, e)),
    }
}

/// Serialises a profile back into the text format.
pub fn format_profile(profile: &TrackProfile) -> String {
    let mut out = String::new();
    for seg in &profile.segments {
        out.push_str(&format!("{} {}\n", seg.length, seg.grade));
    }
    if profile.four_digit_blocking {
        out.push_str(&format!("{SIGNALS_SENTINEL}:{FOUR_DIGIT_MARKER}\n"));
    } else {
        out.push_str(&format!("{SIGNALS_SENTINEL}:\n"));
    }
    for signal in &profile.signals {
        out.push_str(&format!("{} {}\n", signal.coord, signal.name));
    }
    out.push_str(&format!("{STATIONS_SENTINEL}:\n"));
    for station in &profile.stations {
        out.push_str(&format!(
            "{} {} {}\n",
            station.coord, station.length, station.name
        ));
    }
    out
}

pub fn write_profile_file(path: impl AsRef<Path>, profile: &TrackProfile) -> Result<()> {
    let path = path.as_ref();
    crate::io::write_string(path, &format_profile(profile)).map_err(|e| ProfileError::io(path, e))
}

fn parse_block_marker(line: &str, line_no: usize) -> Result<bool> {
    let marker = match line.split_once(':') {
        Some((_, marker)) => marker.trim(),
        None => return Ok(false),
    };
    if marker.is_empty() {
        return Ok(false);
    }
    let value: u32 = marker
        .parse()
        .map_err(|_| ProfileError::invalid_number(line_no, "block marker", marker))?;
    Ok(value == FOUR_DIGIT_MARKER)
}

fn parse_segment(line: &str, line_no: usize) -> Result<GradeSegment> {
    let mut fields = line.split_whitespace();
    let length: u64 = next_number(&mut fields, line_no, "segment length")?;
    if length == 0 {
        return Err(ProfileError::ZeroLengthSegment { line: line_no });
    }
    let grade: f64 = next_number(&mut fields, line_no, "grade")?;
    if !grade.is_finite() {
        return Err(ProfileError::invalid_number(line_no, "grade", &grade.to_string()));
    }
    Ok(GradeSegment { length, grade })
}

fn parse_signal(line: &str, line_no: usize) -> Result<SignalMarker> {
    let mut fields = line.split_whitespace();
    let coord = next_number(&mut fields, line_no, "signal coordinate")?;
    let name = fields.next().ok_or(ProfileError::MissingField {
        line: line_no,
        field: "signal name",
    })?;
    Ok(SignalMarker {
        coord,
        name: name.to_string(),
    })
}

fn parse_station(line: &str, line_no: usize) -> Result<StationMarker> {
    let mut fields = line.split_whitespace();
    let coord = next_number(&mut fields, line_no, "station coordinate")?;
    let length = next_number(&mut fields, line_no, "station length")?;
    let name = fields.collect::<Vec<_>>().join(" ");
    Ok(StationMarker {
        coord,
        length,
        name,
    })
}

fn next_number<T: FromStr>(
    fields: &mut SplitWhitespace<'_>,
    line_no: usize,
    field: &'static str,
) -> Result<T> {
    let raw = fields.next().ok_or(ProfileError::MissingField {
        line: line_no,
        field,
    })?;
    raw.parse()
        .map_err(|_| ProfileError::invalid_number(line_no, field, raw))
}
