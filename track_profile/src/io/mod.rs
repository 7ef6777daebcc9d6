//! File input and output helpers for track profiles.

pub mod profile_file;

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

pub use profile_file::{format_profile, parse_profile, read_profile_file, write_profile_file};

/// Reads a file to string.
pub fn read_to_string(path: impl AsRef<Path>) -> io::Result<String> {
    let mut buffer = String::new();
    File::open(path)?.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Writes a string to a file, replacing any existing contents.
pub fn write_string(path: impl AsRef<Path>, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())
}
