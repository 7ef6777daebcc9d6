//! Named track profiles and where their files live.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Profiles shipped with the toolkit, as `(name, file name)`.
pub const STANDARD_PROFILES: &[(&str, &str)] = &[
    ("MSK_BOLOGOE", "msk_bologoe.txt"),
    ("BOLOGOE_OSTASHKOV", "bologoe_ostashkov.txt"),
    ("slope1", "ex1.txt"),
    ("slope2", "ex2.txt"),
    ("slope3", "ex3.txt"),
    ("slope4", "ex4.txt"),
    ("slope5", "ex5.txt"),
    ("slope6", "ex6.txt"),
    ("slope7", "ex7.txt"),
];

/// Mapping from profile names to files.
///
/// Selectors that are not registered are treated as file paths.
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    entries: BTreeMap<String, PathBuf>,
}

impl ProfileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalogue of [`STANDARD_PROFILES`] located under `data_dir`.
    pub fn standard(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let mut catalog = Self::new();
        for (name, file) in STANDARD_PROFILES {
            catalog.register(*name, data_dir.join(file));
        }
        catalog
    }

    pub fn register(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.entries.insert(name.into(), path.into());
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    pub fn resolve(&self, selector: &str) -> PathBuf {
        match self.get(selector) {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(selector),
        }
    }

    /// Registered names in sorted order.
    pub fn available(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}
