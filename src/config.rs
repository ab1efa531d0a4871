//! Asset locations.
//!
//! Datasets live under `data/csv` and pictures under `data/pics`, relative to
//! the working directory, unless re-rooted with `--data-dir`.

use std::path::{Path, PathBuf};

/// Default directory holding CSV datasets.
pub const CSV_BASE: &str = "data/csv";

/// Default directory holding images referenced from `pic`/`pics` columns.
pub const PICS_BASE: &str = "data/pics";

/// Where datasets and pictures are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Base directory for dataset file names.
    pub csv_base: PathBuf,
    /// Base directory for relative picture paths.
    pub pics_base: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            csv_base: PathBuf::from(CSV_BASE),
            pics_base: PathBuf::from(PICS_BASE),
        }
    }
}

impl AssetConfig {
    /// Layout rooted at `dir`: `<dir>/csv` and `<dir>/pics`.
    pub fn rooted_at(dir: &Path) -> Self {
        Self {
            csv_base: dir.join("csv"),
            pics_base: dir.join("pics"),
        }
    }

    /// Resolve a dataset argument.
    ///
    /// An existing file is used as given; anything else is taken as a file
    /// name under `csv_base`.
    pub fn resolve_dataset(&self, name: &str) -> PathBuf {
        let direct = Path::new(name);
        if direct.is_file() {
            direct.to_path_buf()
        } else {
            self.csv_base.join(name)
        }
    }
}
