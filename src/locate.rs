use crate::error::{Result, VizError};
use crate::model::ContributorSnapshot;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub const FULL_PREFIX: &str = "contributors-";
pub const SUMMARY_PREFIX: &str = "contributors-summary-";
pub const DATA_SUFFIX: &str = ".json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Full,
    Summary,
}

impl DataKind {
    /// Classify a file name. The summary prefix extends the full prefix, so
    /// it has to be checked first.
    pub fn classify(file_name: &str) -> Option<Self> {
        if !file_name.ends_with(DATA_SUFFIX) {
            return None;
        }
        if file_name.starts_with(SUMMARY_PREFIX) {
            Some(DataKind::Summary)
        } else if file_name.starts_with(FULL_PREFIX) {
            Some(DataKind::Full)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataFile {
    pub path: PathBuf,
    pub kind: DataKind,
    pub modified: SystemTime,
}

impl DataFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Pick the newest full data file in `dir`, falling back to the newest
/// summary file. Equal timestamps resolve to the greatest file name.
pub fn find_latest(dir: &Path) -> Result<DataFile> {
    let mut full: Option<DataFile> = None;
    let mut summary: Option<DataFile> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        let Some(kind) = DataKind::classify(&name) else {
            continue;
        };
        // follows symlinks; dangling links are skipped
        let Ok(meta) = fs::metadata(entry.path()) else {
            continue;
        };
        if !meta.is_file() {
            continue;
        }
        let candidate = DataFile {
            path: entry.path(),
            kind,
            modified: meta.modified()?,
        };
        let slot = match kind {
            DataKind::Full => &mut full,
            DataKind::Summary => &mut summary,
        };
        if slot.as_ref().map_or(true, |best| is_newer(&candidate, best)) {
            *slot = Some(candidate);
        }
    }

    full.or(summary)
        .ok_or_else(|| VizError::DataNotFound(dir.to_path_buf()))
}

fn is_newer(candidate: &DataFile, best: &DataFile) -> bool {
    (candidate.modified, candidate.path.file_name()) > (best.modified, best.path.file_name())
}

pub fn load_snapshot(path: &Path) -> Result<ContributorSnapshot> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| VizError::DataParse {
        path: path.to_path_buf(),
        source,
    })
}
