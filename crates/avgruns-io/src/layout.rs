//! BIDS dataset layout reading.
//!
//! Subject discovery walks the `sub-*` directories under the dataset root;
//! scan matching expands a `{subject}` path template and glob-matches it.
//! Matches are sorted lexically so that reference selection is
//! deterministic regardless of filesystem enumeration order.

use std::path::PathBuf;

use glob::glob;
use tracing::debug;

use avgruns_core::{AvgRunsError, Result, ScanSet, SubjectId};

/// A read-only view of a BIDS dataset on disk.
#[derive(Debug, Clone)]
pub struct BidsLayout {
    root: PathBuf,
}

impl BidsLayout {
    /// Open a dataset root. Fails when the root is missing or not a
    /// directory; the layout of individual subjects is not validated here.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AvgRunsError::dataset_layout(
                &root,
                "not a readable directory",
            ));
        }
        Ok(Self { root })
    }

    /// Discover all subject ids present in the dataset, sorted and
    /// de-duplicated.
    pub fn subjects(&self) -> Result<Vec<SubjectId>> {
        let entries = std::fs::read_dir(&self.root)
            .map_err(|e| AvgRunsError::io(&self.root, e))?;

        let mut subjects = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AvgRunsError::io(&self.root, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(label) = name.strip_prefix("sub-") {
                subjects.push(SubjectId::new(label));
            }
        }
        subjects.sort();
        subjects.dedup();
        debug!(count = subjects.len(), "discovered subjects");
        Ok(subjects)
    }

    /// Resolve the subjects to run: a caller-supplied allow-list is taken
    /// verbatim (a misspelled label simply matches zero scans downstream),
    /// otherwise all discovered subjects run.
    pub fn resolve_subjects(&self, allow: Option<&[String]>) -> Result<Vec<SubjectId>> {
        match allow {
            Some(labels) => Ok(labels.iter().map(SubjectId::new).collect()),
            None => self.subjects(),
        }
    }

    /// Expand the `{subject}` template for one subject and glob-match scans
    /// under the dataset root. Matches are sorted lexically. Zero matches
    /// is not an error at this stage; it surfaces when the reference is
    /// selected.
    pub fn match_scans(&self, subject: &SubjectId, template: &str) -> Result<ScanSet> {
        let relative = template.replace("{subject}", subject.label());
        let pattern = self.root.join(&relative);
        let pattern = pattern.to_str().ok_or_else(|| {
            AvgRunsError::dataset_layout(&self.root, "dataset root is not valid UTF-8")
        })?;

        let matches = glob(pattern).map_err(|e| {
            AvgRunsError::dataset_layout(&self.root, format!("bad scan template: {e}"))
        })?;

        let mut scans: Vec<PathBuf> = matches.filter_map(std::result::Result::ok).collect();
        scans.sort();
        debug!(subject = %subject, count = scans.len(), "matched scans");
        Ok(ScanSet::new(subject.clone(), scans))
    }
}
