//! Explicit run configuration.
//!
//! Everything the orchestrator needs is carried in one struct passed down
//! from the CLI; there is no implicit global state.

use std::path::PathBuf;

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root of the BIDS input dataset.
    pub dataset_root: PathBuf,
    /// Root directory for published outputs and scratch files.
    pub output_root: PathBuf,
    /// Anatomical modality suffix to match and average, e.g. `T2w`.
    pub modality: String,
    /// Allow-list of participant labels; `None` runs all discovered subjects.
    pub participants: Option<Vec<String>>,
    /// Worker threads for parallel dispatch; 0 uses one per core.
    pub jobs: usize,
    /// Retain per-subject scratch directories after publishing.
    pub keep_work: bool,
}

impl RunConfig {
    pub fn new(dataset_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            dataset_root: dataset_root.into(),
            output_root: output_root.into(),
            modality: "T2w".to_string(),
            participants: None,
            jobs: 0,
            keep_work: false,
        }
    }

    /// Set the anatomical modality suffix.
    pub fn with_modality(mut self, modality: impl Into<String>) -> Self {
        self.modality = modality.into();
        self
    }

    /// Restrict the run to the given participant labels.
    pub fn with_participants(mut self, participants: Vec<String>) -> Self {
        self.participants = Some(participants);
        self
    }

    /// Set the worker-thread count (0 = one per core).
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Keep scratch directories after publishing.
    pub fn keep_work(mut self) -> Self {
        self.keep_work = true;
        self
    }

    /// The glob template matching one subject's anatomical scans,
    /// relative to the dataset root.
    pub fn scan_template(&self) -> String {
        format!(
            "sub-{{subject}}/anat/sub-{{subject}}*_{}.nii.gz",
            self.modality
        )
    }

    /// Scratch area for intermediates, one subdirectory per subject.
    pub fn work_root(&self) -> PathBuf {
        self.output_root.join("work")
    }

    /// Scratch directory for one subject.
    pub fn work_dir(&self, subject_dir: &str) -> PathBuf {
        self.work_root().join(subject_dir)
    }

    /// Directory a subject's final output is published into.
    pub fn publish_dir(&self, subject_dir: &str) -> PathBuf {
        self.output_root.join(subject_dir)
    }
}
