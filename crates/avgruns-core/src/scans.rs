//! Scan collections and the reference/floating split.
//!
//! The first scan of a subject's set is the registration reference; every
//! other scan is a floating image aligned to it. The split is pure and
//! order-preserving so that downstream reassembly is deterministic.

use std::path::{Path, PathBuf};

use crate::error::{AvgRunsError, Result};
use crate::subject::SubjectId;

/// The ordered scans matched for one subject.
#[derive(Debug, Clone)]
pub struct ScanSet {
    subject: SubjectId,
    scans: Vec<PathBuf>,
}

impl ScanSet {
    /// Build a scan set. The caller's ordering is preserved; reference
    /// selection depends on it, so callers should hand in a sorted list.
    pub fn new(subject: SubjectId, scans: Vec<PathBuf>) -> Self {
        Self { subject, scans }
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn len(&self) -> usize {
        self.scans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    /// All matched scans in order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.scans
    }

    /// The registration reference: the first scan in the set.
    pub fn reference(&self) -> Result<&Path> {
        self.scans
            .first()
            .map(PathBuf::as_path)
            .ok_or_else(|| AvgRunsError::empty_input(self.subject.label()))
    }

    /// Every scan after the first. Empty when the subject has a single
    /// scan, in which case no registration is performed.
    pub fn floating(&self) -> &[PathBuf] {
        if self.scans.len() > 1 {
            &self.scans[1..]
        } else {
            &[]
        }
    }
}
