//! Per-run outcome reporting.
//!
//! The run never aborts on a single subject's failure; every subject ends
//! in one of these outcomes and the summary is reported at the end.

use std::path::PathBuf;

use tracing::{error, info};

use avgruns_core::{AvgRunsError, Stage, SubjectId};

/// Terminal state of one subject's pipeline.
#[derive(Debug)]
pub enum Outcome {
    /// The averaged image was written.
    Published { output: PathBuf },
    /// The existing output was newer than every input; nothing ran.
    Skipped { output: PathBuf },
    /// The pipeline failed at `stage`; no output was written.
    Failed { stage: Stage, error: AvgRunsError },
}

/// One subject's terminal state.
#[derive(Debug)]
pub struct SubjectReport {
    pub subject: SubjectId,
    pub outcome: Outcome,
}

/// Success/failure summary for a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<SubjectReport>,
}

impl RunSummary {
    pub fn new(reports: Vec<SubjectReport>) -> Self {
        Self { reports }
    }

    pub fn published(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Published { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    /// True when subjects ran and none succeeded or was fresh.
    pub fn all_failed(&self) -> bool {
        !self.reports.is_empty() && self.failed() == self.reports.len()
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }

    /// Log one line per subject plus the totals.
    pub fn log(&self) {
        for report in &self.reports {
            match &report.outcome {
                Outcome::Published { output } => {
                    info!(subject = %report.subject, output = %output.display(), "published");
                }
                Outcome::Skipped { output } => {
                    info!(subject = %report.subject, output = %output.display(), "up to date, skipped");
                }
                Outcome::Failed { stage, error } => {
                    error!(subject = %report.subject, stage = %stage, %error, "failed");
                }
            }
        }
        info!(
            published = self.published(),
            skipped = self.skipped(),
            failed = self.failed(),
            "run complete"
        );
    }
}
