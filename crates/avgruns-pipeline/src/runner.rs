//! The per-subject pipeline and the parallel run loop.
//!
//! Subjects are independent and run as a rayon parallel map; a failure in
//! one subject is recorded in its report and never aborts the others.
//! Within a subject, the registrations of its floating images are a second
//! data-parallel map whose output order matches input order.

use std::fs;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use avgruns_core::{naming, AvgRunsError, Result, RunConfig, Stage, SubjectId};
use avgruns_io::{check_same_grid, is_fresh, publish, BidsLayout};

use crate::graph;
use crate::report::{Outcome, RunSummary, SubjectReport};
use crate::tools::{AlignParams, RegistrationTool, VolumeTool};

type StageResult<T> = std::result::Result<T, (Stage, AvgRunsError)>;

/// The averaging pipeline for one run.
pub struct Pipeline<'a> {
    config: &'a RunConfig,
    registration: &'a dyn RegistrationTool,
    volumes: &'a dyn VolumeTool,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a RunConfig,
        registration: &'a dyn RegistrationTool,
        volumes: &'a dyn VolumeTool,
    ) -> Self {
        Self {
            config,
            registration,
            volumes,
        }
    }

    /// Run the pipeline over every resolved subject and return the
    /// per-subject summary. Only dataset-level problems abort the run.
    pub fn run(&self) -> Result<RunSummary> {
        let layout = BidsLayout::open(&self.config.dataset_root)?;
        let subjects = layout.resolve_subjects(self.config.participants.as_deref())?;
        check_output_uniqueness(self.config, &subjects)?;

        let work_root = self.config.work_root();
        fs::create_dir_all(&work_root).map_err(|e| AvgRunsError::io(&work_root, e))?;
        graph::write_graph(&work_root.join("pipeline.dot"))?;

        info!(
            subjects = subjects.len(),
            jobs = self.config.jobs,
            modality = %self.config.modality,
            "starting run"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
            .map_err(|e| AvgRunsError::InvalidConfiguration(format!("thread pool: {e}")))?;

        let reports = pool.install(|| {
            subjects
                .par_iter()
                .map(|subject| SubjectReport {
                    subject: subject.clone(),
                    outcome: self.run_subject(&layout, subject),
                })
                .collect()
        });

        Ok(RunSummary::new(reports))
    }

    fn run_subject(&self, layout: &BidsLayout, subject: &SubjectId) -> Outcome {
        match self.try_subject(layout, subject) {
            Ok(outcome) => outcome,
            Err((stage, error)) => Outcome::Failed { stage, error },
        }
    }

    fn try_subject(&self, layout: &BidsLayout, subject: &SubjectId) -> StageResult<Outcome> {
        // select
        let scans = layout
            .match_scans(subject, &self.config.scan_template())
            .map_err(|e| (Stage::Select, e))?;

        // split
        let reference = scans.reference().map_err(|e| (Stage::Split, e))?;
        let floating = scans.floating();
        debug!(subject = %subject, scans = scans.len(), "split");

        let name = naming::averaged_name(reference, &self.config.modality)
            .map_err(|e| (Stage::Publish, e))?;
        let output = self.config.publish_dir(&subject.dir_name()).join(name);

        if is_fresh(&output, scans.paths()) {
            return Ok(Outcome::Skipped { output });
        }

        // a single scan passes through untouched: nothing to register,
        // nothing to average
        if floating.is_empty() {
            publish(reference, &output).map_err(|e| (Stage::Publish, e))?;
            return Ok(Outcome::Published { output });
        }

        let work_dir = self.config.work_dir(&subject.dir_name());
        fs::create_dir_all(&work_dir)
            .map_err(|e| (Stage::Register, AvgRunsError::io(&work_dir, e)))?;

        // register: data-parallel over floating images, index-stable output
        let params = AlignParams::default();
        let aligned: Vec<PathBuf> = floating
            .par_iter()
            .enumerate()
            .map(|(i, image)| {
                let out = work_dir.join(format!("aligned-{i:02}.nii.gz"));
                self.registration
                    .align(reference, image, &out, &params)
                    .map(|_| out)
            })
            .collect::<Result<_>>()
            .map_err(|e| (Stage::Register, e))?;

        // assemble: reference first, aligned images in input order
        let mut stack = Vec::with_capacity(1 + aligned.len());
        stack.push(reference.to_path_buf());
        stack.extend(aligned);

        check_same_grid(reference, &stack[1..]).map_err(|e| (Stage::Assemble, e))?;
        let merged = work_dir.join("merged.nii.gz");
        self.volumes
            .concat_time(&stack, &merged)
            .map_err(|e| (Stage::Assemble, e))?;

        // average
        let averaged = work_dir.join("merged_mean.nii.gz");
        self.volumes
            .mean_time(&merged, &averaged)
            .map_err(|e| (Stage::Average, e))?;

        // publish
        publish(&averaged, &output).map_err(|e| (Stage::Publish, e))?;

        if !self.config.keep_work {
            if let Err(e) = fs::remove_dir_all(&work_dir) {
                warn!(subject = %subject, error = %e, "could not remove scratch directory");
            }
        }

        Ok(Outcome::Published { output })
    }
}

/// Output paths are derived solely from subject labels, so uniqueness
/// reduces to the resolved subject list holding no duplicates.
fn check_output_uniqueness(config: &RunConfig, subjects: &[SubjectId]) -> Result<()> {
    let mut sorted = subjects.to_vec();
    sorted.sort();
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            return Err(AvgRunsError::OutputCollision {
                path: config.publish_dir(&pair[0].dir_name()),
                first: pair[0].label().to_string(),
                second: pair[1].label().to_string(),
            });
        }
    }
    Ok(())
}
