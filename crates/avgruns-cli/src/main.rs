use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use avgruns_core::RunConfig;
use avgruns_pipeline::{Flirt, FslVolumes, Pipeline};

#[derive(Parser)]
#[command(name = "avgruns")]
#[command(about = "Average repeated anatomical runs in a BIDS dataset into one denoised image")]
struct Cli {
    /// Directory with the input dataset, formatted according to the BIDS
    /// standard
    bids_dir: PathBuf,

    /// Directory where output files are stored
    output_dir: PathBuf,

    /// Level of the analysis to perform
    #[arg(value_enum)]
    analysis_level: AnalysisLevel,

    /// Labels of the participants to analyze, without the "sub-" prefix.
    /// All subjects in the dataset are analyzed when omitted
    #[arg(long = "participant_label", num_args = 1..)]
    participant_label: Option<Vec<String>>,

    /// Anatomical modality suffix to match and average
    #[arg(long, default_value = "T2w")]
    modality: String,

    /// Worker threads (0 = one per core)
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,

    /// Keep per-subject scratch directories under <output_dir>/work
    #[arg(long)]
    keep_work: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AnalysisLevel {
    Participant,
    Group,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    if cli.analysis_level == AnalysisLevel::Group {
        bail!("group-level analysis is not implemented; run the participant level");
    }

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating output directory {}", cli.output_dir.display()))?;
    let bids_dir = cli
        .bids_dir
        .canonicalize()
        .with_context(|| format!("resolving dataset root {}", cli.bids_dir.display()))?;
    let output_dir = cli
        .output_dir
        .canonicalize()
        .with_context(|| format!("resolving output root {}", cli.output_dir.display()))?;

    let mut config = RunConfig::new(bids_dir, output_dir)
        .with_modality(cli.modality)
        .with_jobs(cli.jobs);
    if let Some(labels) = cli.participant_label {
        config = config.with_participants(labels);
    }
    if cli.keep_work {
        config = config.keep_work();
    }

    let flirt = Flirt::new();
    let volumes = FslVolumes::new();
    let summary = Pipeline::new(&config, &flirt, &volumes).run()?;
    summary.log();

    if summary.all_failed() {
        bail!("all {} selected subjects failed", summary.reports.len());
    }
    info!("done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_bids_app_surface() {
        let cli = Cli::try_parse_from([
            "avgruns",
            "bids",
            "out",
            "participant",
            "--participant_label",
            "01",
            "02",
            "--jobs",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.analysis_level, AnalysisLevel::Participant);
        assert_eq!(
            cli.participant_label,
            Some(vec!["01".to_string(), "02".to_string()])
        );
        assert_eq!(cli.jobs, 4);
        assert_eq!(cli.modality, "T2w");
    }

    #[test]
    fn group_level_parses_but_is_rejected_as_unimplemented() {
        let cli = Cli::try_parse_from(["avgruns", "bids", "out", "group"]).unwrap();
        assert_eq!(cli.analysis_level, AnalysisLevel::Group);

        let err = run(cli).unwrap_err();
        assert!(
            err.to_string().contains("not implemented"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(Cli::try_parse_from(["avgruns", "bids", "out", "session"]).is_err());
    }
}
