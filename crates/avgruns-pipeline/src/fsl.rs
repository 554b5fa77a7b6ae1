//! FSL-backed implementations of the external tool traits.
//!
//! `flirt` performs the rigid registration, `fslmerge` the time-axis
//! concatenation, and `fslmaths -Tmean` the averaging. The binaries are
//! resolved through `PATH` unless an explicit executable is configured.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use avgruns_core::{AvgRunsError, Result};

use crate::tools::{AlignParams, RegistrationTool, VolumeTool};

fn run_tool(name: &str, command: &mut Command) -> Result<()> {
    debug!(tool = name, command = ?command, "invoking");
    let output = command.output().map_err(|e| {
        AvgRunsError::external_tool(name, "spawn failed", e.to_string())
    })?;
    if !output.status.success() {
        return Err(AvgRunsError::external_tool(
            name,
            output.status.to_string(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ));
    }
    Ok(())
}

/// FSL FLIRT rigid registration.
#[derive(Debug, Clone)]
pub struct Flirt {
    exe: PathBuf,
}

impl Flirt {
    pub fn new() -> Self {
        Self { exe: "flirt".into() }
    }

    /// Use an explicit executable instead of resolving `flirt` on `PATH`.
    pub fn with_executable(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }
}

impl Default for Flirt {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationTool for Flirt {
    fn align(
        &self,
        reference: &Path,
        floating: &Path,
        out: &Path,
        params: &AlignParams,
    ) -> Result<()> {
        run_tool(
            "flirt",
            Command::new(&self.exe)
                .arg("-in")
                .arg(floating)
                .arg("-ref")
                .arg(reference)
                .arg("-out")
                .arg(out)
                .arg("-dof")
                .arg(params.dof.to_string())
                .arg("-interp")
                .arg(params.interp.as_str()),
        )
    }
}

/// FSL volume utilities (`fslmerge`, `fslmaths`).
#[derive(Debug, Clone)]
pub struct FslVolumes {
    merge_exe: PathBuf,
    maths_exe: PathBuf,
}

impl FslVolumes {
    pub fn new() -> Self {
        Self {
            merge_exe: "fslmerge".into(),
            maths_exe: "fslmaths".into(),
        }
    }
}

impl Default for FslVolumes {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumeTool for FslVolumes {
    fn concat_time(&self, images: &[PathBuf], out: &Path) -> Result<()> {
        let mut command = Command::new(&self.merge_exe);
        command.arg("-t").arg(out);
        for image in images {
            command.arg(image);
        }
        run_tool("fslmerge", &mut command)
    }

    fn mean_time(&self, volume: &Path, out: &Path) -> Result<()> {
        run_tool(
            "fslmaths",
            Command::new(&self.maths_exe)
                .arg(volume)
                .arg("-Tmean")
                .arg(out),
        )
    }
}
