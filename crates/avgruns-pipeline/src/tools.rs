//! External tool interfaces.
//!
//! Registration and volume arithmetic are owned by external binaries;
//! these traits are the seam between the pipeline and those tools, and the
//! seam the tests mock.

use std::path::{Path, PathBuf};

use avgruns_core::Result;

/// Interpolation kernel used when resampling a floating image onto the
/// reference grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interp {
    /// High-fidelity sinc kernel, the pipeline default.
    Sinc,
    Trilinear,
    NearestNeighbour,
}

impl Interp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interp::Sinc => "sinc",
            Interp::Trilinear => "trilinear",
            Interp::NearestNeighbour => "nearestneighbour",
        }
    }
}

/// Parameters for one registration.
#[derive(Debug, Clone)]
pub struct AlignParams {
    /// Degrees of freedom of the transform; 6 = rigid body.
    pub dof: u32,
    pub interp: Interp,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            dof: 6,
            interp: Interp::Sinc,
        }
    }
}

/// Computes a spatial transform aligning a floating image to a reference
/// and resamples it, writing one output image per input.
pub trait RegistrationTool: Sync {
    fn align(
        &self,
        reference: &Path,
        floating: &Path,
        out: &Path,
        params: &AlignParams,
    ) -> Result<()>;
}

/// Stacks co-registered images along the time axis and reduces such a
/// stack to its voxelwise mean.
pub trait VolumeTool: Sync {
    /// Concatenate `images` (in order) along a new trailing time axis.
    fn concat_time(&self, images: &[PathBuf], out: &Path) -> Result<()>;

    /// Compute the voxelwise mean of a 4-D volume along its time axis.
    fn mean_time(&self, volume: &Path, out: &Path) -> Result<()>;
}
