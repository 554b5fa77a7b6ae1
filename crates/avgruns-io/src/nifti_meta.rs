//! NIfTI header inspection.
//!
//! Only the voxel-grid dimensions are needed here; the image data itself
//! is never touched by this crate, it flows between external tools.

use std::path::{Path, PathBuf};

use nifti::{NiftiObject, ReaderOptions};

use avgruns_core::{AvgRunsError, Result};

/// Read the spatial dimensions (`dim[1..=3]`) of a NIfTI image.
pub fn spatial_dims(path: &Path) -> Result<[u16; 3]> {
    let obj = ReaderOptions::new()
        .read_file(path)
        .map_err(|e| AvgRunsError::NiftiHeader {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    let dim = obj.header().dim;
    Ok([dim[1], dim[2], dim[3]])
}

/// Verify that every image shares the reference's voxel grid, failing with
/// the first offender. Images must be on identical grids before they can
/// be concatenated along the time axis.
pub fn check_same_grid(reference: &Path, images: &[PathBuf]) -> Result<()> {
    let expected = spatial_dims(reference)?;
    for image in images {
        let actual = spatial_dims(image)?;
        if actual != expected {
            return Err(AvgRunsError::DimensionMismatch {
                reference: reference.to_path_buf(),
                image: image.clone(),
                expected,
                actual,
            });
        }
    }
    Ok(())
}
