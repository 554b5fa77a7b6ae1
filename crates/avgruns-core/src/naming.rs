//! Output filename derivation.
//!
//! The published filename is derived from the reference scan's name by an
//! ordered list of substitutions: the `_run-<NN>_` token collapses to a
//! single underscore, then the modality suffix gains a `_proc-avg_` infix.
//! `sub-01_run-01_T2w.nii.gz` becomes `sub-01_proc-avg_T2w.nii.gz`.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AvgRunsError, Result};

static RUN_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_run-\d+_").unwrap());

/// Derive the published filename for an averaged image from the reference
/// scan it was built around.
pub fn averaged_name(reference: &Path, modality: &str) -> Result<String> {
    let name = reference
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            AvgRunsError::InvalidConfiguration(format!(
                "scan filename is not valid UTF-8: {}",
                reference.display()
            ))
        })?;

    let name = RUN_TOKEN.replace_all(name, "_");

    let suffix = format!("_{modality}.nii.gz");
    if let Some(stem) = name.strip_suffix(&suffix) {
        return Ok(format!("{stem}_proc-avg_{modality}.nii.gz"));
    }
    // Scan matched the template but carries an unexpected suffix; fall back
    // to appending the semantic suffix before the extension.
    let stem = name
        .strip_suffix(".nii.gz")
        .or_else(|| name.strip_suffix(".nii"))
        .unwrap_or(name.as_ref());
    Ok(format!("{stem}_proc-avg_{modality}.nii.gz"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    #[test]
    fn run_token_is_removed() {
        let name = averaged_name(Path::new("sub-01_run-01_T2w.nii.gz"), "T2w").unwrap();
        assert_eq!(name, "sub-01_proc-avg_T2w.nii.gz");
    }

    #[test]
    fn run_token_width_does_not_matter() {
        let name = averaged_name(Path::new("sub-01_run-1234_T2w.nii.gz"), "T2w").unwrap();
        assert_eq!(name, "sub-01_proc-avg_T2w.nii.gz");
    }

    #[test]
    fn name_without_run_token_gains_infix_only() {
        let name = averaged_name(Path::new("sub-01_T2w.nii.gz"), "T2w").unwrap();
        assert_eq!(name, "sub-01_proc-avg_T2w.nii.gz");
    }

    #[test]
    fn other_modalities_are_respected() {
        let name = averaged_name(Path::new("sub-07_run-02_T1w.nii.gz"), "T1w").unwrap();
        assert_eq!(name, "sub-07_proc-avg_T1w.nii.gz");
    }

    #[test]
    fn directory_components_are_ignored() {
        let path = PathBuf::from("bids/sub-01/anat/sub-01_run-01_T2w.nii.gz");
        let name = averaged_name(&path, "T2w").unwrap();
        assert_eq!(name, "sub-01_proc-avg_T2w.nii.gz");
    }

    proptest! {
        #[test]
        fn derived_name_never_contains_a_run_token(run in 0u32..100_000) {
            let input = format!("sub-01_run-{run:02}_T2w.nii.gz");
            let name = averaged_name(Path::new(&input), "T2w").unwrap();
            prop_assert!(!name.contains("_run-"));
            prop_assert!(name.ends_with("_proc-avg_T2w.nii.gz"));
        }
    }
}
