use std::fs;
use std::path::Path;

use avgruns_io::BidsLayout;
use avgruns_core::{AvgRunsError, SubjectId};

const TEMPLATE: &str = "sub-{subject}/anat/sub-{subject}*_T2w.nii.gz";

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

fn make_dataset(root: &Path) {
    touch(&root.join("sub-02/anat/sub-02_run-01_T2w.nii.gz"));
    touch(&root.join("sub-02/anat/sub-02_run-02_T2w.nii.gz"));
    touch(&root.join("sub-01/anat/sub-01_run-02_T2w.nii.gz"));
    touch(&root.join("sub-01/anat/sub-01_run-01_T2w.nii.gz"));
    // non-subject clutter that discovery must ignore
    touch(&root.join("dataset_description.json"));
    fs::create_dir_all(root.join("derivatives")).unwrap();
}

#[test]
fn open_fails_on_missing_root() {
    let err = BidsLayout::open("/no/such/dataset").unwrap_err();
    assert!(matches!(err, AvgRunsError::DatasetLayout { .. }));
}

#[test]
fn subjects_are_discovered_sorted() {
    let dir = tempfile::tempdir().unwrap();
    make_dataset(dir.path());

    let layout = BidsLayout::open(dir.path()).unwrap();
    let subjects = layout.subjects().unwrap();
    assert_eq!(subjects, vec![SubjectId::new("01"), SubjectId::new("02")]);
}

#[test]
fn allow_list_is_taken_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    make_dataset(dir.path());

    let layout = BidsLayout::open(dir.path()).unwrap();
    let subjects = layout
        .resolve_subjects(Some(&["99".to_string()]))
        .unwrap();
    // silent acceptance: the misspelled subject flows through and will
    // match zero scans downstream
    assert_eq!(subjects, vec![SubjectId::new("99")]);
}

#[test]
fn scans_are_matched_in_lexical_order() {
    let dir = tempfile::tempdir().unwrap();
    make_dataset(dir.path());

    let layout = BidsLayout::open(dir.path()).unwrap();
    let scans = layout
        .match_scans(&SubjectId::new("01"), TEMPLATE)
        .unwrap();
    let names: Vec<_> = scans
        .paths()
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["sub-01_run-01_T2w.nii.gz", "sub-01_run-02_T2w.nii.gz"]
    );
    assert_eq!(
        scans.reference().unwrap().file_name().unwrap().to_str(),
        Some("sub-01_run-01_T2w.nii.gz")
    );
}

#[test]
fn zero_matches_is_not_an_error_at_selection() {
    let dir = tempfile::tempdir().unwrap();
    make_dataset(dir.path());

    let layout = BidsLayout::open(dir.path()).unwrap();
    let scans = layout
        .match_scans(&SubjectId::new("99"), TEMPLATE)
        .unwrap();
    assert!(scans.is_empty());
    // the failure surfaces at the split
    assert!(matches!(
        scans.reference(),
        Err(AvgRunsError::EmptyInput { .. })
    ));
}
