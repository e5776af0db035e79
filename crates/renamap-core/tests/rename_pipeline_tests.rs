use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

use renamap_core::{
    generate_fixtures_with_rng, load_renaming_map, RenameError, RenameOptions, Renamer,
};

fn snapshot(dir: &Path) -> Vec<(PathBuf, String)> {
    let mut entries = Vec::new();
    collect(dir, dir, &mut entries);
    entries.sort();
    entries
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    for entry in fs::read_dir(dir).unwrap().flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, out);
        } else {
            let contents = fs::read_to_string(&path).unwrap();
            out.push((path.strip_prefix(root).unwrap().to_path_buf(), contents));
        }
    }
}

/// Layout:
///   root/
///     123456.pdf
///     999999.jpg
///     invoices/
///       123456.pdf
///       222222.docx
fn create_test_tree(root: &Path) {
    let invoices = root.join("invoices");
    fs::create_dir_all(&invoices).unwrap();
    fs::write(root.join("123456.pdf"), "top invoice").unwrap();
    fs::write(root.join("999999.jpg"), "photo").unwrap();
    fs::write(invoices.join("123456.pdf"), "nested invoice").unwrap();
    fs::write(invoices.join("222222.docx"), "letter").unwrap();
}

fn write_mapping(dir: &Path) -> PathBuf {
    let path = dir.join("rename.csv");
    fs::write(
        &path,
        "old,new,note\n123456.pdf,invoice_final.pdf,q1\n222222.docx,letter.docx,\n",
    )
    .unwrap();
    path
}

#[test]
fn test_full_rename_pipeline() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("docs");
    create_test_tree(&root);
    let mapping = write_mapping(tmp.path());

    let map = load_renaming_map(&mapping).unwrap();
    let report = Renamer::new(map, RenameOptions::default()).run(&root).unwrap();

    assert_eq!(report.renamed, 3);
    assert!(report.failures.is_empty());
    assert_eq!(report.unmatched, vec!["999999.jpg".to_string()]);

    let after = snapshot(&root);
    let expected = vec![
        (PathBuf::from("999999.jpg"), "photo".to_string()),
        (PathBuf::from("invoice_final.pdf"), "top invoice".to_string()),
        (PathBuf::from("invoices/invoice_final.pdf"), "nested invoice".to_string()),
        (PathBuf::from("invoices/letter.docx"), "letter".to_string()),
    ];
    assert_eq!(after, expected);
}

#[test]
fn test_dry_run_pipeline_changes_nothing() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("docs");
    create_test_tree(&root);
    let mapping = write_mapping(tmp.path());
    let before = snapshot(&root);

    let map = load_renaming_map(&mapping).unwrap();
    let report = Renamer::new(map, RenameOptions { dry_run: true })
        .run(&root)
        .unwrap();

    assert_eq!(report.renamed, 0);
    assert_eq!(report.planned, 3);
    assert_eq!(report.unmatched.len(), 1);
    assert_eq!(snapshot(&root), before);
}

#[test]
fn test_single_column_mapping_stops_before_traversal() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("docs");
    create_test_tree(&root);
    let before = snapshot(&root);
    let mapping = tmp.path().join("rename.csv");
    fs::write(&mapping, "old\n123456.pdf\n").unwrap();

    let result = load_renaming_map(&mapping);

    assert!(matches!(result, Err(RenameError::TooFewColumns { columns: 1, .. })));
    assert_eq!(snapshot(&root), before);
}

#[test]
fn test_generated_fixtures_can_be_renamed() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("fixtures");
    let mut rng = StdRng::seed_from_u64(2024);
    let written = generate_fixtures_with_rng(&root, 20, &mut rng).unwrap();

    let first = written[0].file_name().unwrap().to_str().unwrap().to_string();
    let mapping = tmp.path().join("rename.csv");
    fs::write(&mapping, format!("old,new\n{},renamed_fixture.pdf\n", first)).unwrap();

    let file_count = snapshot(&root).len();
    let map = load_renaming_map(&mapping).unwrap();
    let report = Renamer::new(map, RenameOptions::default()).run(&root).unwrap();

    assert_eq!(report.renamed, 1);
    assert_eq!(report.unmatched.len(), file_count - 1);
    assert!(root.join("renamed_fixture.pdf").exists());
    assert!(!root.join(&first).exists());
}
