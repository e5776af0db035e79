use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use renamap_core::{load_renaming_map, RenameError, RenameOptions, Renamer};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// mapping.xlsx, first sheet:
///   old        | new               | note
///   123456.pdf | invoice.pdf       | March
///   654321     | x.pdf             |
///   orphan.pdf |                   |
///   123456.pdf | invoice_final.pdf |
#[test]
fn test_load_xlsx() {
    let map = load_renaming_map(&fixture("mapping.xlsx")).unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("123456.pdf"), Some("invoice_final.pdf"));
    assert_eq!(map.get("654321"), Some("x.pdf"));
    assert!(!map.contains("654321.0"));
    assert!(!map.contains("orphan.pdf"));
    assert!(!map.contains("old"));
}

#[test]
fn test_single_column_sheet_rejected() {
    let result = load_renaming_map(&fixture("one_column.xlsx"));

    assert!(matches!(result, Err(RenameError::TooFewColumns { columns: 1, .. })));
}

#[test]
fn test_workbook_without_sheets_rejected() {
    let result = load_renaming_map(&fixture("no_sheets.xlsx"));

    assert!(matches!(result, Err(RenameError::EmptyWorkbook { .. })));
}

#[test]
fn test_xlsx_mapping_drives_renames() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("123456.pdf"), "invoice").unwrap();
    fs::write(tmp.path().join("654321"), "numeric").unwrap();

    let map = load_renaming_map(&fixture("mapping.xlsx")).unwrap();
    let report = Renamer::new(map, RenameOptions::default()).run(tmp.path()).unwrap();

    assert_eq!(report.renamed, 2);
    assert!(report.unmatched.is_empty());
    assert_eq!(fs::read_to_string(tmp.path().join("invoice_final.pdf")).unwrap(), "invoice");
    assert_eq!(fs::read_to_string(tmp.path().join("x.pdf")).unwrap(), "numeric");
}
