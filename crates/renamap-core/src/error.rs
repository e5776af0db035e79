use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum RenameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("Mapping file {path:?} must contain at least two columns (old, new), found {columns}")]
    TooFewColumns { path: PathBuf, columns: usize },
    #[error("Unsupported mapping file format: {path:?} (expected .csv or a spreadsheet)")]
    UnsupportedFormat { path: PathBuf },
    #[error("Spreadsheet {path:?} contains no worksheets")]
    EmptyWorkbook { path: PathBuf },
    #[error("Target directory does not exist: {path:?}")]
    MissingDirectory { path: PathBuf },
    #[error("Target must be a directory: {path:?}")]
    NotADirectory { path: PathBuf },
    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),
}
