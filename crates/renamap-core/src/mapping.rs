use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info, warn};

use crate::{RenameError, Result};

/// Old filename to new filename. Keys are bare filenames, compared
/// case-sensitively, never paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamingMap {
    entries: HashMap<String, String>,
}

impl RenamingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last insert for a given old name wins.
    fn insert(&mut self, old: String, new: String) {
        if let Some(previous) = self.entries.insert(old.clone(), new) {
            debug!("Duplicate mapping for '{}', replacing '{}'", old, previous);
        }
    }
}

impl FromIterator<(String, String)> for RenamingMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = RenamingMap::new();
        for (old, new) in iter {
            map.insert(old, new);
        }
        map
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingFormat {
    Csv,
    Spreadsheet,
}

impl MappingFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(MappingFormat::Csv),
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(MappingFormat::Spreadsheet),
            _ => Err(RenameError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Reads a two-column table (header row first) into a [`RenamingMap`].
///
/// The first two columns are taken positionally as (old name, new name);
/// extra columns are ignored. Rows with an empty old or new cell are skipped.
pub fn load_renaming_map(path: &Path) -> Result<RenamingMap> {
    let format = MappingFormat::from_path(path)?;
    info!("Loading renaming map ({:?}): {:?}", format, path);

    let map = match format {
        MappingFormat::Csv => load_csv(path)?,
        MappingFormat::Spreadsheet => load_spreadsheet(path)?,
    };

    info!("Loaded {} mapping entries", map.len());
    Ok(map)
}

fn load_csv(path: &Path) -> Result<RenamingMap> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let columns = reader.headers()?.len();
    ensure_two_columns(path, columns)?;

    let mut map = RenamingMap::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        match (record.get(0), record.get(1)) {
            (Some(old), Some(new)) if !old.is_empty() && !new.is_empty() => {
                map.insert(old.to_string(), new.to_string());
            }
            _ => warn!("Skipping incomplete mapping row at line {}", line),
        }
    }

    Ok(map)
}

fn load_spreadsheet(path: &Path) -> Result<RenamingMap> {
    let mut workbook = open_workbook_auto(path)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => {
            return Err(RenameError::EmptyWorkbook {
                path: path.to_path_buf(),
            })
        }
    };

    ensure_two_columns(path, range.width())?;

    let mut map = RenamingMap::new();
    // Row 0 is the header.
    for (index, row) in range.rows().enumerate().skip(1) {
        match (cell_text(&row[0]), cell_text(&row[1])) {
            (Some(old), Some(new)) => map.insert(old, new),
            _ => warn!("Skipping incomplete mapping row {}", index + 1),
        }
    }

    Ok(map)
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        other => {
            let text = other.to_string();
            (!text.is_empty()).then_some(text)
        }
    }
}

fn ensure_two_columns(path: &Path, columns: usize) -> Result<()> {
    if columns < 2 {
        return Err(RenameError::TooFewColumns {
            path: PathBuf::from(path),
            columns,
        });
    }
    Ok(())
}
