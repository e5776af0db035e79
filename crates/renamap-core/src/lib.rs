//! Batch renaming of files in a directory tree, driven by an old-name to
//! new-name table.

pub mod error;
pub mod fixtures;
pub mod mapping;
pub mod renamer;

pub use error::RenameError;
pub use fixtures::{
    generate_fixtures, generate_fixtures_with_rng, DEFAULT_FIXTURE_COUNT, FIXTURE_EXTENSIONS,
    PLACEHOLDER_TEXT,
};
pub use mapping::{load_renaming_map, MappingFormat, RenamingMap};
pub use renamer::{
    Confirmation, FailedRename, FileOutcome, RenameFailure, RenameOptions, Renamer, RunReport,
};

pub type Result<T> = std::result::Result<T, RenameError>;
