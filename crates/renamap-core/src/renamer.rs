use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::mapping::RenamingMap;
use crate::{RenameError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct RenameOptions {
    pub dry_run: bool,
}

/// Answer from a per-file confirmation hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accept,
    Skip,
    Abort,
}

#[derive(thiserror::Error, Debug)]
pub enum RenameFailure {
    #[error("target already exists")]
    TargetExists,
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// What happened to a single file during a run.
#[derive(Debug)]
pub enum FileOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    WouldRename { from: PathBuf, to: PathBuf },
    AlreadyNamed { path: PathBuf },
    Skipped { from: PathBuf, to: PathBuf },
    Aborted { from: PathBuf },
    Failed { from: PathBuf, to: PathBuf, reason: RenameFailure },
    Unmatched { path: PathBuf, name: String },
}

#[derive(Debug)]
pub struct FailedRename {
    pub from: PathBuf,
    pub to: PathBuf,
    pub reason: RenameFailure,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub renamed: usize,
    pub planned: usize,
    pub skipped: usize,
    pub failures: Vec<FailedRename>,
    /// One entry per unmatched file, so repeated names appear repeatedly.
    pub unmatched: Vec<String>,
    pub aborted: bool,
}

impl RunReport {
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Renamed { .. } => self.renamed += 1,
            FileOutcome::WouldRename { .. } => self.planned += 1,
            FileOutcome::AlreadyNamed { .. } => {}
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Aborted { .. } => self.aborted = true,
            FileOutcome::Failed { from, to, reason } => {
                self.failures.push(FailedRename { from, to, reason })
            }
            FileOutcome::Unmatched { name, .. } => self.unmatched.push(name),
        }
    }
}

pub struct Renamer {
    map: RenamingMap,
    options: RenameOptions,
}

impl Renamer {
    pub fn new(map: RenamingMap, options: RenameOptions) -> Self {
        Self { map, options }
    }

    pub fn run(&self, base: &Path) -> Result<RunReport> {
        self.run_with_confirmation(base, |_, _| Confirmation::Accept)
    }

    /// Walks `base` recursively and renames every file whose name is a key
    /// in the map. `confirm` is asked before each real rename; it is never
    /// consulted in dry-run mode.
    pub fn run_with_confirmation<F>(&self, base: &Path, mut confirm: F) -> Result<RunReport>
    where
        F: FnMut(&Path, &Path) -> Confirmation,
    {
        if !base.exists() {
            return Err(RenameError::MissingDirectory {
                path: base.to_path_buf(),
            });
        }
        if !base.is_dir() {
            return Err(RenameError::NotADirectory {
                path: base.to_path_buf(),
            });
        }

        info!("Starting traversal of: {:?}", base);
        if self.options.dry_run {
            warn!("Dry run mode - no changes will be made");
        }

        // Collect first so renamed files are not picked up again mid-walk.
        let files = collect_files(base)?;
        debug!("Found {} files", files.len());

        let mut report = RunReport::default();
        for path in &files {
            report.record(self.rename_entry(path, &mut confirm));
            if report.aborted {
                break;
            }
        }

        if report.aborted {
            warn!("Run aborted by operator");
        }
        if self.options.dry_run {
            info!("Dry run complete. {} file(s) would be renamed.", report.planned);
        } else {
            info!("Run complete. {} file(s) renamed successfully.", report.renamed);
        }
        if !report.unmatched.is_empty() {
            info!(
                "{} file(s) not renamed because they are not in the mapping.",
                report.unmatched.len()
            );
        }
        if !report.failures.is_empty() {
            warn!("{} rename(s) failed.", report.failures.len());
        }

        Ok(report)
    }

    /// Decides and applies the rename for one file.
    pub fn rename_entry<F>(&self, path: &Path, confirm: &mut F) -> FileOutcome
    where
        F: FnMut(&Path, &Path) -> Confirmation,
    {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => {
                return FileOutcome::Unmatched {
                    path: path.to_path_buf(),
                    name: path.to_string_lossy().into_owned(),
                }
            }
        };

        let Some(new_name) = self.map.get(&name) else {
            warn!("Not found in mapping: {}", name);
            return FileOutcome::Unmatched {
                path: path.to_path_buf(),
                name,
            };
        };

        if new_name == name {
            debug!("Already named as mapped: {:?}", path);
            return FileOutcome::AlreadyNamed {
                path: path.to_path_buf(),
            };
        }

        let from = path.to_path_buf();
        let to = path.with_file_name(new_name);

        if self.options.dry_run {
            info!("[DRY RUN] Found file: {:?} -> would rename to: {:?}", from, to);
            return FileOutcome::WouldRename { from, to };
        }

        match confirm(&from, &to) {
            Confirmation::Accept => {}
            Confirmation::Skip => {
                info!("Skipped: {:?}", from);
                return FileOutcome::Skipped { from, to };
            }
            Confirmation::Abort => return FileOutcome::Aborted { from },
        }

        // fs::rename silently replaces an existing file on Unix. Checked
        // without following symlinks so a dangling link also counts.
        if fs::symlink_metadata(&to).is_ok() {
            error!("Error renaming {:?}: {:?} already exists", from, to);
            return FileOutcome::Failed {
                from,
                to,
                reason: RenameFailure::TargetExists,
            };
        }

        match fs::rename(&from, &to) {
            Ok(()) => {
                info!("Renamed: {:?} -> {:?}", from, to);
                FileOutcome::Renamed { from, to }
            }
            Err(err) => {
                error!("Error renaming {:?}: {}", from, err);
                FileOutcome::Failed {
                    from,
                    to,
                    reason: err.into(),
                }
            }
        }
    }
}

fn collect_files(base: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(base) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
