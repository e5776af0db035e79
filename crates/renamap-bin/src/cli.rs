use clap::{Parser, Subcommand};
use renamap_core::DEFAULT_FIXTURE_COUNT;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "rename_log.txt";
pub const DEFAULT_FIXTURE_DIR: &str = "test_files";

#[derive(Parser)]
#[command(name = "renamap")]
#[command(version)]
#[command(about = "Batch-rename files in a directory tree from an old-name/new-name table")]
#[command(long_about = "A CLI tool that walks a directory tree and renames every file whose name appears in the first column of a CSV or spreadsheet mapping table to the name in the second column.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE, help = "Append log output to this file")]
    pub log_file: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Rename files according to a mapping table")]
    Rename {
        #[arg(help = "Mapping table (.csv, .xlsx, .xls, .ods) with old and new names in the first two columns")]
        mapping: PathBuf,

        #[arg(help = "Target directory (defaults to current directory)")]
        target: Option<PathBuf>,

        #[arg(long, help = "Perform a dry run without making changes")]
        dry_run: bool,

        #[arg(short, long, help = "Interactive mode - prompt for each rename")]
        interactive: bool,
    },

    #[command(about = "Create randomly named placeholder files for trying out renames")]
    Generate {
        #[arg(default_value = DEFAULT_FIXTURE_DIR, help = "Output directory")]
        output: PathBuf,

        #[arg(short = 'n', long, default_value_t = DEFAULT_FIXTURE_COUNT, help = "Number of files to create")]
        count: usize,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
