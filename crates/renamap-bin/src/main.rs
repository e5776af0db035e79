mod cli;
mod logging;
mod prompt;

use anyhow::{Context, Result};
use cli::{Cli, Commands};
use renamap_core::{RenameOptions, Renamer, RunReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let dispatch = match logging::build_dispatch(&cli.log_file, cli.verbose, cli.quiet) {
        Ok(dispatch) => dispatch,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    tracing::dispatcher::with_default(&dispatch, || {
        info!("Logging started (file + console)");
        exit_code(run(cli))
    })
}

/// Fatal errors reach the operator through the console log layer only.
fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Critical error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Rename {
            mapping,
            target,
            dry_run,
            interactive,
        } => handle_rename_command(mapping, target, dry_run, interactive),
        Commands::Generate { output, count } => handle_generate_command(output, count),
    }
}

fn handle_rename_command(
    mapping: PathBuf,
    target: Option<PathBuf>,
    dry_run: bool,
    interactive: bool,
) -> Result<()> {
    let target_dir = match target {
        Some(target) => target,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    info!("Mapping file: {:?}", mapping);
    info!("Target directory: {:?}", target_dir);
    info!("Interactive mode: {}", interactive);

    if dry_run && interactive {
        warn!("Interactive mode has no effect during a dry run");
    }

    let map = renamap_core::load_renaming_map(&mapping)
        .with_context(|| format!("Failed to load renaming map {:?}", mapping))?;

    let renamer = Renamer::new(map, RenameOptions { dry_run });
    let report = if interactive {
        renamer.run_with_confirmation(&target_dir, prompt::show_rename_and_confirm)
    } else {
        renamer.run(&target_dir)
    }
    .with_context(|| format!("Failed to rename files in {:?}", target_dir))?;

    print_summary(&report, dry_run);

    Ok(())
}

fn print_summary(report: &RunReport, dry_run: bool) {
    if dry_run {
        println!("Dry run complete!");
        println!("  Would rename: {}", report.planned);
    } else {
        println!("Renaming complete!");
        println!("  Renamed: {}", report.renamed);
    }
    println!("  Not in mapping: {}", report.unmatched.len());
    if report.skipped > 0 {
        println!("  Skipped: {}", report.skipped);
    }
    if !report.failures.is_empty() {
        println!("  Failed: {}", report.failures.len());
        for failure in &report.failures {
            println!("    {} -> {}: {}", failure.from.display(), failure.to.display(), failure.reason);
        }
    }
    if report.aborted {
        println!("  Aborted before all files were processed");
    }
}

fn handle_generate_command(output: PathBuf, count: usize) -> Result<()> {
    info!("Generating {} test files in {:?}", count, output);

    let written = renamap_core::generate_fixtures(&output, count)
        .with_context(|| format!("Failed to generate test files in {:?}", output))?;

    println!("{} test files were created in: {}", written.len(), output.display());

    Ok(())
}
