use std::fs;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgMatches, Command};

const BIN: &str = "renamap";
const DEMO_DIR: &str = "target/xtask-demo";
const DEMO_FILE_COUNT: &str = "12";

/// Cargo invocations run by `test all`, in order. The demo runs after them.
const TEST_STAGES: &[(&str, &[&str])] = &[
    ("workspace", &["test", "--workspace"]),
    ("doc", &["test", "--doc", "--package", "renamap-core"]),
    ("cli", &["run", "--quiet", "--bin", BIN, "--", "--version"]),
];

fn main() -> Result<()> {
    let args = clap::command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("install").about("Install the renamap binary locally"))
        .subcommand(
            Command::new("run")
                .about("Build and run renamap with arguments")
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .arg(clap::Arg::new("args")
                    .help("Arguments to pass to renamap")
                    .action(clap::ArgAction::Append)
                    .num_args(0..))
        )
        .subcommand(
            Command::new("demo")
                .about("Generate sample files and rename a few of them")
                .arg(clap::Arg::new("apply")
                    .long("apply")
                    .help("Actually rename instead of doing a dry run")
                    .action(clap::ArgAction::SetTrue))
        )
        .subcommand(
            Command::new("test")
                .about("Test Operations")
                .subcommand(Command::new("all").about("Run every test stage and the demo"))
                .subcommand(Command::new("core").about("Run tests for renamap-core"))
                .subcommand(Command::new("bin").about("Run tests for renamap-bin"))
                .subcommand(Command::new("integration").about("Generate files, rename them and check the result"))
        )
        .get_matches();

    match args.subcommand() {
        Some(("install", _)) => cargo(&["install", "--path", "crates/renamap-bin"]),
        Some(("run", args)) => {
            let extra: Vec<&str> = args
                .get_many::<String>("args")
                .map_or(Vec::new(), |vals| vals.map(String::as_str).collect());
            renamap(&extra)
        }
        Some(("demo", args)) => run_demo(!args.get_flag("apply")),
        Some(("test", args)) => match args.subcommand() {
            Some(("all", _)) => test_all(),
            Some(("core", _)) => cargo(&["test", "--package", "renamap-core"]),
            Some(("bin", _)) => cargo(&["test", "--package", "renamap-bin"]),
            Some(("integration", _)) => run_demo(false),
            _ => anyhow::bail!("Expected one of: all, core, bin, integration"),
        },
        Some((command, _)) => anyhow::bail!("Unexpected command: {command}"),
        None => anyhow::bail!("Expected subcommand"),
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = process::Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("`cargo {}` failed", args.join(" "));
    }
    Ok(())
}

fn renamap(args: &[&str]) -> Result<()> {
    let mut full = vec!["run", "--quiet", "--bin", BIN, "--"];
    full.extend_from_slice(args);
    cargo(&full)
}

fn test_all() -> Result<()> {
    let mut failed = Vec::new();

    for (label, args) in TEST_STAGES {
        println!("🧪 {label}: cargo {}", args.join(" "));
        if let Err(err) = cargo(args) {
            println!("❌ {label}: {err:#}");
            failed.push(*label);
        }
    }

    println!("🧪 integration: demo run");
    if let Err(err) = run_demo(false) {
        println!("❌ integration: {err:#}");
        failed.push("integration");
    }

    if !failed.is_empty() {
        anyhow::bail!("Failed stages: {}", failed.join(", "));
    }
    println!("🎉 All stages passed");
    Ok(())
}

/// Generates fixtures into `DEMO_DIR`, maps every third file to a readable
/// name and runs the binary on them. Without `dry_run` the renamed files
/// are checked on disk afterwards.
fn run_demo(dry_run: bool) -> Result<()> {
    let demo_dir = Path::new(DEMO_DIR);
    let files_dir = demo_dir.join("files");
    if demo_dir.exists() {
        fs::remove_dir_all(demo_dir)?;
    }

    let files_arg = files_dir.to_string_lossy().into_owned();
    let log_arg = demo_dir.join("rename_log.txt").to_string_lossy().into_owned();

    renamap(&["--log-file", log_arg.as_str(), "generate", files_arg.as_str(), "-n", DEMO_FILE_COUNT])?;

    let mut names: Vec<String> = fs::read_dir(&files_dir)
        .context("Demo files were not created")?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    let mut mapping = String::from("old,new\n");
    let mut expected = Vec::new();
    for (index, name) in names.iter().enumerate().step_by(3) {
        let extension = name.rsplit('.').next().unwrap_or("bin");
        let new_name = format!("document_{:02}.{}", index, extension);
        mapping.push_str(&format!("{},{}\n", name, new_name));
        expected.push((name.clone(), new_name));
    }
    let mapping_path = demo_dir.join("rename.csv");
    fs::write(&mapping_path, mapping)?;
    let mapping_arg = mapping_path.to_string_lossy().into_owned();

    let mut args = vec!["--log-file", log_arg.as_str(), "rename", mapping_arg.as_str(), files_arg.as_str()];
    if dry_run {
        args.push("--dry-run");
    }
    renamap(&args)?;

    if !dry_run {
        for (old, new) in &expected {
            if files_dir.join(old).exists() || !files_dir.join(new).exists() {
                anyhow::bail!("Demo file {} was not renamed to {}", old, new);
            }
        }
    }

    println!("Demo files and log are in {}", DEMO_DIR);
    Ok(())
}
