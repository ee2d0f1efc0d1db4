//! Command-line interface for folder-sorter.
//!
//! This module handles:
//! - argument parsing with clap
//! - configuration loading
//! - running the organizer with progress and per-file output
//! - writing the manifest and printing the summary

use crate::config::OrganizerConfig;
use crate::error::OrganizeResult;
use crate::manifest::Manifest;
use crate::organizer::{Mode, Organizer, RunReport};
use crate::output::OutputFormatter;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Sort the files of a directory into category subfolders by extension.
#[derive(Debug, Parser)]
#[command(name = "folder-sorter", version, about)]
pub struct Cli {
    /// Directory whose files should be sorted
    pub path: PathBuf,

    /// Show what would be moved without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Append a record of every action to the manifest
    ///
    /// The manifest defaults to `.folder-sorter-manifest.jsonl` inside the
    /// target directory.
    #[arg(long)]
    pub log: bool,

    /// Write the manifest to FILE instead of the default location (implies --log)
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Read configuration from FILE
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print the summary and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// `DryRun` with `--dry-run`, otherwise `Apply`.
    pub fn mode(&self) -> Mode {
        if self.dry_run {
            Mode::DryRun
        } else {
            Mode::Apply
        }
    }

    /// Diagnostic log level selected by `-v`.
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Resolves flags into [`RunOptions`]; `--log` selects the default
    /// manifest path inside the target.
    pub fn run_options(&self) -> RunOptions {
        let manifest = match (&self.manifest, self.log) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(Manifest::default_path(&self.path)),
            (None, false) => None,
        };

        RunOptions {
            target: self.path.clone(),
            mode: self.mode(),
            manifest,
            config: self.config.clone(),
            quiet: self.quiet,
        }
    }
}

/// Everything a run needs, independent of how it was requested.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub target: PathBuf,
    pub mode: Mode,
    /// Manifest location; `None` disables the manifest.
    pub manifest: Option<PathBuf>,
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
    /// Suppress per-file lines.
    pub quiet: bool,
}

impl RunOptions {
    /// Options for organizing `target` with defaults for everything else.
    pub fn new(target: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            target: target.into(),
            mode,
            manifest: None,
            config: None,
            quiet: true,
        }
    }
}

/// Runs the organizer as parsed from the command line.
pub fn run_cli(cli: &Cli) -> OrganizeResult<RunReport> {
    run(&cli.run_options())
}

/// Runs one organizing pass and prints its progress and summary.
///
/// Steps:
/// 1. Validate the target directory (fails before anything else)
/// 2. Load and compile configuration
/// 3. Scan, classify and move (or plan) each file
/// 4. Write the manifest, if requested
/// 5. Print the summary and the list of skipped files
///
/// # Errors
///
/// Returns bad-input errors (missing target, broken configuration) and
/// unexpected I/O errors. Per-file failures are part of the returned report.
pub fn run(options: &RunOptions) -> OrganizeResult<RunReport> {
    let target = options.target.as_path();
    Organizer::validate_target(target)?;

    let config_file = options.config.clone().or_else(OrganizerConfig::discover);
    let config = OrganizerConfig::load(config_file.as_deref())?.compile()?;
    let mut organizer = Organizer::new(config);
    for path in options.manifest.iter().chain(config_file.iter()) {
        organizer = organizer.ignore_path(path);
    }

    if options.mode.is_dry_run() {
        OutputFormatter::dry_run_notice(&format!("Analyzing contents of: {}", target.display()));
    } else {
        OutputFormatter::info(&format!("Organizing contents of: {}", target.display()));
    }

    let report = organize_with_output(&organizer, target, options)?;

    if let Some(path) = &options.manifest {
        write_manifest(path, &report)?;
    }

    print_report(target, &report);
    Ok(report)
}

fn organize_with_output(
    organizer: &Organizer,
    target: &Path,
    options: &RunOptions,
) -> OrganizeResult<RunReport> {
    let entries = organizer.scan(target)?;
    if entries.is_empty() {
        OutputFormatter::plain("No files found to organize.");
    }

    let pb = OutputFormatter::create_progress_bar(entries.len() as u64);
    let result = organizer.organize_entries(target, &entries, options.mode, |entry, outcome| {
        if !options.quiet {
            pb.suspend(|| match outcome {
                Ok(record) => OutputFormatter::plain(&OutputFormatter::action_line(
                    &entry.name,
                    record.category,
                    record.mode,
                )),
                Err(error) => OutputFormatter::error(&format!("{}: {}", entry.name, error)),
            });
        }
        pb.set_message(entry.name.clone());
        pb.inc(1);
    });
    pb.finish_and_clear();
    result
}

fn write_manifest(path: &Path, report: &RunReport) -> OrganizeResult<()> {
    let mut manifest = Manifest::new(path);
    for record in &report.records {
        manifest.push(record.clone());
    }
    let written = manifest.write()?;
    OutputFormatter::success(&format!(
        "Manifest updated with {} record(s): {}",
        written,
        path.display()
    ));
    Ok(())
}

fn print_report(target: &Path, report: &RunReport) {
    OutputFormatter::report(report);

    if report.mode.is_dry_run() {
        println!();
        OutputFormatter::success("Dry run complete. No files were modified.");
        OutputFormatter::plain(&format!(
            "Run 'folder-sorter {}' (without --dry-run) to move the files.",
            target.display()
        ));
    } else if report.is_complete_success() {
        println!();
        OutputFormatter::success("Organization complete!");
    } else {
        println!();
        OutputFormatter::warning("Some files could not be organized. See the list above.");
    }
}
