//! Terminal output: colored status lines, the progress bar and the end-of-run
//! summary.

use crate::category::Category;
use crate::organizer::{FileFailure, Mode, RunReport};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;

/// Central place for user-facing output.
///
/// Diagnostics go through `tracing`; everything a user is meant to read in
/// normal operation goes through here:
/// - success messages (green with ✓)
/// - errors (red with ✗, on stderr)
/// - warnings (yellow with ⚠)
/// - the progress bar, per-file lines and the summary table
#[derive(Debug)]
pub struct OutputFormatter;

impl OutputFormatter {
    /// Enables or disables ANSI colors globally.
    ///
    /// # Arguments
    ///
    /// * `enabled` - `false` forces plain output, `true` restores detection
    ///
    /// # Example
    ///
    /// ```
    /// use folder_sorter::output::OutputFormatter;
    /// OutputFormatter::set_color(false);
    /// ```
    pub fn set_color(enabled: bool) {
        if enabled {
            colored::control::unset_override();
        } else {
            colored::control::set_override(false);
        }
    }

    /// Prints a success message in green with a checkmark.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use folder_sorter::output::OutputFormatter;
    /// OutputFormatter::success("Organization complete!");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message to stderr in red with an X mark.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use folder_sorter::output::OutputFormatter;
    /// OutputFormatter::error("Target directory not found");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use folder_sorter::output::OutputFormatter;
    /// OutputFormatter::warning("Some files could not be organized");
    /// ```
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use folder_sorter::output::OutputFormatter;
    /// OutputFormatter::info("Organizing contents of: ~/Downloads");
    /// ```
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a message without styling.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use folder_sorter::output::OutputFormatter;
    /// OutputFormatter::plain("No files found to organize.");
    /// ```
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a bold section header preceded by a blank line.
    ///
    /// # Arguments
    ///
    /// * `header` - The header text
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a message prefixed with `[DRY RUN]` in yellow.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use folder_sorter::output::OutputFormatter;
    /// OutputFormatter::dry_run_notice("Analyzing contents of: ~/Downloads");
    /// ```
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for `total` files.
    ///
    /// The bar draws to stderr and hides itself when stderr is not a terminal.
    ///
    /// # Arguments
    ///
    /// * `total` - The number of files the run will process
    ///
    /// # Example
    ///
    /// ```no_run
    /// use folder_sorter::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(10);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Formats the per-file line for a planned or completed move.
    ///
    /// # Arguments
    ///
    /// * `name` - The file name
    /// * `category` - The category the file goes to
    /// * `mode` - Chooses between "moved to" and "would move to"
    ///
    /// # Example
    ///
    /// ```
    /// use folder_sorter::output::OutputFormatter;
    /// use folder_sorter::{Category, Mode};
    ///
    /// OutputFormatter::set_color(false);
    /// let line = OutputFormatter::action_line("a.pdf", Category::Documents, Mode::DryRun);
    /// assert!(line.ends_with("a.pdf would move to Documents/"));
    /// ```
    pub fn action_line(name: &str, category: Category, mode: Mode) -> String {
        let verb = if mode.is_dry_run() {
            "would move to"
        } else {
            "moved to"
        };
        format!(
            "{} {} {} {}/",
            "✓".green(),
            name,
            verb,
            category.dir_name().bold()
        )
    }

    /// Prints a table of file counts by category.
    ///
    /// # Arguments
    ///
    /// * `category_counts` - Files per category, printed in category order
    /// * `total_files` - The total shown in the last row
    pub fn summary_table(category_counts: &BTreeMap<Category, usize>, total_files: usize) {
        Self::header("SUMMARY");

        let width = category_counts
            .keys()
            .map(|category| category.dir_name().len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (category, count) in category_counts {
            println!(
                "{:<width$} | {} {}",
                category.dir_name(),
                count.to_string().green(),
                plural(*count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            plural(total_files),
            width = width
        );
    }

    /// Lists files that could not be organized, with the reason, on stderr.
    ///
    /// Prints nothing when `failures` is empty.
    pub fn failure_list(failures: &[FileFailure]) {
        if failures.is_empty() {
            return;
        }
        eprintln!(
            "\n{}",
            format!("{} {} skipped:", failures.len(), plural(failures.len()))
                .red()
                .bold()
        );
        for failure in failures {
            eprintln!("  - {}: {}", failure.path.display(), failure.error);
        }
    }

    /// Prints the full end-of-run report: the summary table followed by the
    /// list of skipped files.
    pub fn report(report: &RunReport) {
        Self::summary_table(&report.category_counts(), report.records.len());
        Self::failure_list(&report.failures);
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
