//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use pathzip_core::ArchiveOutcome;
use pathzip_core::ExtractionReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    pub(crate) fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn headline(&self, text: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(text);
        }
    }

    fn line(&self, label: &str, value: impl std::fmt::Display) {
        let _ = self.term.write_line(&format!("  {label:<18}{value}"));
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_creation_result(&self, target: &Path, outcome: &ArchiveOutcome) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let Some(report) = outcome.report() else {
            self.headline(&format!(
                "Nothing to archive, wrote empty archive: {}",
                target.display()
            ));
            return Ok(());
        };

        self.headline(&format!("Archive created: {}", target.display()));
        self.line("Files added:", report.files_added);
        self.line("Directories:", report.directories_added);
        self.line("Total size:", Self::format_size(report.bytes_written));

        if report.bytes_compressed > 0 {
            self.line("Archive size:", Self::format_size(report.bytes_compressed));
            self.line(
                "Compression:",
                format!(
                    "{:.1}% (ratio {:.2})",
                    report.compression_percentage(),
                    report.compression_ratio()
                ),
            );
        }

        if report.files_skipped > 0 {
            self.line("Skipped:", report.files_skipped);
        }

        if self.verbose {
            self.line("Duration:", format!("{:?}", report.duration));
        }

        Ok(())
    }

    fn format_extraction_result(&self, target: &Path, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Extracted into: {}", target.display()));
        self.line("Files extracted:", report.files_extracted);
        self.line("Directories:", report.directories_created);
        self.line("Total size:", Self::format_size(report.bytes_written));

        if report.files_overwritten > 0 {
            self.line("Overwritten:", report.files_overwritten);
        }

        if self.verbose {
            self.line("Duration:", format!("{:?}", report.duration));
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Errors are shown even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:#}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:#}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("WARNING:").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}
