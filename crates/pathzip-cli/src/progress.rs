//! Progress bar implementation for CLI operations.

use crate::output::HumanFormatter;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use pathzip_core::ProgressCallback;
use std::path::Path;

/// Entry-count progress bar implementing `ProgressCallback`.
///
/// The bar length is unknown until the first `on_entry_start`, which carries
/// the total entry count. Cleared on completion or drop.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a hidden-length bar labelled with `message`.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(0);

        // "Archiving [████████░░░░] 42/100 (15.2 MB src/main.rs)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} ({msg})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_prefix(message.to_string());

        Self {
            bar,
            bytes_written: 0,
        }
    }

    /// Progress is only drawn on an interactive stdout.
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, path: &Path, total: usize, _current: usize) {
        if self.bar.length() != Some(total as u64) {
            self.bar.set_length(total as u64);
        }
        self.bar.set_message(format!(
            "{} {}",
            HumanFormatter::format_size(self.bytes_written),
            path.display()
        ));
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}
