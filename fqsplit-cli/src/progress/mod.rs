//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::time::Duration;

/// Progress over the bytes read from the input file
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize the bar for an input of `total_bytes`, or a spinner when
    /// the size is unknown
    pub fn init_bytes(&mut self, total_bytes: Option<u64>) {
        if self.quiet {
            return;
        }

        let pb = match total_bytes {
            Some(total) => {
                let pb = ProgressBar::new(total);
                if let Ok(style) = ProgressStyle::default_bar().template(
                    "[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {msg}",
                ) {
                    pb.set_style(style.progress_chars("##-"));
                }
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                if let Ok(style) =
                    ProgressStyle::default_spinner().template("{spinner} {bytes} read {msg}")
                {
                    pb.set_style(style);
                }
                pb
            }
        };
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Count bytes pulled through `reader`
    pub fn wrap_read<'a, R: Read + 'a>(&self, reader: R) -> Box<dyn Read + 'a> {
        match &self.progress_bar {
            Some(pb) => Box::new(pb.wrap_read(reader)),
            None => Box::new(reader),
        }
    }

    /// Show the output currently being written
    pub fn set_output(&self, name: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("-> {name}"));
        }
    }

    /// Finish progress reporting
    pub fn finish(&self, files: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("Complete: {files} files"));
        }
    }

    /// Whether a bar is shown
    pub fn is_active(&self) -> bool {
        self.progress_bar.is_some()
    }
}
