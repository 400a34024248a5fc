use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Receives per-file progress from a conversion run.
pub trait ConvertProgress {
    fn start(&mut self, total: usize);
    fn file_done(&mut self, path: &Path);
    fn finish(&mut self);
}

/// Discards progress.
#[derive(Debug, Default)]
pub struct NoProgress;

impl ConvertProgress for NoProgress {
    fn start(&mut self, _total: usize) {}
    fn file_done(&mut self, _path: &Path) {}
    fn finish(&mut self) {}
}

/// Terminal progress bar.
#[derive(Debug, Default)]
pub struct BarProgress {
    bar: Option<ProgressBar>,
}

impl BarProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConvertProgress for BarProgress {
    fn start(&mut self, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message("Converting log files...");
        self.bar = Some(bar);
    }

    fn file_done(&mut self, path: &Path) {
        if let Some(bar) = &self.bar {
            bar.set_message(path.display().to_string());
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
