// file: src/pipeline/progress.rs
// description: phase spinners and statistics reporting for scan execution
// reference: uses indicatif for progress display and tracks scan metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    pub pages: usize,
    pub characters: usize,
    pub entities_tagged: usize,
    pub unique_names: usize,
    pub unique_companies: usize,
    pub extract_ms: u64,
    pub tag_ms: u64,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.extract_ms + self.tag_ms
    }

    pub fn characters_per_second(&self) -> f64 {
        if self.total_ms() == 0 {
            return 0.0;
        }
        self.characters as f64 / (self.total_ms() as f64 / 1000.0)
    }

    pub fn log_summary(&self) {
        info!("=== Scan Summary ===");
        info!("Pages: {}", self.pages);
        info!("Characters extracted: {}", self.characters);
        info!("Entities tagged: {}", self.entities_tagged);
        info!("Unique names: {}", self.unique_names);
        info!("Unique companies: {}", self.unique_companies);
        info!(
            "Duration: {} ms (extract {} ms, tag {} ms)",
            self.total_ms(),
            self.extract_ms,
            self.tag_ms
        );
        info!("====================");
    }
}

/// Single spinner reused across the scan phases. Disabled in tests and when
/// the output is not a terminal.
pub struct ScanProgress {
    bar: Option<ProgressBar>,
}

impl ScanProgress {
    pub fn new() -> Self {
        Self {
            bar: Some(create_spinner()),
        }
    }

    pub fn disabled() -> Self {
        Self { bar: None }
    }

    pub fn start_phase(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(message.to_string());
        }
        info!("{}", message);
    }

    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScanProgress {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Failed to create spinner template"),
    );
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
