//! Terminal progress for the two blocking network calls

use crate::io::configuration::{PROGRESS_BAR_WIDTH, SPINNER_TICK_MS};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static DOWNLOAD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{bytes}}/{{total_bytes}} ({{eta}})"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static UNSIZED_DOWNLOAD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} {bytes} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Creates progress indicators, or hidden ones when output is suppressed
#[derive(Debug, Clone, Copy)]
pub struct ProgressFactory {
    visible: bool,
}

impl ProgressFactory {
    /// Create a factory; `visible = false` yields indicators that draw nothing
    pub const fn new(visible: bool) -> Self {
        Self { visible }
    }

    /// Indeterminate spinner for a request whose duration is unknown
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if !self.visible {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(SPINNER_STYLE.clone());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        pb
    }

    /// Byte counter for a download, sized when the server reports a length
    pub fn download(&self, message: &str, total_bytes: Option<u64>) -> ProgressBar {
        if !self.visible {
            return ProgressBar::hidden();
        }
        let pb = match total_bytes {
            Some(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(DOWNLOAD_STYLE.clone());
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(UNSIZED_DOWNLOAD_STYLE.clone());
                pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                pb
            }
        };
        pb.set_message(message.to_string());
        pb
    }
}

impl Default for ProgressFactory {
    fn default() -> Self {
        Self::new(true)
    }
}
