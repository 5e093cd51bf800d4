//! Progress bar display for installations

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for module installation
pub struct ProgressDisplay {
    /// Main progress bar for module installation
    module_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total module count
    pub fn new(total_modules: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let module_pb = ProgressBar::new(total_modules);
        module_pb.set_style(style);

        Self { module_pb }
    }

    /// Update to show the module currently being installed
    pub fn update_module(&self, module_id: &str) {
        self.module_pb.set_message(module_id.to_string());
    }

    /// Show the file currently being deployed
    pub fn update_file(&self, file_path: &str) {
        // Truncate long paths for display
        let display_path = if file_path.len() > 50 {
            format!("...{}", &file_path[file_path.len() - 47..])
        } else {
            file_path.to_string()
        };
        self.module_pb.set_message(display_path);
    }

    /// Increment module progress
    pub fn inc_module(&self) {
        self.module_pb.inc(1);
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        self.module_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.module_pb.abandon();
    }
}
