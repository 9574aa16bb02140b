use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::{bright, bright_green, bright_yellow};

/// Spinner for the three conversion phases: discovery, conversion and copying.
pub struct PhaseProgress {
    pb: ProgressBar,
}

impl PhaseProgress {
    pub fn start_discovery() -> Self {
        eprintln!("{}  {}", bright("⚙️"), bright("Phases").underlined());
        let pb = create_spinner(bright_yellow("Phase 1/3: Looking for Jenkinsfiles").to_string());
        Self { pb }
    }

    pub fn finish_discovery_start_conversion(self, pipeline_count: usize) -> Self {
        self.pb.finish_with_message(
            bright_green(format!("Phase 1/3: Found {pipeline_count} Jenkinsfile(s) ✓")).to_string(),
        );
        let pb = create_spinner(bright_yellow("Phase 2/3: Generating workflows").to_string());
        Self { pb }
    }

    pub fn finish_conversion_start_copy(self, workflow_count: usize) -> Self {
        self.pb.finish_with_message(
            bright_green(format!("Phase 2/3: Generated {workflow_count} workflow(s) ✓")).to_string(),
        );
        let pb = create_spinner(bright_yellow("Phase 3/3: Copying project files").to_string());
        Self { pb }
    }

    pub fn finish_copy(self, files_copied: usize) {
        self.pb.finish_with_message(
            bright_green(format!("Phase 3/3: Copied {files_copied} file(s) ✓")).to_string(),
        );
        eprintln!();
    }
}

fn create_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {msg} {spinner}")
            .unwrap(),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
