//! Progress reporting for orchestration runs

use chorus_application::ports::progress::ProgressNotifier;
use chorus_domain::{Classification, ModeSource, Stage, Turn};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner per stage
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {pos:>2} turns {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn stage_bar(&self) -> std::sync::MutexGuard<'_, Option<ProgressBar>> {
        self.stage_bar
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn mode_note(classification: &Classification) -> String {
    match &classification.source {
        ModeSource::Override => format!("{} (override)", classification.mode),
        ModeSource::Classifier => format!("{} (classified)", classification.mode),
        ModeSource::Fallback(reason) => {
            format!("{} (fallback: {})", classification.mode, reason)
        }
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: &Stage) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage.display_name());
        pb.set_message("...");
        pb.enable_steady_tick(Duration::from_millis(100));

        *self.stage_bar() = Some(pb);
    }

    fn on_turn_complete(&self, turn: &Turn) {
        if let Some(pb) = self.stage_bar().as_ref() {
            pb.set_message(format!("{} {}", "v".green(), turn.speaker()));
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: &Stage) {
        if let Some(pb) = self.stage_bar().take() {
            pb.finish_with_message(format!("{} done", stage.display_name().green()));
        }
    }

    fn on_mode_resolved(&self, classification: &Classification) {
        let _ = self
            .multi
            .println(format!("{} {}", "Mode:".cyan().bold(), mode_note(classification)));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: &Stage) {
        eprintln!("{} {}", "->".cyan(), stage.display_name().bold());
    }

    fn on_turn_complete(&self, turn: &Turn) {
        eprintln!("  {} {}", "v".green(), turn.speaker());
    }

    fn on_stage_complete(&self, _stage: &Stage) {}

    fn on_mode_resolved(&self, classification: &Classification) {
        eprintln!("{} {}", "Mode:".cyan().bold(), mode_note(classification));
    }
}
