//! Progress notification port
//!
//! Defines the interface for reporting progress during an orchestration run.

use chorus_domain::{Classification, Stage, Turn};

/// Callback for progress updates during an orchestration run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console spinner, plain text, web push).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: &Stage);

    /// Called for each turn as soon as the protocol appends it
    fn on_turn_complete(&self, turn: &Turn);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: &Stage);

    /// Called once the mode is resolved (classified, overridden or fallen back)
    fn on_mode_resolved(&self, _classification: &Classification) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: &Stage) {}
    fn on_turn_complete(&self, _turn: &Turn) {}
    fn on_stage_complete(&self, _stage: &Stage) {}
}
