//! Turn progress port
//!
//! Defines the interface for reporting progress while a turn runs.

/// Stage of a running turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStage {
    Thinking,
    Analyzing,
    Synthesizing,
    Playing,
}

impl TurnStage {
    pub fn label(&self) -> &'static str {
        match self {
            TurnStage::Thinking => "Waiting for the tutor...",
            TurnStage::Analyzing => "Analysing the reply...",
            TurnStage::Synthesizing => "Synthesizing speech...",
            TurnStage::Playing => "Starting playback...",
        }
    }
}

/// Callback for progress updates during a turn
///
/// Implementations live in the presentation layer.
pub trait TurnProgressNotifier: Send + Sync {
    /// Called when the turn enters a new stage
    fn on_stage(&self, _stage: TurnStage) {}

    /// Called once when the turn finishes, successfully or not
    fn on_turn_end(&self, _success: bool) {}
}

/// No-op progress notifier
pub struct NoTurnProgress;

impl TurnProgressNotifier for NoTurnProgress {}
