//! Progress reporting while a turn runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use lingua_application::ports::turn_progress::{TurnProgressNotifier, TurnStage};
use std::sync::Mutex;
use std::time::Duration;

/// Shows a spinner labelled with the current turn stage
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Run `f` with the spinner hidden so printed lines are not garbled.
    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        let bar = self.bar.lock().ok().and_then(|guard| guard.clone());
        match bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }

    /// Whether a spinner is currently shown
    pub fn is_active(&self) -> bool {
        self.bar
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProgressNotifier for ProgressReporter {
    fn on_stage(&self, stage: TurnStage) {
        let Ok(mut guard) = self.bar.lock() else {
            return;
        };
        let bar = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        bar.set_message(stage.label().to_string());
    }

    fn on_turn_end(&self, success: bool) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(pb) = guard.take()
        {
            if success {
                pb.finish_and_clear();
            } else {
                pb.abandon_with_message(format!("{}", "Turn failed".red()));
            }
        }
    }
}
