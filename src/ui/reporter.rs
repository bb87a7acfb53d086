//! Renders pipeline progress through a [`UserInterface`].

use crate::error::CacheWriteWarning;
use crate::pipeline::{PipelineEvent, PipelineObserver, Stage};

use super::{SpinnerHandle, UserInterface};

/// Shows one spinner per running stage.
///
/// Each new event finishes the previous stage's spinner as a success;
/// `Failed` finishes it as an error. Warnings are held until the active
/// spinner finishes so they do not tear its line.
pub struct ProgressReporter<'a> {
    ui: &'a mut dyn UserInterface,
    active: Option<(Box<dyn SpinnerHandle>, String)>,
    pending_warnings: Vec<String>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(ui: &'a mut dyn UserInterface) -> Self {
        Self {
            ui,
            active: None,
            pending_warnings: Vec::new(),
        }
    }

    fn finish_active(&mut self, failed: bool) {
        if let Some((mut spinner, label)) = self.active.take() {
            if failed {
                spinner.finish_error(&label);
            } else {
                spinner.finish_success(&label);
            }
        }
        for warning in self.pending_warnings.drain(..) {
            self.ui.warning(&warning);
        }
    }
}

impl PipelineObserver for ProgressReporter<'_> {
    fn on_event(&mut self, event: &PipelineEvent) {
        match &event.stage {
            Stage::Done { .. } => self.finish_active(false),
            // The error itself is reported by the caller.
            Stage::Failed(_) => self.finish_active(true),
            _ => {
                self.finish_active(false);
                let spinner = self.ui.start_spinner(&event.label);
                self.active = Some((spinner, event.label.clone()));
            }
        }
    }

    fn on_warning(&mut self, warning: &CacheWriteWarning) {
        self.pending_warnings.push(warning.to_string());
    }
}

impl Drop for ProgressReporter<'_> {
    fn drop(&mut self) {
        if let Some((mut spinner, label)) = self.active.take() {
            spinner.finish_skipped(&label);
        }
        for warning in self.pending_warnings.drain(..) {
            self.ui.warning(&warning);
        }
    }
}
