//! Progress events emitted while a forecast is resolved.

use std::sync::mpsc::Sender;

use crate::error::{CacheWriteWarning, ErrorKind};

/// A pipeline state.
///
/// `Done` and `Failed` are terminal; every run ends in exactly one of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    CheckingCache,
    FetchingIp,
    FetchingGeo,
    FetchingWeather,
    Done { city: String, temperature: f64 },
    Failed(ErrorKind),
}

impl Stage {
    /// Whether no further events follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Failed(_))
    }
}

/// One stage transition with a human readable label.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineEvent {
    pub stage: Stage,
    pub label: String,
}

impl PipelineEvent {
    pub fn new(stage: Stage, label: impl Into<String>) -> Self {
        Self {
            stage,
            label: label.into(),
        }
    }
}

/// Receives pipeline progress.
pub trait PipelineObserver {
    /// Called once per stage transition.
    fn on_event(&mut self, event: &PipelineEvent);

    /// Called when a fetched response could not be cached.
    fn on_warning(&mut self, _warning: &CacheWriteWarning) {}
}

impl PipelineObserver for () {
    fn on_event(&mut self, _event: &PipelineEvent) {}
}

impl PipelineObserver for Vec<PipelineEvent> {
    fn on_event(&mut self, event: &PipelineEvent) {
        self.push(event.clone());
    }
}

impl PipelineObserver for Sender<PipelineEvent> {
    fn on_event(&mut self, event: &PipelineEvent) {
        // A dropped receiver only means nobody is watching.
        let _ = self.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn terminal_stages() {
        assert!(!Stage::CheckingCache.is_terminal());
        assert!(!Stage::FetchingWeather.is_terminal());
        assert!(Stage::Failed(ErrorKind::Network).is_terminal());
        assert!(Stage::Done {
            city: "Testville".into(),
            temperature: 21.3
        }
        .is_terminal());
    }

    #[test]
    fn vec_collects_events() {
        let mut events: Vec<PipelineEvent> = Vec::new();
        events.on_event(&PipelineEvent::new(Stage::CheckingCache, "Checking cache"));
        events.on_warning(&CacheWriteWarning {
            path: "/tmp/x".into(),
            message: "denied".into(),
        });
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label, "Checking cache");
    }

    #[test]
    fn sender_forwards_events() {
        let (mut tx, rx) = mpsc::channel();
        tx.on_event(&PipelineEvent::new(Stage::FetchingIp, "Fetching public IP"));
        assert_eq!(rx.recv().unwrap().stage, Stage::FetchingIp);

        drop(rx);
        tx.on_event(&PipelineEvent::new(Stage::FetchingGeo, "ignored"));
    }
}
