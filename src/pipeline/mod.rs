//! Forecast pipeline.
//!
//! [`Pipeline::run`] walks the stages in order and reports each transition
//! to a [`PipelineObserver`]. Presentation lives entirely in observers.
//!
//! # Example
//!
//! ```no_run
//! use ipweather::config::Settings;
//! use ipweather::pipeline::{Pipeline, PipelineEvent};
//!
//! let pipeline = Pipeline::from_settings(&Settings::default()).unwrap();
//! let mut events: Vec<PipelineEvent> = Vec::new();
//! let forecast = pipeline.run(false, &mut events).unwrap();
//! println!("{}: {}", forecast.city, forecast.temperature_label());
//! ```

pub mod event;
pub mod orchestrator;

pub use event::{PipelineEvent, PipelineObserver, Stage};
pub use orchestrator::{Pipeline, RecordingObserver};
