//! Core of the life event tracker.
//!
//! Owns the running series, the category classifier, the flat-file
//! persistence and the redraw scheduler. Presentation shells hold a
//! [`Tracker`] and forward user intents to it.

pub mod classifier;
pub mod config;
pub mod persistence;
pub mod prelude;
pub mod scheduler;
pub mod series;
pub mod session;
pub mod telemetry;

pub use classifier::EventKind;
pub use config::TrackerConfig;
pub use prelude::{ChartRenderer, TrackerError, TrackerResult};
pub use scheduler::{RedrawScheduler, TickOutcome};
pub use series::{EventSeries, Point};
pub use session::Tracker;
