//! telechart: time-series chart engine with a synchronized navigator.
//!
//! The crate keeps a clamped data range over a shared x axis, picks a
//! level of detail per frame, animates range, scale, opacity and cursor
//! transitions, and emits backend-agnostic frames holding only the
//! surfaces that changed.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
