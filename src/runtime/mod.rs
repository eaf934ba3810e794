//! Runtime support for executing generated scenarios.
//!
//! # Main Components
//!
//! - [`Suite`] - An in-process [`ScenarioRegistry`](crate::clients::ScenarioRegistry) that runs scenarios and reports per label
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod suite;
pub mod telemetry;

pub use suite::*;
pub use telemetry::*;
