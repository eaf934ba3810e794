//! Scenario materialization and binding.
//!
//! One scenario per action lets the runner report pass/fail per action, and
//! lets `only`/`except` skip work without building unused scenarios.

mod binder;
pub mod binding;

pub use binder::*;
pub use binding::*;
