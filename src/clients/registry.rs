use crate::error::BoxError;
use std::future::Future;
use std::pin::Pin;

/// Outcome of one scenario body.
pub type ScenarioResult = Result<(), BoxError>;

/// Boxed future produced by a [`Thunk`].
pub type ScenarioFuture = Pin<Box<dyn Future<Output = ScenarioResult> + Send + 'static>>;

/// Deferred scenario body handed to the test runner.
pub type Thunk = Box<dyn FnOnce() -> ScenarioFuture + Send + 'static>;

/// Registration surface of the test runner.
///
/// Execution order, reporting and timeouts belong to the implementor.
pub trait ScenarioRegistry {
    fn register_scenario(&mut self, label: String, thunk: Thunk);
}
