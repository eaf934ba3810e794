//! The values ("lets") a scenario body sees, and the scenario itself.

use crate::actions::Action;
use crate::clients::{ScenarioFuture, ScenarioResult, Thunk};
use crate::framework::{Attributes, Resource, ResourceType, TestUser};
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{info_span, Instrument};

/// Named values bound into every scenario of one generator call.
///
/// Shared behind an `Arc` by all scenarios of the call and never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingContext<R, U> {
    pub resource: R,
    pub resource_type: ResourceType,
    /// Underscored type name, e.g. `blog_post`.
    pub resource_type_name: String,
    /// Attributes that differ from a default instance.
    pub attribute_diff: Attributes,
    pub namespace: Option<String>,
    pub user: U,
}

/// The action-specific work a scenario performs once its context is bound.
///
/// Any `Fn(Action, Arc<BindingContext<R, U>>) -> impl Future<Output = ScenarioResult>`
/// closure implements this trait.
#[async_trait]
pub trait CrudBehavior<R, U>: Send + Sync + 'static {
    async fn perform(&self, action: Action, lets: Arc<BindingContext<R, U>>) -> ScenarioResult;
}

#[async_trait]
impl<R, U, F, Fut> CrudBehavior<R, U> for F
where
    R: Resource,
    U: TestUser,
    F: Fn(Action, Arc<BindingContext<R, U>>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ScenarioResult> + Send + 'static,
{
    async fn perform(&self, action: Action, lets: Arc<BindingContext<R, U>>) -> ScenarioResult {
        (self)(action, lets).await
    }
}

/// One generated, independently reportable unit of test work.
pub struct Scenario<R, U> {
    label: String,
    action: Action,
    context: Arc<BindingContext<R, U>>,
    behavior: Arc<dyn CrudBehavior<R, U>>,
}

impl<R: Resource, U: TestUser> Scenario<R, U> {
    pub(crate) fn new(
        action: Action,
        context: Arc<BindingContext<R, U>>,
        behavior: Arc<dyn CrudBehavior<R, U>>,
    ) -> Self {
        Self {
            label: label_for(action, context.user.email()),
            action,
            context,
            behavior,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn context(&self) -> &BindingContext<R, U> {
        &self.context
    }

    /// Runs the behavior for this scenario's action with its bound context.
    pub async fn run(self) -> ScenarioResult {
        let span = info_span!(
            "scenario",
            action = %self.action,
            resource_type = self.context.resource_type.name()
        );
        self.behavior
            .perform(self.action, self.context)
            .instrument(span)
            .await
    }

    /// Erases the scenario into the runner's deferred form.
    pub fn into_thunk(self) -> Thunk {
        Box::new(move || -> ScenarioFuture { Box::pin(self.run()) })
    }
}

impl<R, U> fmt::Debug for Scenario<R, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("label", &self.label)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

/// `test_bot: #new alice@example.com`
pub fn label_for(action: Action, user_email: &str) -> String {
    format!("test_bot: #{action} {user_email}")
}
