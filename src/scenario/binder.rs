use super::binding::{BindingContext, CrudBehavior, Scenario};
use crate::actions::{Action, ActionSet};
use crate::clients::{ScenarioRegistry, ScenarioResult};
use crate::config::CrudOptions;
use crate::error::{Error, UsageError};
use crate::framework::{Resource, ResourceSpec, TestUser};
use crate::resource;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info};

/// What [`ScenarioBinder::generate`] registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioInfo {
    pub label: String,
    pub action: Action,
}

/// Materializes one scenario per resolved action and hands them to the runner.
///
/// # Architecture Note
/// The binder resolves the resource and the action set independently, merges
/// them into a single [`BindingContext`], and builds a flat, ordered list of
/// scenarios. Nothing is registered until every scenario has been built, so a
/// failed call never leaves partial registrations behind.
pub struct ScenarioBinder<R, U> {
    behavior: Arc<dyn CrudBehavior<R, U>>,
}

impl<R: Resource, U: TestUser> ScenarioBinder<R, U> {
    pub fn new(behavior: impl CrudBehavior<R, U>) -> Self {
        Self {
            behavior: Arc::new(behavior),
        }
    }

    /// Builds a binder from an async closure.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Action, Arc<BindingContext<R, U>>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ScenarioResult> + Send + 'static,
    {
        Self::new(f)
    }

    pub fn with_shared(behavior: Arc<dyn CrudBehavior<R, U>>) -> Self {
        Self { behavior }
    }

    /// Builds the scenarios without registering them.
    pub fn try_bind(
        &self,
        spec: ResourceSpec<R>,
        user: U,
        options: &CrudOptions,
    ) -> Result<Vec<Scenario<R, U>>, Error> {
        if user.email().trim().is_empty() {
            return Err(UsageError::InvalidArguments(
                "expected crud_test(Post || Post::default(), user, options); user has no email".into(),
            )
            .into());
        }
        debug!(user = user.email(), "crud_test called");

        let resolved = resource::resolve(spec)?;
        let context = Arc::new(BindingContext {
            resource_type_name: resolved.resource_type.underscored_name(),
            resource: resolved.resource,
            resource_type: resolved.resource_type,
            attribute_diff: resolved.attribute_diff,
            namespace: options.namespace.clone(),
            user,
        });

        Ok(ActionSet::resolve(options)
            .into_iter()
            .map(|action| Scenario::new(action, context.clone(), self.behavior.clone()))
            .collect())
    }

    /// Generates and registers one scenario per resolved action.
    ///
    /// Errors are logged and produce an empty result with nothing registered;
    /// one bad resource must not take down a whole batch of calls.
    pub fn generate(
        &self,
        registry: &mut impl ScenarioRegistry,
        spec: ResourceSpec<R>,
        user: U,
        options: &CrudOptions,
    ) -> Vec<ScenarioInfo> {
        let email = user.email().to_string();
        let scenarios = match self.try_bind(spec, user, options) {
            Ok(scenarios) => scenarios,
            Err(e) => {
                error!(
                    resource_type = R::type_name(),
                    kind = e.kind(),
                    error = %e,
                    "crud_test aborted, no scenarios registered"
                );
                return Vec::new();
            }
        };

        let registered: Vec<ScenarioInfo> = scenarios
            .into_iter()
            .map(|scenario| {
                let info = ScenarioInfo {
                    label: scenario.label().to_string(),
                    action: scenario.action(),
                };
                registry.register_scenario(info.label.clone(), scenario.into_thunk());
                info
            })
            .collect();

        info!(
            resource_type = R::type_name(),
            user = %email,
            count = registered.len(),
            "Registered scenarios"
        );
        registered
    }

    /// Like [`generate`](Self::generate), with options taken from a raw config map.
    pub fn generate_from_config(
        &self,
        registry: &mut impl ScenarioRegistry,
        spec: ResourceSpec<R>,
        user: U,
        options: &serde_json::Value,
    ) -> Vec<ScenarioInfo> {
        match CrudOptions::from_value(options) {
            Ok(options) => self.generate(registry, spec, user, &options),
            Err(e) => {
                let e = Error::from(e);
                error!(
                    resource_type = R::type_name(),
                    kind = e.kind(),
                    error = %e,
                    "crud_test aborted, no scenarios registered"
                );
                Vec::new()
            }
        }
    }
}
