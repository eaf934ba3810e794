//! # Configuration
//!
//! Two kinds of configuration feed the test bot:
//!
//! - [`CrudOptions`]: per-call options of the generator (`only`, `except`,
//!   `namespace`). Build them fluently, or parse them from a raw config map
//!   (JSON value or TOML text) the way a test file would declare them.
//! - [`TestBotConfig`]: where the login and registration forms live.
//!
//! ```toml
//! only = ["new", ["edit", "update"]]
//! namespace = "admin"
//! ```

use crate::actions::Action;
use crate::error::{Error, UsageError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options of one generator call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudOptions {
    /// Exercise only these actions.
    pub only: Option<Vec<Action>>,
    /// Exercise every action but these. Ignored when `only` is set.
    pub except: Option<Vec<Action>>,
    /// Controller namespace, e.g. `admin`.
    pub namespace: Option<String>,
}

impl CrudOptions {
    pub fn only(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.only = Some(actions.into_iter().collect());
        self
    }

    pub fn except(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.except = Some(actions.into_iter().collect());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Parses options from a raw config map.
    ///
    /// Filter values may be a single identifier or arbitrarily nested lists;
    /// they are flattened, `null` entries are dropped and unknown identifiers
    /// are ignored. Anything other than a map is a usage error.
    pub fn from_value(value: &Value) -> Result<Self, UsageError> {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::default()),
            other => {
                return Err(UsageError::InvalidArguments(format!(
                    "options must be a map, got {}",
                    json_type(other)
                )))
            }
        };

        let namespace = match map.get("namespace") {
            None | Some(Value::Null) => None,
            Some(Value::String(ns)) => Some(ns.clone()),
            Some(other) => {
                return Err(UsageError::InvalidArguments(format!(
                    "namespace must be a string, got {}",
                    json_type(other)
                )))
            }
        };

        Ok(Self {
            only: map.get("only").and_then(normalize_filter),
            except: map.get("except").and_then(normalize_filter),
            namespace,
        })
    }

    /// Parses options from TOML text. See [`CrudOptions::from_value`].
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let value: Value = toml::from_str(text)?;
        Ok(Self::from_value(&value)?)
    }
}

/// `None` when the filter is absent (`null`/`false`), otherwise the flattened
/// known actions.
fn normalize_filter(value: &Value) -> Option<Vec<Action>> {
    match value {
        Value::Null | Value::Bool(false) => None,
        other => {
            let mut actions = Vec::new();
            flatten_into(other, &mut actions);
            Some(actions)
        }
    }
}

fn flatten_into(value: &Value, out: &mut Vec<Action>) {
    match value {
        Value::Array(items) => items.iter().for_each(|v| flatten_into(v, out)),
        Value::String(s) => {
            if let Ok(action) = s.parse() {
                out.push(action);
            }
        }
        _ => {}
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}

/// Locations of the login and registration forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRoutes {
    pub sign_in_path: String,
    pub sign_up_path: String,
    pub form_selector: String,
}

impl Default for FormRoutes {
    fn default() -> Self {
        Self {
            sign_in_path: "/users/sign_in".to_string(),
            sign_up_path: "/users/sign_up".to_string(),
            form_selector: "form#new_user".to_string(),
        }
    }
}

/// Top-level test bot configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestBotConfig {
    pub routes: FormRoutes,
}

impl TestBotConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }
}
