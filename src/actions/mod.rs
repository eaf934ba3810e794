//! CRUD actions and the action-set resolver.
//!
//! The canonical list is fixed. `only`/`except` filters can only narrow it,
//! and every result keeps canonical order.

use crate::config::CrudOptions;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// One canonical CRUD-style operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    New,
    Create,
    Edit,
    Update,
    Index,
    Show,
    Destroy,
}

impl Action {
    /// Every action, in canonical order.
    pub const CANONICAL: [Action; 7] = [
        Action::New,
        Action::Create,
        Action::Edit,
        Action::Update,
        Action::Index,
        Action::Show,
        Action::Destroy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::New => "new",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Update => "update",
            Action::Index => "index",
            Action::Show => "show",
            Action::Destroy => "destroy",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    /// Accepts `new` as well as the symbol spelling `:new`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches(':');
        Action::CANONICAL
            .into_iter()
            .find(|a| a.as_str() == name)
            .ok_or_else(|| format!("unknown action: {s}"))
    }
}

/// Ordered subset of [`Action::CANONICAL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSet(Vec<Action>);

impl ActionSet {
    /// Resolves the actions to exercise from `only`/`except`.
    ///
    /// `only` wins over `except`. A present but empty `only` selects nothing.
    pub fn resolve(options: &CrudOptions) -> Self {
        let actions = if let Some(only) = &options.only {
            Action::CANONICAL
                .into_iter()
                .filter(|a| only.contains(a))
                .collect()
        } else if let Some(except) = &options.except {
            Action::CANONICAL
                .into_iter()
                .filter(|a| !except.contains(a))
                .collect()
        } else {
            Action::CANONICAL.to_vec()
        };
        Self(actions)
    }

    pub fn all() -> Self {
        Self(Action::CANONICAL.to_vec())
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.0
    }
}

impl IntoIterator for ActionSet {
    type Item = Action;
    type IntoIter = std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_filters_is_canonical() {
        let set = ActionSet::resolve(&CrudOptions::default());
        assert_eq!(set.as_slice(), &Action::CANONICAL);
    }

    #[test]
    fn test_only_keeps_canonical_order() {
        let options = CrudOptions::default().only([Action::Show, Action::New]);
        let set = ActionSet::resolve(&options);
        assert_eq!(set.as_slice(), &[Action::New, Action::Show]);
    }

    #[test]
    fn test_except_removes() {
        let options = CrudOptions::default().except([Action::Destroy]);
        let set = ActionSet::resolve(&options);
        assert_eq!(set.len(), 6);
        assert!(!set.contains(Action::Destroy));
        assert_eq!(set.iter().last(), Some(Action::Show));
    }

    #[test]
    fn test_only_wins_over_except() {
        let options = CrudOptions::default()
            .only([Action::Edit])
            .except([Action::Edit]);
        assert_eq!(ActionSet::resolve(&options).as_slice(), &[Action::Edit]);
    }

    #[test]
    fn test_unknown_identifiers_are_ignored() {
        let options = CrudOptions::from_value(&json!({ "only": ["publish"] })).unwrap();
        assert!(ActionSet::resolve(&options).is_empty());

        let options = CrudOptions::from_value(&json!({ "except": ["publish", null] })).unwrap();
        assert_eq!(ActionSet::resolve(&options), ActionSet::all());
    }

    #[test]
    fn test_parse_action() {
        assert_eq!("edit".parse::<Action>(), Ok(Action::Edit));
        assert_eq!(":destroy".parse::<Action>(), Ok(Action::Destroy));
        assert!("Edit".parse::<Action>().is_err());
    }
}
