//! # Core Test Bot Abstractions
//!
//! This module defines the contracts a resource and a user must satisfy to be
//! driven by the generator.
//!
//! ## Key Types
//!
//! - [`Resource`]: The trait that every resource under test implements.
//! - [`HasAttributeBag`]: Opt-in capability for resources that behave like persisted models.
//! - [`ResourceType`]: A runtime descriptor of a resource type.
//! - [`ResourceSpec`]: "A type or an instance", the generator's input.
//! - [`TestUser`]: The acting user of a scenario.

use serde::Serialize;
use std::any::TypeId;
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display};

// =============================================================================
// 1. THE ABSTRACTION (Resources and their attribute bags)
// =============================================================================

/// Attribute name to value mapping exposed by model-like resources.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Capability of a resource to expose its attributes as a name/value bag.
///
/// Plain values don't implement this and always produce an empty attribute
/// diff. Model-like resources opt in and return it from
/// [`Resource::attribute_bag`].
pub trait HasAttributeBag {
    fn attributes(&self) -> Attributes;
}

/// Trait that any resource must implement to be used with the generator.
///
/// # Architecture Note
/// The generator never inspects a resource's fields directly. It needs three
/// things: a way to build a fresh default (`try_default`), a name
/// (`type_name`), and optionally an attribute bag to diff against that fresh
/// default.
///
/// # Provided Methods
/// - [`Resource::type_name`] defaults to the last path segment of the Rust type name.
/// - [`Resource::attribute_bag`] defaults to `None` (no capability).
pub trait Resource: Clone + Debug + Send + Sync + 'static {
    /// Construct a fresh default instance.
    ///
    /// Types that can't be constructed without input return `Err` with a reason.
    fn try_default() -> Result<Self, String>;

    /// The resource's type name as a caller would write it, e.g. `BlogPost`.
    ///
    /// Generic arguments are not part of the name.
    fn type_name() -> &'static str {
        // "crate::model::Draft<crate::model::BlogPost>" -> "Draft"
        let full = std::any::type_name::<Self>();
        let path = full.split('<').next().unwrap_or(full);
        path.rsplit("::").next().unwrap_or("Unknown")
    }

    /// Capability query for [`HasAttributeBag`].
    fn attribute_bag(&self) -> Option<&dyn HasAttributeBag> {
        None
    }
}

/// Builds an attribute bag from any `Serialize` struct.
///
/// Non-object serializations (and serialization failures) produce an empty bag.
pub fn serde_attributes<T: Serialize>(value: &T) -> Attributes {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
        _ => Attributes::new(),
    }
}

// =============================================================================
// 2. TYPE DESCRIPTORS & INPUT
// =============================================================================

/// Runtime descriptor of a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceType {
    name: &'static str,
    id: TypeId,
}

impl ResourceType {
    pub fn of<R: Resource>() -> Self {
        Self {
            name: R::type_name(),
            id: TypeId::of::<R>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The lowercase, underscore-separated form of the type name.
    pub fn underscored_name(&self) -> String {
        underscore(self.name)
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// What the caller hands to the generator: a type to default-construct, or a
/// concrete instance.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceSpec<R: Resource> {
    Type,
    Instance(R),
}

impl<R: Resource> ResourceSpec<R> {
    /// Shorthand for [`ResourceSpec::Type`].
    pub fn of_type() -> Self {
        ResourceSpec::Type
    }
}

impl<R: Resource> From<R> for ResourceSpec<R> {
    fn from(resource: R) -> Self {
        ResourceSpec::Instance(resource)
    }
}

/// Converts a type name into its lowercase, underscore-separated form.
///
/// `BlogPost` becomes `blog_post`, `Admin::BlogPost` becomes `admin/blog_post`
/// and `HTMLPage` becomes `html_page`.
pub fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.replace("::", "/").chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary {
                out.push('_');
            }
        }
        out.push(if c == '-' { '_' } else { c.to_ascii_lowercase() });
    }
    out
}

// =============================================================================
// 3. USERS
// =============================================================================

/// The acting user of a scenario.
///
/// `username` and `login` are optional; the manual sign-in flow falls back to
/// the email for whichever is missing.
pub trait TestUser: Clone + Debug + Send + Sync + 'static {
    fn email(&self) -> &str;

    /// Whether the record has been saved to the user directory.
    fn is_persisted(&self) -> bool;

    fn username(&self) -> Option<&str> {
        None
    }

    fn login(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Clone, Debug, Default, Serialize)]
    struct BlogPost {
        title: String,
        draft: bool,
    }

    impl HasAttributeBag for BlogPost {
        fn attributes(&self) -> Attributes {
            serde_attributes(self)
        }
    }

    impl Resource for BlogPost {
        fn try_default() -> Result<Self, String> {
            Ok(Self::default())
        }

        fn attribute_bag(&self) -> Option<&dyn HasAttributeBag> {
            Some(self)
        }
    }

    #[test]
    fn test_underscore() {
        assert_eq!(underscore("BlogPost"), "blog_post");
        assert_eq!(underscore("Post"), "post");
        assert_eq!(underscore("Admin::BlogPost"), "admin/blog_post");
        assert_eq!(underscore("HTMLPage"), "html_page");
        assert_eq!(underscore("Page2Section"), "page2_section");
        assert_eq!(underscore("already_snake"), "already_snake");
    }

    #[test]
    fn test_default_type_name_strips_module_path() {
        let ty = ResourceType::of::<BlogPost>();
        assert_eq!(ty.name(), "BlogPost");
        assert_eq!(ty.underscored_name(), "blog_post");
        assert_eq!(ty.type_id(), TypeId::of::<BlogPost>());
    }

    #[derive(Clone, Debug)]
    #[allow(dead_code)]
    struct Draft<T>(T);

    impl<T: Resource> Resource for Draft<T> {
        fn try_default() -> Result<Self, String> {
            T::try_default().map(Draft)
        }
    }

    #[test]
    fn test_default_type_name_drops_generic_arguments() {
        let ty = ResourceType::of::<Draft<BlogPost>>();
        assert_eq!(ty.name(), "Draft");
        assert_eq!(ty.underscored_name(), "draft");
        assert_eq!(ty.type_id(), TypeId::of::<Draft<BlogPost>>());
    }

    #[test]
    fn test_serde_attributes() {
        let post = BlogPost { title: "Hi".into(), draft: true };
        let attrs = post.attribute_bag().map(|b| b.attributes()).unwrap_or_default();
        assert_eq!(attrs.get("title"), Some(&serde_json::json!("Hi")));
        assert_eq!(attrs.get("draft"), Some(&serde_json::json!(true)));

        assert!(serde_attributes(&42).is_empty());
    }
}
