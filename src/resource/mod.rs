//! Resource resolution and attribute diffing.
//!
//! Turns a [`ResourceSpec`] into a concrete instance plus the minimal set of
//! attributes that distinguish it from a fresh default. Generated scenarios use
//! that diff to reconstruct "this resource as the caller specified it", e.g. to
//! pre-fill a creation form.

use crate::error::ResolutionError;
use crate::framework::{Attributes, Resource, ResourceSpec, ResourceType};
use serde_json::Value;
use tracing::debug;

/// Output of [`resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<R: Resource> {
    pub resource: R,
    pub resource_type: ResourceType,
    pub attribute_diff: Attributes,
}

/// Resolves a resource spec into an instance, its type and its attribute diff.
///
/// A [`ResourceSpec::Type`] is default-constructed and has an empty diff.
/// An instance exposing an attribute bag is compared key by key against a
/// throwaway default instance; instances without the capability get an empty
/// diff.
pub fn resolve<R: Resource>(spec: ResourceSpec<R>) -> Result<Resolved<R>, ResolutionError> {
    let resource_type = ResourceType::of::<R>();

    let (resource, attribute_diff) = match spec {
        ResourceSpec::Type => (construct::<R>()?, Attributes::new()),
        ResourceSpec::Instance(resource) => {
            let diff = match resource.attribute_bag() {
                Some(bag) => {
                    let empty = construct::<R>()?;
                    let defaults = empty
                        .attribute_bag()
                        .map(|b| b.attributes())
                        .unwrap_or_default();
                    diff_attributes(bag.attributes(), &defaults)
                }
                None => Attributes::new(),
            };
            (resource, diff)
        }
    };

    debug!(
        resource_type = resource_type.name(),
        diff_size = attribute_diff.len(),
        "Resolved resource"
    );

    Ok(Resolved {
        resource,
        resource_type,
        attribute_diff,
    })
}

/// Keeps the entries of `attributes` whose value differs from `defaults`.
/// A key missing from `defaults` compares as `null`.
pub fn diff_attributes(attributes: Attributes, defaults: &Attributes) -> Attributes {
    attributes
        .into_iter()
        .filter(|(key, value)| defaults.get(key).unwrap_or(&Value::Null) != value)
        .collect()
}

fn construct<R: Resource>() -> Result<R, ResolutionError> {
    R::try_default().map_err(|reason| ResolutionError::UninstantiableType {
        type_name: R::type_name().to_string(),
        reason,
    })
}
