//! Generic building blocks shared by every part of the test bot.
//!
//! # Main Components
//!
//! - [`Resource`] - Trait that resource types implement to be driven by the generator
//! - [`HasAttributeBag`] - Capability for model-like resources
//! - [`ResourceSpec`] - A type or an instance
//! - [`TestUser`] - The acting user
//!
//! # Testing
//!
//! See [`mock`] module for in-memory doubles of every collaborator.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
