//! # CRUD Test Bot
//!
//! > **Generate one CRUD scenario per action from a resource and a user.**
//!
//! Hand the generator a resource (a type, or a concrete instance), the user to
//! act as, and a few options. It works out:
//!
//! - which attributes of the instance differ from a fresh default (the *attribute diff*),
//! - which of `new`, `create`, `edit`, `update`, `index`, `show`, `destroy` to exercise,
//! - the named values ("lets") each generated scenario sees before it runs.
//!
//! A companion [`SessionScope`](session::SessionScope) runs test code "as" a
//! user and guarantees the session is torn down afterwards.
//!
//! ## 🏗️ Design Philosophy
//!
//! Everything with real I/O is an external collaborator behind a trait: the
//! user store, the authentication subsystem, the browser driver and the test
//! runner. This crate only sequences calls to them, which keeps the core
//! deterministic and easy to test with the doubles in [`framework::mock`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Contracts ([`framework`])
//! - **Role**: What a resource ([`Resource`](framework::Resource)) and a user
//!   ([`TestUser`](framework::TestUser)) must provide.
//! - **Key items**: [`HasAttributeBag`](framework::HasAttributeBag), [`ResourceSpec`](framework::ResourceSpec).
//!
//! ### 2. The Resolvers ([`resource`], [`actions`])
//! - **Role**: Attribute diffing and `only`/`except` action filtering.
//! - **Key items**: [`resolve`](resource::resolve), [`ActionSet`](actions::ActionSet).
//!
//! ### 3. The Binder ([`scenario`])
//! - **Role**: Builds the immutable [`BindingContext`](scenario::BindingContext) and one
//!   [`Scenario`](scenario::Scenario) per action, then registers them with the runner.
//! - **Key items**: [`ScenarioBinder`](scenario::ScenarioBinder), [`CrudBehavior`](scenario::CrudBehavior).
//!
//! ### 4. The Session ([`session`])
//! - **Role**: `LoggedOut -> LoggedIn(user) -> LoggedOut`, plus the form-driven login flows.
//!
//! ### 5. The Collaborators ([`clients`]) and the Runner ([`runtime`])
//! - **Role**: Collaborator traits, and an in-process [`Suite`](runtime::Suite) that runs scenarios.
//!
//! ## 🚀 Quick Start
//!
//! ```ignore
//! let binder = ScenarioBinder::from_fn(|action, lets: Arc<BindingContext<Post, User>>| async move {
//!     // drive the page for `action` using lets.resource, lets.attribute_diff, ...
//!     Ok(())
//! });
//!
//! let mut suite = Suite::new();
//! let post = Post { title: "Hello".into(), ..Post::default() };
//! binder.generate(&mut suite, post.into(), alice, &CrudOptions::default().only([Action::New]));
//!
//! let report = suite.run().await;
//! ```
//!
//! ### Logging
//!
//! ```bash
//! RUST_LOG=debug cargo test
//! ```

pub mod actions;
pub mod clients;
pub mod config;
pub mod error;
pub mod framework;
pub mod resource;
pub mod runtime;
pub mod scenario;
pub mod session;

pub use error::{Error, Result};
