//! Session scoping: run test code "as" a user with guaranteed sign-out.
//!
//! The state machine is `LoggedOut -> LoggedIn(user) -> LoggedOut`. See
//! [`SessionScope`] for the scoped flow and [`manual`] for the form-driven
//! login and registration flows.

pub mod manual;
mod scope;
mod user_ref;

pub use manual::{LoginIdentity, SignUp};
pub use scope::*;
pub use user_ref::*;
