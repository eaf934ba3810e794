//! Interfaces of the external collaborators the test bot sequences calls to.

pub mod auth;
pub mod browser;
pub mod directory;
pub mod registry;

pub use auth::*;
pub use browser::*;
pub use directory::*;
pub use registry::*;
