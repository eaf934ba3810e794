use crate::error::BoxError;
use crate::framework::TestUser;
use async_trait::async_trait;

/// Lookup surface of the user store.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    type User: TestUser;

    /// Finds a user by email. `Ok(None)` when nobody matches.
    async fn find_by_email(&self, email: &str) -> Result<Option<Self::User>, BoxError>;

    /// Re-reads a persisted user so a session starts from stored state.
    async fn reload(&self, user: &Self::User) -> Result<Self::User, BoxError>;
}
