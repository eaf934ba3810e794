/// Session primitives of the authentication subsystem.
///
/// Both calls are synchronous in-process state changes (think a test-mode
/// `login_as`/`logout`), which lets [`SessionScope`](crate::session::SessionScope)
/// sign out from a drop guard.
pub trait Authenticator<U>: Send + Sync {
    fn sign_in(&self, user: &U);

    fn sign_out(&self);
}
