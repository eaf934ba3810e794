use super::UserRef;
use crate::clients::{Authenticator, UserDirectory};
use crate::config::{FormRoutes, TestBotConfig};
use crate::error::{Error, LookupError, UsageError};
use crate::framework::TestUser;
use std::future::Future;
use tracing::{debug, info, instrument, warn};

/// Whether a session scope currently has a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState<U> {
    LoggedOut,
    LoggedIn(U),
}

impl<U> Default for SessionState<U> {
    fn default() -> Self {
        SessionState::LoggedOut
    }
}

impl<U> SessionState<U> {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn(_))
    }

    pub fn user(&self) -> Option<&U> {
        match self {
            SessionState::LoggedIn(user) => Some(user),
            SessionState::LoggedOut => None,
        }
    }
}

/// Signs a user in, runs test code as that user, and guarantees sign-out.
///
/// # Concurrency Model
/// A scope tracks a single current user and is owned by one test worker. It is
/// deliberately not `Clone`: workers that run in parallel each build their own
/// scope, so one worker's sign-out can never race another's session.
///
/// # Nesting
/// Nested sessions are not supported. [`run_as`](Self::run_as) borrows the
/// scope mutably, so it can't be re-entered from its own block, and
/// [`sign_in`](Self::sign_in)/[`run_as`](Self::run_as) fail with
/// [`UsageError::NestedSession`] while a user is signed in.
pub struct SessionScope<A, D: UserDirectory> {
    pub(super) authenticator: A,
    pub(super) directory: D,
    pub(super) routes: FormRoutes,
    state: SessionState<D::User>,
}

impl<A, D> SessionScope<A, D>
where
    A: Authenticator<D::User>,
    D: UserDirectory,
{
    pub fn new(authenticator: A, directory: D) -> Self {
        Self {
            authenticator,
            directory,
            routes: FormRoutes::default(),
            state: SessionState::LoggedOut,
        }
    }

    pub fn with_config(mut self, config: &TestBotConfig) -> Self {
        self.routes = config.routes.clone();
        self
    }

    pub fn state(&self) -> &SessionState<D::User> {
        &self.state
    }

    pub fn current_user(&self) -> Option<&D::User> {
        self.state.user()
    }

    /// Runs `block` as the referenced user and signs out afterwards.
    ///
    /// Sign-out happens on every exit path of `block`: normal completion,
    /// panic, or the returned future being dropped before completion. When
    /// resolution fails the block never runs and the state stays `LoggedOut`.
    /// [`UserRef::Anonymous`] runs the block with `None` and no session change.
    pub async fn run_as<F, Fut, T>(
        &mut self,
        user_ref: impl Into<UserRef<D::User>>,
        block: F,
    ) -> Result<T, Error>
    where
        F: FnOnce(Option<D::User>) -> Fut,
        Fut: Future<Output = T>,
    {
        let user = match self.enter(user_ref.into()).await {
            Ok(user) => user,
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Session not started");
                return Err(e);
            }
        };

        let Some(user) = user else {
            debug!("Running without a session");
            return Ok(block(None).await);
        };

        let _session = SignedIn::new(&self.authenticator, &mut self.state, user.clone());
        Ok(block(Some(user)).await)
    }

    /// Signs the referenced user in until [`sign_out`](Self::sign_out).
    ///
    /// Returns the signed-in user, or `None` for [`UserRef::Anonymous`].
    pub async fn sign_in(
        &mut self,
        user_ref: impl Into<UserRef<D::User>>,
    ) -> Result<Option<D::User>, Error> {
        let user = self.enter(user_ref.into()).await?;
        if let Some(user) = &user {
            self.authenticator.sign_in(user);
            info!(user = user.email(), "Signed in");
            self.state = SessionState::LoggedIn(user.clone());
        }
        Ok(user)
    }

    /// Signs out and returns to `LoggedOut`, whatever the current state.
    pub fn sign_out(&mut self) {
        self.authenticator.sign_out();
        if let SessionState::LoggedIn(user) = std::mem::take(&mut self.state) {
            info!(user = user.email(), "Signed out");
        }
    }

    async fn enter(&self, user_ref: UserRef<D::User>) -> Result<Option<D::User>, Error> {
        if let SessionState::LoggedIn(current) = &self.state {
            return Err(UsageError::NestedSession(current.email().to_string()).into());
        }
        self.resolve(user_ref).await
    }

    #[instrument(skip(self))]
    async fn resolve(&self, user_ref: UserRef<D::User>) -> Result<Option<D::User>, Error> {
        match user_ref {
            UserRef::Anonymous => Ok(None),
            UserRef::Email(email) => {
                debug!("Looking up user");
                match self
                    .directory
                    .find_by_email(&email)
                    .await
                    .map_err(Error::Directory)?
                {
                    Some(user) => Ok(Some(user)),
                    None => Err(LookupError::UserNotFound(email).into()),
                }
            }
            UserRef::Record(user) => {
                if !user.is_persisted() {
                    return Err(UsageError::UnpersistedUser(user.email().to_string()).into());
                }
                debug!("Reloading user");
                let fresh = self.directory.reload(&user).await.map_err(Error::Directory)?;
                Ok(Some(fresh))
            }
        }
    }
}

/// Holds a session open; signing out when dropped.
struct SignedIn<'a, A: Authenticator<U>, U: TestUser> {
    authenticator: &'a A,
    state: &'a mut SessionState<U>,
}

impl<'a, A: Authenticator<U>, U: TestUser> SignedIn<'a, A, U> {
    fn new(authenticator: &'a A, state: &'a mut SessionState<U>, user: U) -> Self {
        authenticator.sign_in(&user);
        info!(user = user.email(), "Signed in");
        *state = SessionState::LoggedIn(user);
        Self { authenticator, state }
    }
}

impl<A: Authenticator<U>, U: TestUser> Drop for SignedIn<'_, A, U> {
    fn drop(&mut self) {
        self.authenticator.sign_out();
        if let SessionState::LoggedIn(user) = std::mem::take(self.state) {
            info!(user = user.email(), "Signed out");
        }
    }
}
