//! # Mock Collaborators
//!
//! In-memory doubles for testing scenarios and session scopes without a real
//! user store, authentication subsystem or browser.
//!
//! - [`MockUser`]: a ready-made [`TestUser`].
//! - [`MockDirectory`]: expectation-driven [`UserDirectory`]; call [`MockDirectory::verify`] at the end.
//! - [`MockAuthenticator`]: records sign-in/sign-out calls and tracks who is signed in.
//! - [`MockBrowser`]: records visits, form fills and submissions.
//!
//! All of them are cheap to clone and clones share state, so a test can keep a
//! handle after giving one to a [`SessionScope`](crate::session::SessionScope).

use crate::clients::{Authenticator, BrowserDriver, FormFields, UserDirectory};
use crate::error::BoxError;
use crate::framework::TestUser;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================================
// USERS
// =============================================================================

/// A plain user record for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockUser {
    pub email: String,
    pub persisted: bool,
    pub username: Option<String>,
    pub login: Option<String>,
}

impl MockUser {
    /// A user that has been saved to the directory.
    pub fn persisted(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            persisted: true,
            username: None,
            login: None,
        }
    }

    /// A user that was never saved.
    pub fn unsaved(email: impl Into<String>) -> Self {
        Self {
            persisted: false,
            ..Self::persisted(email)
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }
}

impl TestUser for MockUser {
    fn email(&self) -> &str {
        &self.email
    }

    fn is_persisted(&self) -> bool {
        self.persisted
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }
}

// =============================================================================
// DIRECTORY (EXPECTATION BUILDER API)
// =============================================================================

/// An expected request to the mock directory and its canned response.
enum Expectation<U> {
    FindByEmail {
        email: String,
        response: Result<Option<U>, String>,
    },
    Reload {
        response: Result<U, String>,
    },
}

/// A user directory with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were declared.
///
/// # Example
/// ```ignore
/// let mut directory = MockDirectory::<MockUser>::new();
/// directory.expect_find_by_email("alice@example.com").return_ok(Some(alice));
///
/// let mut scope = SessionScope::new(auth, directory.clone());
/// // ...
/// directory.verify(); // Ensures all expectations were met
/// ```
pub struct MockDirectory<U> {
    expectations: Arc<Mutex<VecDeque<Expectation<U>>>>,
}

impl<U> Clone for MockDirectory<U> {
    fn clone(&self) -> Self {
        Self {
            expectations: self.expectations.clone(),
        }
    }
}

impl<U> Default for MockDirectory<U> {
    fn default() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
        }
    }
}

impl<U: TestUser> MockDirectory<U> {
    /// Creates a new mock directory with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `find_by_email` lookup for `email`.
    pub fn expect_find_by_email(&mut self, email: impl Into<String>) -> FindByEmailExpectationBuilder<U> {
        FindByEmailExpectationBuilder {
            email: email.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `reload` call.
    pub fn expect_reload(&mut self) -> ReloadExpectationBuilder<U> {
        ReloadExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn next(&self) -> Option<Expectation<U>> {
        self.expectations.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl<U: TestUser> UserDirectory for MockDirectory<U> {
    type User = U;

    async fn find_by_email(&self, email: &str) -> Result<Option<U>, BoxError> {
        match self.next() {
            Some(Expectation::FindByEmail { email: expected, response }) => {
                assert_eq!(expected, email, "find_by_email called with unexpected email");
                response.map_err(Into::into)
            }
            _ => panic!("Unexpected find_by_email({email}) or expectation mismatch"),
        }
    }

    async fn reload(&self, user: &U) -> Result<U, BoxError> {
        match self.next() {
            Some(Expectation::Reload { response }) => response.map_err(Into::into),
            _ => panic!("Unexpected reload({}) or expectation mismatch", user.email()),
        }
    }
}

/// Builder for `find_by_email` expectations.
pub struct FindByEmailExpectationBuilder<U> {
    email: String,
    expectations: Arc<Mutex<VecDeque<Expectation<U>>>>,
}

impl<U> FindByEmailExpectationBuilder<U> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, user: Option<U>) {
        self.expectations.lock().unwrap().push_back(Expectation::FindByEmail {
            email: self.email,
            response: Ok(user),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: impl Into<String>) {
        self.expectations.lock().unwrap().push_back(Expectation::FindByEmail {
            email: self.email,
            response: Err(error.into()),
        });
    }
}

/// Builder for `reload` expectations.
pub struct ReloadExpectationBuilder<U> {
    expectations: Arc<Mutex<VecDeque<Expectation<U>>>>,
}

impl<U> ReloadExpectationBuilder<U> {
    pub fn return_ok(self, user: U) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Reload { response: Ok(user) });
    }

    pub fn return_err(self, error: impl Into<String>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Reload { response: Err(error.into()) });
    }
}

// =============================================================================
// AUTHENTICATION
// =============================================================================

/// One call received by [`MockAuthenticator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignIn(String),
    SignOut,
}

#[derive(Default)]
struct AuthLog {
    events: Vec<AuthEvent>,
    current: Option<String>,
}

/// Authenticator that records calls and who is currently signed in.
#[derive(Clone, Default)]
pub struct MockAuthenticator {
    log: Arc<Mutex<AuthLog>>,
}

impl MockAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Email of the signed-in user, if any.
    pub fn current_email(&self) -> Option<String> {
        self.log.lock().unwrap().current.clone()
    }

    pub fn events(&self) -> Vec<AuthEvent> {
        self.log.lock().unwrap().events.clone()
    }
}

impl<U: TestUser> Authenticator<U> for MockAuthenticator {
    fn sign_in(&self, user: &U) {
        let mut log = self.log.lock().unwrap();
        log.events.push(AuthEvent::SignIn(user.email().to_string()));
        log.current = Some(user.email().to_string());
    }

    fn sign_out(&self) {
        let mut log = self.log.lock().unwrap();
        log.events.push(AuthEvent::SignOut);
        log.current = None;
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// One call received by [`MockBrowser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserCall {
    Visit(String),
    Fill { form: String, fields: FormFields },
    Submit(String),
}

#[derive(Default)]
struct BrowserLog {
    calls: Vec<BrowserCall>,
    unreachable: Vec<String>,
}

/// Browser driver that records calls instead of driving a page.
#[derive(Clone, Default)]
pub struct MockBrowser {
    log: Arc<Mutex<BrowserLog>>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes visits to `path` fail.
    pub fn fail_visits_to(&self, path: impl Into<String>) {
        self.log.lock().unwrap().unreachable.push(path.into());
    }

    pub fn calls(&self) -> Vec<BrowserCall> {
        self.log.lock().unwrap().calls.clone()
    }

    /// Fields of the last form fill, if any.
    pub fn last_fill(&self) -> Option<FormFields> {
        self.log.lock().unwrap().calls.iter().rev().find_map(|c| match c {
            BrowserCall::Fill { fields, .. } => Some(fields.clone()),
            _ => None,
        })
    }
}

#[async_trait]
impl BrowserDriver for MockBrowser {
    async fn visit(&self, path: &str) -> Result<(), BoxError> {
        let mut log = self.log.lock().unwrap();
        log.calls.push(BrowserCall::Visit(path.to_string()));
        if log.unreachable.iter().any(|p| p == path) {
            return Err(format!("unable to reach {path}").into());
        }
        Ok(())
    }

    async fn fill_form(&self, selector: &str, fields: &FormFields) -> Result<(), BoxError> {
        self.log.lock().unwrap().calls.push(BrowserCall::Fill {
            form: selector.to_string(),
            fields: fields.clone(),
        });
        Ok(())
    }

    async fn submit(&self, selector: &str) -> Result<(), BoxError> {
        self.log
            .lock()
            .unwrap()
            .calls
            .push(BrowserCall::Submit(selector.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_directory_with_expectations() {
        let mut directory = MockDirectory::<MockUser>::new();
        directory
            .expect_find_by_email("alice@example.com")
            .return_ok(Some(MockUser::persisted("alice@example.com")));
        directory.expect_find_by_email("bob@example.com").return_ok(None);

        let found = directory.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.email), Some("alice@example.com".to_string()));

        let missing = directory.find_by_email("bob@example.com").await.unwrap();
        assert!(missing.is_none());

        directory.verify();
    }

    #[tokio::test]
    async fn test_mock_directory_error() {
        let mut directory = MockDirectory::<MockUser>::new();
        directory.expect_reload().return_err("connection reset");

        let err = directory
            .reload(&MockUser::persisted("a@b.c"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
    }

    #[test]
    fn test_mock_authenticator_tracks_current_user() {
        let auth = MockAuthenticator::new();
        Authenticator::<MockUser>::sign_in(&auth, &MockUser::persisted("a@b.c"));
        assert_eq!(auth.current_email().as_deref(), Some("a@b.c"));

        Authenticator::<MockUser>::sign_out(&auth);
        assert_eq!(auth.current_email(), None);
        assert_eq!(
            auth.events(),
            vec![AuthEvent::SignIn("a@b.c".into()), AuthEvent::SignOut]
        );
    }
}
