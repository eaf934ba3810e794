//! Form-driven sign-in and sign-up.
//!
//! These flows exist to test the login and registration forms themselves.
//! They don't update [`SessionState`](super::SessionState); whatever the form
//! submission does is trusted.

use super::SessionScope;
use crate::clients::{Authenticator, BrowserDriver, FormFields, UserDirectory};
use crate::error::Error;
use crate::framework::TestUser;
use rand::distr::Alphanumeric;
use rand::Rng;
use tracing::{info, instrument};

/// What to type into the login form's identity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginIdentity {
    pub email: String,
    pub username: String,
    pub login: String,
}

impl LoginIdentity {
    /// Uses the user's username and login where present, its email otherwise.
    pub fn from_user<U: TestUser>(user: &U) -> Self {
        let email = user.email().to_string();
        Self {
            username: user.username().unwrap_or(&email).to_string(),
            login: user.login().unwrap_or(&email).to_string(),
            email,
        }
    }

    fn form_fields(&self, password: Option<&str>) -> FormFields {
        let mut fields = FormFields::new();
        fields.set("email", &self.email);
        if let Some(password) = password {
            fields.set("password", password);
        }
        fields.set("username", &self.username).set("login", &self.login);
        fields
    }
}

/// A bare email fills every identity field.
impl From<&str> for LoginIdentity {
    fn from(email: &str) -> Self {
        Self {
            email: email.to_string(),
            username: email.to_string(),
            login: email.to_string(),
        }
    }
}

impl From<String> for LoginIdentity {
    fn from(email: String) -> Self {
        Self::from(email.as_str())
    }
}

/// Registration form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    /// Extra fields; they override the defaults on name clashes.
    pub extra: FormFields,
}

impl SignUp {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            extra: FormFields::new(),
        }
    }

    /// A fresh random email and password.
    pub fn random() -> Self {
        let email = format!("{}@example.com", random_token(12).to_lowercase());
        Self::new(email, random_token(16))
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.set(name, value);
        self
    }

    fn form_fields(&self) -> FormFields {
        let mut fields = FormFields::new();
        fields
            .set("email", &self.email)
            .set("password", &self.password)
            .set("password_confirmation", &self.password);
        for (name, value) in self.extra.iter() {
            fields.set(name, value);
        }
        fields
    }
}

fn random_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

impl<A, D> SessionScope<A, D>
where
    A: Authenticator<D::User>,
    D: UserDirectory,
{
    /// Signs in through the login form.
    #[instrument(skip(self, browser, identity, password))]
    pub async fn sign_in_manually<B: BrowserDriver>(
        &self,
        browser: &B,
        identity: impl Into<LoginIdentity>,
        password: Option<&str>,
    ) -> Result<(), Error> {
        let identity = identity.into();
        browser
            .visit(&self.routes.sign_in_path)
            .await
            .map_err(Error::Browser)?;

        let form = browser.within_form(&self.routes.form_selector);
        form.fill(&identity.form_fields(password)).await?;
        form.submit().await?;

        info!(email = %identity.email, "Submitted login form");
        Ok(())
    }

    /// Registers through the sign-up form and looks the new user up by email.
    #[instrument(skip(self, browser, sign_up), fields(email = %sign_up.email))]
    pub async fn sign_up<B: BrowserDriver>(
        &self,
        browser: &B,
        sign_up: SignUp,
    ) -> Result<Option<D::User>, Error> {
        browser
            .visit(&self.routes.sign_up_path)
            .await
            .map_err(Error::Browser)?;

        let form = browser.within_form(&self.routes.form_selector);
        form.fill(&sign_up.form_fields()).await?;
        form.submit().await?;

        info!("Submitted registration form");
        self.directory
            .find_by_email(&sign_up.email)
            .await
            .map_err(Error::Directory)
    }
}
