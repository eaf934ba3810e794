use crate::error::{BoxError, Error};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Ordered `field -> value` pairs submitted to a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing an earlier value for the same name in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Surface of the browser automation driver used by the manual login flows.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    async fn visit(&self, path: &str) -> Result<(), BoxError>;

    /// Fills the given fields inside the form matched by `selector`.
    async fn fill_form(&self, selector: &str, fields: &FormFields) -> Result<(), BoxError>;

    /// Submits the form matched by `selector`, skipping client-side validation.
    async fn submit(&self, selector: &str) -> Result<(), BoxError>;

    /// Scopes subsequent form calls to one form.
    fn within_form<'a>(&'a self, selector: &'a str) -> FormScope<'a, Self>
    where
        Self: Sized,
    {
        FormScope { browser: self, selector }
    }
}

/// Calls scoped to a single form, see [`BrowserDriver::within_form`].
pub struct FormScope<'a, B: BrowserDriver> {
    browser: &'a B,
    selector: &'a str,
}

impl<B: BrowserDriver> FormScope<'_, B> {
    pub fn selector(&self) -> &str {
        self.selector
    }

    #[instrument(skip(self), fields(form = self.selector))]
    pub async fn fill(&self, fields: &FormFields) -> Result<(), Error> {
        debug!("Filling form");
        self.browser
            .fill_form(self.selector, fields)
            .await
            .map_err(Error::Browser)
    }

    #[instrument(skip(self), fields(form = self.selector))]
    pub async fn submit(&self) -> Result<(), Error> {
        debug!("Submitting form");
        self.browser.submit(self.selector).await.map_err(Error::Browser)
    }
}
