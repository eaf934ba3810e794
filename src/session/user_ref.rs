use crate::error::UsageError;
use serde_json::Value;

/// Who a session should act as.
#[derive(Debug, Clone, PartialEq)]
pub enum UserRef<U> {
    /// Look the user up by email.
    Email(String),
    /// A user record; must be persisted and is reloaded before use.
    Record(U),
    /// Run without touching the session.
    Anonymous,
}

impl<U> UserRef<U> {
    pub fn email(email: impl Into<String>) -> Self {
        UserRef::Email(email.into())
    }

    pub fn record(user: U) -> Self {
        UserRef::Record(user)
    }
}

impl<U> From<&str> for UserRef<U> {
    fn from(email: &str) -> Self {
        UserRef::Email(email.to_string())
    }
}

impl<U> From<String> for UserRef<U> {
    fn from(email: String) -> Self {
        UserRef::Email(email)
    }
}

impl<U> TryFrom<Value> for UserRef<U> {
    type Error = UsageError;

    /// A string is an email, `false` or `null` means no user. Anything else is
    /// rejected.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(email) => Ok(UserRef::Email(email)),
            Value::Bool(false) | Value::Null => Ok(UserRef::Anonymous),
            other => Err(UsageError::InvalidUserReference(other.to_string())),
        }
    }
}
