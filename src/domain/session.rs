use super::event::ColorToken;
use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Query parameter carrying the payment session name on the checkout page.
pub const PAYMENT_SESSION_REF_KEY: &str = "s";

/// Opaque name of a payment session, as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionName(String);

impl SessionName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SessionError::ValidationError(
                "Session name must not be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    /// Extracts the session name from a checkout page URL (`?s=<name>`).
    pub fn from_page_url(url: &str) -> Result<Option<Self>> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| SessionError::ValidationError(format!("Invalid page URL: {e}")))?;
        url.query_pairs()
            .find(|(key, _)| key == PAYMENT_SESSION_REF_KEY)
            .map(|(_, value)| Self::new(value.into_owned()))
            .transpose()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a configured payment button.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonName(String);

impl ButtonName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ButtonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of a payment session as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionStatus {
    Created,
    Paid,
    Authorized,
    Processing,
    Declined,
    Error,
    ErrorRefDoc,
    Other(String),
}

impl SessionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "Created",
            Self::Paid => "Paid",
            Self::Authorized => "Authorized",
            Self::Processing => "Processing",
            Self::Declined => "Declined",
            Self::Error => "Error",
            Self::ErrorRefDoc => "Error - RefDoc",
            Self::Other(status) => status,
        }
    }

    /// Indicator color for statuses that end the checkout flow.
    ///
    /// `None` means the session can still proceed (a declined session gets
    /// another chance at choosing a button). An `Error` state needs operator
    /// intervention before anything else happens.
    pub fn terminal_color(&self) -> Option<ColorToken> {
        let color = match self {
            Self::Paid | Self::Authorized => "green",
            Self::Processing => "yellow",
            Self::Error | Self::ErrorRefDoc => "red",
            _ => return None,
        };
        Some(ColorToken::new(color))
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal_color().is_some()
    }
}

impl From<&str> for SessionStatus {
    fn from(status: &str) -> Self {
        match status {
            "Created" => Self::Created,
            "Paid" => Self::Paid,
            "Authorized" => Self::Authorized,
            "Processing" => Self::Processing,
            "Declined" => Self::Declined,
            "Error" => Self::Error,
            "Error - RefDoc" => Self::ErrorRefDoc,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for SessionStatus {
    fn from(status: String) -> Self {
        Self::from(status.as_str())
    }
}

impl From<SessionStatus> for String {
    fn from(status: SessionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
