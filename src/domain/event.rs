use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A semantic color token such as `green` or `red`.
///
/// The token is opaque to the reactor: it is applied and removed as a whole,
/// never pattern-matched against other classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(String);

impl ColorToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColorToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Call-to-action revealed once a status has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub label: String,
    pub href: String,
    #[serde(default, alias = "redirect_after_milliseconds")]
    pub redirect_after_milliseconds: Option<u64>,
}

impl Action {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            redirect_after_milliseconds: None,
        }
    }

    pub fn with_redirect_after(mut self, millis: u64) -> Self {
        self.redirect_after_milliseconds = Some(millis);
        self
    }

    pub fn redirect_after(&self) -> Option<Duration> {
        self.redirect_after_milliseconds.map(Duration::from_millis)
    }
}

/// Payload of a single status-change notification for a payment session.
///
/// Every field is optional; absent fields skip their rendering step.
/// `message` is trusted, pre-sanitized HTML coming from the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSessionEvent {
    #[serde(default, alias = "status_changed_to")]
    pub status_changed_to: Option<String>,
    #[serde(default, alias = "indicator_color")]
    pub indicator_color: Option<ColorToken>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub action: Option<Action>,
}

impl PaymentSessionEvent {
    pub fn status(status: impl Into<String>, color: impl Into<ColorToken>) -> Self {
        Self {
            status_changed_to: Some(status.into()),
            indicator_color: Some(color.into()),
            ..Default::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status_changed_to.is_none() && self.message.is_none() && self.action.is_none()
    }
}

/// Items delivered on the checkout page's notification channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum CheckoutEvent {
    /// The payer submitted the payment; the button section goes away.
    #[serde(rename = "payment-submitted")]
    Submitted,
    #[serde(rename = "payment-processed")]
    Processed(PaymentSessionEvent),
}
