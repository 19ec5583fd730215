use super::event::ColorToken;
use super::session::{ButtonName, SessionName, SessionStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the backend knows about a session when the checkout page is served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub name: SessionName,
    pub status: SessionStatus,
    #[serde(default)]
    pub button: Option<ButtonName>,
    #[serde(default)]
    pub requires_data_capture: bool,
}

/// Stage of the checkout page for a given session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStage {
    /// No button chosen yet; render the payment buttons.
    ChooseButton,
    /// The chosen button needs additional payer data before proceeding.
    DataCapture { button: ButtonName },
    /// The chosen button hands the flow over to a third-party widget.
    Widget { button: ButtonName },
    /// The session reached a terminal status; show the result only.
    Result {
        status: SessionStatus,
        color: ColorToken,
    },
}

impl CheckoutStage {
    pub fn resolve(snapshot: &SessionSnapshot) -> Self {
        if let Some(color) = snapshot.status.terminal_color() {
            return Self::Result {
                status: snapshot.status.clone(),
                color,
            };
        }

        match &snapshot.button {
            None => Self::ChooseButton,
            Some(button) if snapshot.requires_data_capture => Self::DataCapture {
                button: button.clone(),
            },
            Some(button) => Self::Widget {
                button: button.clone(),
            },
        }
    }

    /// Whether the payment buttons are rendered at this stage.
    pub fn renders_buttons(&self) -> bool {
        !matches!(self, Self::Result { .. })
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChooseButton => f.write_str("choose-button"),
            Self::DataCapture { button } => write!(f, "data-capture ({})", button),
            Self::Widget { button } => write!(f, "widget ({})", button),
            Self::Result { status, color } => write!(f, "result {} [{}]", status, color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(status: &str, button: Option<&str>, capture: bool) -> SessionSnapshot {
        SessionSnapshot {
            name: SessionName::new("PSL-0001").unwrap(),
            status: SessionStatus::from(status),
            button: button.map(ButtonName::new),
            requires_data_capture: capture,
        }
    }

    #[test]
    fn test_fresh_session_chooses_button() {
        let stage = CheckoutStage::resolve(&snapshot("Created", None, false));
        assert_eq!(stage, CheckoutStage::ChooseButton);
        assert!(stage.renders_buttons());
    }

    #[test]
    fn test_selected_button_with_capture() {
        let stage = CheckoutStage::resolve(&snapshot("Created", Some("Card"), true));
        assert_eq!(
            stage,
            CheckoutStage::DataCapture {
                button: ButtonName::new("Card")
            }
        );
    }

    #[test]
    fn test_selected_button_widget() {
        let stage = CheckoutStage::resolve(&snapshot("Created", Some("PayZen"), false));
        assert_eq!(
            stage,
            CheckoutStage::Widget {
                button: ButtonName::new("PayZen")
            }
        );
    }

    #[test]
    fn test_terminal_status_shows_result() {
        let stage = CheckoutStage::resolve(&snapshot("Paid", Some("PayZen"), false));
        assert_eq!(
            stage,
            CheckoutStage::Result {
                status: SessionStatus::Paid,
                color: ColorToken::new("green"),
            }
        );
        assert!(!stage.renders_buttons());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(CheckoutStage::ChooseButton.to_string(), "choose-button");
        assert_eq!(
            CheckoutStage::resolve(&snapshot("Created", Some("Card"), true)).to_string(),
            "data-capture (Card)"
        );
        assert_eq!(
            CheckoutStage::resolve(&snapshot("Error - RefDoc", None, false)).to_string(),
            "result Error - RefDoc [red]"
        );
    }

    #[test]
    fn test_snapshot_from_backend_json() {
        let json = r#"{"name": "PSL-0001", "status": "Processing", "button": "PayZen"}"#;
        let snapshot: SessionSnapshot = serde_json::from_str(json).unwrap();

        assert!(!snapshot.requires_data_capture);
        assert_eq!(
            CheckoutStage::resolve(&snapshot),
            CheckoutStage::Result {
                status: SessionStatus::Processing,
                color: ColorToken::new("yellow"),
            }
        );
    }

    #[test]
    fn test_declined_session_gets_another_chance() {
        let stage = CheckoutStage::resolve(&snapshot("Declined", None, false));
        assert_eq!(stage, CheckoutStage::ChooseButton);
    }
}
