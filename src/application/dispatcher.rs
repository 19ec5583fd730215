use crate::domain::ports::{NavigatorRef, RpcGatewayRef};
use crate::domain::session::{ButtonName, SessionName};
use crate::error::{Result, SessionError};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};

/// Backend method recording the payer's choice of payment button.
pub const SELECT_BUTTON_METHOD: &str =
    "payments.payments.doctype.payment_session_log.payment_session_log.select_button";

#[derive(Debug, Deserialize)]
struct SelectButtonResponse {
    #[serde(default)]
    reload: bool,
}

/// Outcome of a single button click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The backend asked for a reload and the page was reloaded.
    Reloaded,
    /// The call succeeded without asking for a reload.
    Unchanged,
    /// A previous click is still waiting for its response.
    Busy,
    /// The call failed; the page keeps its prior state.
    Failed,
}

/// Click handler for the payment-method buttons of one checkout session.
///
/// The session name is held here instead of being looked up from page state
/// on every click.
pub struct ButtonDispatcher {
    gateway: RpcGatewayRef,
    navigator: NavigatorRef,
    session: SessionName,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag however the call ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ButtonDispatcher {
    pub fn new(gateway: RpcGatewayRef, navigator: NavigatorRef, session: SessionName) -> Self {
        Self {
            gateway,
            navigator,
            session,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &SessionName {
        &self.session
    }

    /// Handles a click on `button`.
    ///
    /// Issues exactly one remote call unless another click is still pending.
    /// Failures are logged and leave the page untouched.
    pub async fn select(&self, button: &ButtonName) -> Dispatch {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(button = %button, "ignoring click while a selection is pending");
            return Dispatch::Busy;
        }
        let _guard = InFlight(&self.in_flight);

        match self.try_select(button).await {
            Ok(true) => Dispatch::Reloaded,
            Ok(false) => Dispatch::Unchanged,
            Err(e) => {
                tracing::warn!(
                    session = %self.session,
                    button = %button,
                    "button selection failed: {}",
                    e
                );
                Dispatch::Failed
            }
        }
    }

    async fn try_select(&self, button: &ButtonName) -> Result<bool> {
        let mut args = Map::new();
        args.insert(
            "pslName".to_string(),
            Value::String(self.session.as_str().to_string()),
        );
        args.insert(
            "buttonName".to_string(),
            Value::String(button.as_str().to_string()),
        );

        let response = self.gateway.call(SELECT_BUTTON_METHOD, args).await?;
        // The backend answers with nothing when it could not record the choice.
        let Some(response) = serde_json::from_value::<Option<SelectButtonResponse>>(response)? else {
            return Err(SessionError::RemoteError {
                method: SELECT_BUTTON_METHOD.to_string(),
                reason: "the button choice was not recorded".to_string(),
            });
        };

        if response.reload {
            self.navigator.reload().await?;
            return Ok(true);
        }
        Ok(false)
    }
}
