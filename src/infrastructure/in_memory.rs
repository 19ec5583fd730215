use crate::domain::event::ColorToken;
use crate::domain::ports::{Navigator, RpcGateway, StatusView};
use crate::domain::view::ViewState;
use crate::error::{Result, SessionError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Default)]
struct ViewRecord {
    state: ViewState,
    countdown_ticks: Vec<(Instant, u64)>,
    color_swaps: usize,
}

/// A thread-safe in-memory rendering of the checkout page.
///
/// Uses `Arc<RwLock<..>>` so clones observe the same page. Besides the
/// projection it records when each countdown update happened.
#[derive(Default, Clone)]
pub struct InMemoryView {
    record: Arc<RwLock<ViewRecord>>,
}

impl InMemoryView {
    /// Creates a new page with nothing rendered yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a page whose indicator already carries `classes`.
    pub fn with_indicator_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = ViewRecord::default();
        record
            .state
            .indicator
            .classes
            .extend(classes.into_iter().map(Into::into));
        Self {
            record: Arc::new(RwLock::new(record)),
        }
    }

    pub async fn snapshot(&self) -> ViewState {
        self.record.read().await.state.clone()
    }

    /// Countdown updates made by the ticking timer, with the instant of each.
    pub async fn countdown_ticks(&self) -> Vec<(Instant, u64)> {
        self.record.read().await.countdown_ticks.clone()
    }

    pub async fn color_swaps(&self) -> usize {
        self.record.read().await.color_swaps
    }
}

#[async_trait]
impl StatusView for InMemoryView {
    async fn set_indicator_text(&self, text: &str) -> Result<()> {
        self.record.write().await.state.indicator.text = Some(text.to_string());
        Ok(())
    }

    async fn swap_indicator_color(
        &self,
        previous: Option<&ColorToken>,
        next: Option<&ColorToken>,
    ) -> Result<()> {
        let mut record = self.record.write().await;
        record.state.swap_indicator_color(previous, next);
        record.color_swaps += 1;
        Ok(())
    }

    async fn show_indicator(&self) -> Result<()> {
        self.record.write().await.state.indicator.visible = true;
        Ok(())
    }

    async fn show_message(&self, content: &str) -> Result<()> {
        let mut record = self.record.write().await;
        record.state.message.content = Some(content.to_string());
        record.state.message.visible = true;
        Ok(())
    }

    async fn show_action(&self, label: &str, href: &str) -> Result<()> {
        let mut record = self.record.write().await;
        let action = &mut record.state.action;
        action.label = Some(label.to_string());
        action.href = Some(href.to_string());
        action.visible = true;
        Ok(())
    }

    async fn focus_action(&self) -> Result<()> {
        let mut record = self.record.write().await;
        if !record.state.action.visible {
            return Err(SessionError::ViewError(
                "Cannot focus a hidden call-to-action".to_string(),
            ));
        }
        record.state.action.focused = true;
        Ok(())
    }

    async fn show_countdown(&self, seconds: u64) -> Result<()> {
        let mut record = self.record.write().await;
        record.state.countdown.seconds = Some(seconds);
        record.state.countdown.visible = true;
        Ok(())
    }

    async fn set_countdown(&self, seconds: u64) -> Result<()> {
        let mut record = self.record.write().await;
        record.state.countdown.seconds = Some(seconds);
        record.countdown_ticks.push((Instant::now(), seconds));
        Ok(())
    }

    async fn hide_buttons(&self) -> Result<()> {
        self.record.write().await.state.buttons_visible = false;
        Ok(())
    }
}

#[derive(Default)]
struct NavigationLog {
    navigations: Vec<(Instant, String)>,
    reloads: usize,
}

/// Navigator that records where the page would have gone.
#[derive(Default, Clone)]
pub struct RecordingNavigator {
    log: Arc<RwLock<NavigationLog>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn navigations(&self) -> Vec<(Instant, String)> {
        self.log.read().await.navigations.clone()
    }

    pub async fn reloads(&self) -> usize {
        self.log.read().await.reloads
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn navigate(&self, href: &str) -> Result<()> {
        self.log
            .write()
            .await
            .navigations
            .push((Instant::now(), href.to_string()));
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        self.log.write().await.reloads += 1;
        Ok(())
    }
}

/// Remote gateway answering every call with the same scripted outcome.
#[derive(Clone)]
pub struct ScriptedGateway {
    outcome: std::result::Result<Value, String>,
    calls: Arc<RwLock<Vec<(String, Map<String, Value>)>>>,
}

impl ScriptedGateway {
    pub fn responding(response: Value) -> Self {
        Self {
            outcome: Ok(response),
            calls: Arc::default(),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
            calls: Arc::default(),
        }
    }

    /// Every call received so far, in order.
    pub async fn calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl RpcGateway for ScriptedGateway {
    async fn call(&self, method: &str, args: Map<String, Value>) -> Result<Value> {
        self.calls.write().await.push((method.to_string(), args));
        self.outcome
            .clone()
            .map_err(|reason| SessionError::RemoteError {
                method: method.to_string(),
                reason,
            })
    }
}
