use super::event::ColorToken;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Rendering layer of the checkout page.
///
/// Elements are addressed by what they show rather than by DOM ids: the
/// status indicator, the message panel, the call-to-action, the redirect
/// countdown and the payment button section.
#[async_trait]
pub trait StatusView: Send + Sync {
    async fn set_indicator_text(&self, text: &str) -> Result<()>;
    /// Removes `previous` (if any) and applies `next` (if any).
    async fn swap_indicator_color(
        &self,
        previous: Option<&ColorToken>,
        next: Option<&ColorToken>,
    ) -> Result<()>;
    async fn show_indicator(&self) -> Result<()>;
    async fn show_message(&self, content: &str) -> Result<()>;
    async fn show_action(&self, label: &str, href: &str) -> Result<()>;
    async fn focus_action(&self) -> Result<()>;
    async fn show_countdown(&self, seconds: u64) -> Result<()>;
    async fn set_countdown(&self, seconds: u64) -> Result<()>;
    async fn hide_buttons(&self) -> Result<()>;
}

#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, href: &str) -> Result<()>;
    async fn reload(&self) -> Result<()>;
}

/// Remote procedure gateway: a method identifier plus named arguments in,
/// one response payload out.
#[async_trait]
pub trait RpcGateway: Send + Sync {
    async fn call(&self, method: &str, args: Map<String, Value>) -> Result<Value>;
}

pub type StatusViewRef = Arc<dyn StatusView>;
pub type NavigatorRef = Arc<dyn Navigator>;
pub type RpcGatewayRef = Arc<dyn RpcGateway>;
