use crate::domain::event::ColorToken;
use crate::domain::ports::{Navigator, StatusView};
use crate::error::Result;
use async_trait::async_trait;
use std::io::Write;
use tokio::sync::Mutex;

/// Renders the checkout page as plain text lines.
///
/// Each view operation that changes what the payer sees writes one
/// `key: value` line. Navigation is printed rather than performed.
pub struct TerminalView<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    async fn line(&self, key: &str, value: &str) -> Result<()> {
        let mut writer = self.writer.lock().await;
        writeln!(writer, "{}: {}", key, value)?;
        writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W: Write + Send> StatusView for TerminalView<W> {
    async fn set_indicator_text(&self, text: &str) -> Result<()> {
        self.line("status", text).await
    }

    async fn swap_indicator_color(
        &self,
        _previous: Option<&ColorToken>,
        next: Option<&ColorToken>,
    ) -> Result<()> {
        self.line("color", next.map_or("none", ColorToken::as_str))
            .await
    }

    async fn show_indicator(&self) -> Result<()> {
        Ok(())
    }

    async fn show_message(&self, content: &str) -> Result<()> {
        self.line("message", content).await
    }

    async fn show_action(&self, label: &str, href: &str) -> Result<()> {
        self.line("action", &format!("{} -> {}", label, href)).await
    }

    async fn focus_action(&self) -> Result<()> {
        Ok(())
    }

    async fn show_countdown(&self, seconds: u64) -> Result<()> {
        self.line("countdown", &seconds.to_string()).await
    }

    async fn set_countdown(&self, seconds: u64) -> Result<()> {
        self.line("countdown", &seconds.to_string()).await
    }

    async fn hide_buttons(&self) -> Result<()> {
        self.line("buttons", "hidden").await
    }
}

#[async_trait]
impl<W: Write + Send> Navigator for TerminalView<W> {
    async fn navigate(&self, href: &str) -> Result<()> {
        self.line("navigate", href).await
    }

    async fn reload(&self) -> Result<()> {
        self.line("reload", "page").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_renders_lines() {
        let view = TerminalView::new(Vec::new());
        let green = ColorToken::new("green");

        view.set_indicator_text("Paid").await.unwrap();
        view.swap_indicator_color(None, Some(&green)).await.unwrap();
        view.show_action("Go to Homepage", "/").await.unwrap();
        view.navigate("/").await.unwrap();

        let output = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(
            output,
            "status: Paid\ncolor: green\naction: Go to Homepage -> /\nnavigate: /\n"
        );
    }
}
