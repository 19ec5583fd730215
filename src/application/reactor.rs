use crate::domain::event::{Action, CheckoutEvent, ColorToken, PaymentSessionEvent};
use crate::domain::ports::{NavigatorRef, StatusViewRef};
use crate::error::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

const TICK: Duration = Duration::from_secs(1);

/// Renders payment session notifications and drives the timed redirect.
///
/// The reactor owns the only mutable state of the checkout page: the color
/// currently applied to the status indicator and the pair of redirect timers.
/// Both timers live and die together; tearing the reactor down (explicitly or
/// by dropping it) aborts them before either can fire.
pub struct SessionReactor {
    view: StatusViewRef,
    navigator: NavigatorRef,
    applied_color: Option<ColorToken>,
    timers: Option<RedirectTimers>,
}

struct RedirectTimers {
    countdown: Option<JoinHandle<()>>,
    redirect: JoinHandle<()>,
}

impl RedirectTimers {
    fn cancel(self) {
        if let Some(countdown) = self.countdown {
            countdown.abort();
        }
        self.redirect.abort();
    }

    async fn settle(self) {
        // Aborted tasks resolve to a cancellation error, which is fine here.
        let _ = self.redirect.await;
        if let Some(countdown) = self.countdown {
            let _ = countdown.await;
        }
    }
}

impl SessionReactor {
    /// Creates a new `SessionReactor` rendering into `view`.
    pub fn new(view: StatusViewRef, navigator: NavigatorRef) -> Self {
        Self {
            view,
            navigator,
            applied_color: None,
            timers: None,
        }
    }

    /// The color currently applied to the status indicator.
    pub fn applied_color(&self) -> Option<&ColorToken> {
        self.applied_color.as_ref()
    }

    /// Whether a redirect is scheduled and has not completed yet.
    pub fn has_pending_redirect(&self) -> bool {
        self.timers
            .as_ref()
            .is_some_and(|timers| !timers.redirect.is_finished())
    }

    /// Consumes notifications until the channel closes, then waits for a
    /// scheduled redirect to complete.
    pub async fn run(mut self, mut events: mpsc::Receiver<CheckoutEvent>) {
        while let Some(event) = events.recv().await {
            if let Err(e) = self.apply(event).await {
                tracing::warn!("failed to render checkout event: {}", e);
            }
        }

        if let Some(timers) = self.timers.take() {
            tracing::debug!("notification channel closed, waiting for redirect");
            timers.settle().await;
        }
    }

    pub async fn apply(&mut self, event: CheckoutEvent) -> Result<()> {
        match event {
            CheckoutEvent::Submitted => self.view.hide_buttons().await,
            CheckoutEvent::Processed(event) => self.on_processed(event).await,
        }
    }

    /// Renders one status-change notification.
    ///
    /// Absent fields skip their step; an event without any field is a no-op.
    pub async fn on_processed(&mut self, event: PaymentSessionEvent) -> Result<()> {
        if event.is_empty() {
            tracing::debug!("ignoring empty payment session event");
            return Ok(());
        }

        if let Some(status) = &event.status_changed_to {
            self.render_status(status, event.indicator_color).await?;
        }

        if let Some(message) = &event.message {
            self.view.show_message(message).await?;
        }

        if let Some(action) = event.action {
            self.render_action(action).await?;
        }

        Ok(())
    }

    /// Cancels the countdown and the redirect together.
    pub fn teardown(&mut self) {
        if let Some(timers) = self.timers.take() {
            tracing::debug!("cancelling redirect timers");
            timers.cancel();
        }
    }

    async fn render_status(&mut self, status: &str, color: Option<ColorToken>) -> Result<()> {
        self.view.set_indicator_text(status).await?;
        if self.applied_color != color {
            self.view
                .swap_indicator_color(self.applied_color.as_ref(), color.as_ref())
                .await?;
            self.applied_color = color;
        }
        self.view.show_indicator().await?;
        tracing::info!(status, color = ?self.applied_color, "payment session status changed");
        Ok(())
    }

    async fn render_action(&mut self, action: Action) -> Result<()> {
        self.view.show_action(&action.label, &action.href).await?;
        self.view.focus_action().await?;

        let Some(delay) = action.redirect_after() else {
            return Ok(());
        };

        // A newer redirect supersedes whatever was scheduled before.
        self.teardown();

        let deadline = Instant::now() + delay;
        // Sub-second delays start at 1 so that 0 never shows before the redirect.
        let seconds = match delay.as_secs() {
            0 => seconds_left(deadline),
            whole => whole,
        };
        self.view.show_countdown(seconds).await?;

        let countdown = (seconds > 0).then(|| {
            let view = self.view.clone();
            tokio::spawn(run_countdown(view, deadline))
        });

        let navigator = self.navigator.clone();
        let href = action.href;
        let redirect = tokio::spawn(async move {
            time::sleep_until(deadline).await;
            tracing::info!(href = %href, "redirecting after countdown");
            if let Err(e) = navigator.navigate(&href).await {
                tracing::warn!("redirect to {} failed: {}", href, e);
            }
        });

        self.timers = Some(RedirectTimers {
            countdown,
            redirect,
        });
        Ok(())
    }
}

impl Drop for SessionReactor {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Updates the countdown once per second until it reaches zero at `deadline`.
///
/// Ticks are aligned to whole seconds before the deadline and each displayed
/// value is derived from the time left, so a drifting tick never makes the
/// display disagree with the redirect.
async fn run_countdown(view: StatusViewRef, deadline: Instant) {
    let remaining = deadline.saturating_duration_since(Instant::now());
    let first_tick = match remaining.as_millis() % TICK.as_millis() {
        0 => TICK,
        rest => Duration::from_millis(rest as u64),
    };

    let mut ticks = time::interval_at(Instant::now() + first_tick, TICK);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticks.tick().await;
        let seconds = seconds_left(deadline);
        if let Err(e) = view.set_countdown(seconds).await {
            tracing::warn!("failed to update redirect countdown: {}", e);
        }
        if seconds == 0 {
            break;
        }
    }
}

/// Whole seconds left until `deadline`, rounded up so that 0 is only shown
/// once the deadline has passed.
fn seconds_left(deadline: Instant) -> u64 {
    let millis = deadline.saturating_duration_since(Instant::now()).as_millis();
    millis.div_ceil(1000) as u64
}
