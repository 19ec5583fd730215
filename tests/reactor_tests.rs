mod common;

use common::{page, page_with_view, redirecting};
use paysession::domain::event::{Action, CheckoutEvent, PaymentSessionEvent};
use paysession::infrastructure::in_memory::InMemoryView;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

#[tokio::test]
async fn test_paid_shows_single_green_class() {
    let mut page = page_with_view(InMemoryView::with_indicator_classes(["indicator-pill"]));

    page.reactor
        .on_processed(PaymentSessionEvent::status("Paid", "green"))
        .await
        .unwrap();

    let state = page.view.snapshot().await;
    assert_eq!(state.indicator.text.as_deref(), Some("Paid"));
    assert!(state.indicator.visible);
    assert!(state.indicator.has_class("green"));
    assert!(state.indicator.has_class("indicator-pill"));
    assert_eq!(state.indicator.classes.len(), 2);
}

#[tokio::test]
async fn test_consecutive_colors_never_accumulate() {
    let mut page = page();

    page.reactor
        .on_processed(PaymentSessionEvent::status("Processing", "blue"))
        .await
        .unwrap();
    page.reactor
        .on_processed(PaymentSessionEvent::status("Declined", "red"))
        .await
        .unwrap();

    let state = page.view.snapshot().await;
    assert!(state.indicator.has_class("red"));
    assert!(!state.indicator.has_class("blue"));
    assert_eq!(state.indicator.classes.len(), 1);
    assert_eq!(page.reactor.applied_color().map(|c| c.as_str()), Some("red"));
}

#[tokio::test(start_paused = true)]
async fn test_countdown_and_redirect_timing() {
    let mut page = page();
    let start = Instant::now();

    page.reactor
        .on_processed(redirecting("/", 5000))
        .await
        .unwrap();

    let state = page.view.snapshot().await;
    assert_eq!(state.countdown.seconds, Some(5));
    assert!(state.countdown.visible);
    assert!(state.action.visible);
    assert!(state.action.focused);

    time::sleep(Duration::from_millis(4999)).await;
    assert!(page.navigator.navigations().await.is_empty());

    time::sleep(Duration::from_millis(1001)).await;

    let ticks: Vec<(u64, u64)> = page
        .view
        .countdown_ticks()
        .await
        .into_iter()
        .map(|(at, seconds)| ((at - start).as_millis() as u64, seconds))
        .collect();
    assert_eq!(
        ticks,
        vec![(1000, 4), (2000, 3), (3000, 2), (4000, 1), (5000, 0)]
    );

    let navigations = page.navigator.navigations().await;
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0].0 - start, Duration::from_millis(5000));
    assert_eq!(navigations[0].1, "/");
}

#[tokio::test(start_paused = true)]
async fn test_no_action_schedules_nothing() {
    let mut page = page();

    page.reactor
        .on_processed(PaymentSessionEvent::status("Processing", "yellow").with_message("Waiting"))
        .await
        .unwrap();
    assert!(!page.reactor.has_pending_redirect());

    time::sleep(Duration::from_secs(10)).await;

    let state = page.view.snapshot().await;
    assert!(!state.action.visible);
    assert!(!state.countdown.visible);
    assert!(page.view.countdown_ticks().await.is_empty());
    assert!(page.navigator.navigations().await.is_empty());
}

#[tokio::test]
async fn test_message_only_event() {
    let mut page = page();

    page.reactor
        .on_processed(PaymentSessionEvent::default().with_message("<b>Declined by bank</b>"))
        .await
        .unwrap();

    let state = page.view.snapshot().await;
    assert_eq!(state.message.content.as_deref(), Some("<b>Declined by bank</b>"));
    assert!(state.message.visible);
    assert_eq!(state.indicator, Default::default());
    assert_eq!(state.action, Default::default());
    assert_eq!(page.view.color_swaps().await, 0);
}

#[tokio::test]
async fn test_empty_event_is_noop() {
    let mut page = page();

    page.reactor
        .on_processed(PaymentSessionEvent::default())
        .await
        .unwrap();

    assert_eq!(page.view.snapshot().await, Default::default());
}

#[tokio::test]
async fn test_action_without_redirect() {
    let mut page = page();

    page.reactor
        .on_processed(
            PaymentSessionEvent::default().with_action(Action::new("Email Us", "mailto:shop@example.com")),
        )
        .await
        .unwrap();

    let state = page.view.snapshot().await;
    assert_eq!(state.action.label.as_deref(), Some("Email Us"));
    assert_eq!(state.action.href.as_deref(), Some("mailto:shop@example.com"));
    assert!(state.action.focused);
    assert!(!state.countdown.visible);
    assert!(!page.reactor.has_pending_redirect());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_before_deadline() {
    let mut page = page();

    page.reactor
        .on_processed(redirecting("/", 3000))
        .await
        .unwrap();
    time::sleep(Duration::from_millis(1500)).await;

    page.reactor.teardown();
    assert!(!page.reactor.has_pending_redirect());
    time::sleep(Duration::from_secs(5)).await;

    assert!(page.navigator.navigations().await.is_empty());
    assert_eq!(page.view.countdown_ticks().await.len(), 1);
    assert_eq!(page.view.snapshot().await.countdown.seconds, Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_run_drains_channel_and_waits_for_redirect() {
    let page = page();
    let view = page.view.clone();
    let navigator = page.navigator.clone();

    let (tx, rx) = mpsc::channel(4);
    let rendering = tokio::spawn(page.reactor.run(rx));

    tx.send(CheckoutEvent::Submitted).await.unwrap();
    tx.send(CheckoutEvent::Processed(redirecting("/orders", 2000)))
        .await
        .unwrap();
    drop(tx);

    rendering.await.unwrap();

    let state = view.snapshot().await;
    assert!(!state.buttons_visible);
    assert_eq!(state.countdown.seconds, Some(0));
    let hrefs: Vec<String> = navigator
        .navigations()
        .await
        .into_iter()
        .map(|(_, href)| href)
        .collect();
    assert_eq!(hrefs, vec!["/orders".to_string()]);
}
