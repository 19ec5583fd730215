#![allow(dead_code)]

use paysession::application::reactor::SessionReactor;
use paysession::domain::event::{Action, PaymentSessionEvent};
use paysession::infrastructure::in_memory::{InMemoryView, RecordingNavigator};
use std::sync::Arc;

pub struct Page {
    pub reactor: SessionReactor,
    pub view: InMemoryView,
    pub navigator: RecordingNavigator,
}

pub fn page() -> Page {
    page_with_view(InMemoryView::new())
}

pub fn page_with_view(view: InMemoryView) -> Page {
    let navigator = RecordingNavigator::new();
    let reactor = SessionReactor::new(Arc::new(view.clone()), Arc::new(navigator.clone()));
    Page {
        reactor,
        view,
        navigator,
    }
}

pub fn redirecting(href: &str, millis: u64) -> PaymentSessionEvent {
    PaymentSessionEvent::status("Paid", "green")
        .with_message("<p>Charge succeeded</p>")
        .with_action(Action::new("Go to Homepage", href).with_redirect_after(millis))
}
