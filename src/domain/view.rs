use super::event::ColorToken;
use serde::Serialize;
use std::collections::BTreeSet;

/// Status indicator pill.
///
/// `classes` holds every class on the element, not only the color, so that
/// swapping colors can be checked against unrelated classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndicatorState {
    pub text: Option<String>,
    pub classes: BTreeSet<String>,
    pub visible: bool,
}

impl IndicatorState {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageState {
    pub content: Option<String>,
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallToActionState {
    pub label: Option<String>,
    pub href: Option<String>,
    pub visible: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountdownState {
    pub seconds: Option<u64>,
    pub visible: bool,
}

/// The latest rendered projection of the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub indicator: IndicatorState,
    pub message: MessageState,
    pub action: CallToActionState,
    pub countdown: CountdownState,
    pub buttons_visible: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            indicator: IndicatorState::default(),
            message: MessageState::default(),
            action: CallToActionState::default(),
            countdown: CountdownState::default(),
            buttons_visible: true,
        }
    }
}

impl ViewState {
    /// Removes `previous` and applies `next` on the indicator in one step.
    pub fn swap_indicator_color(&mut self, previous: Option<&ColorToken>, next: Option<&ColorToken>) {
        if let Some(previous) = previous {
            self.indicator.classes.remove(previous.as_str());
        }
        if let Some(next) = next {
            self.indicator.classes.insert(next.as_str().to_string());
        }
    }
}
