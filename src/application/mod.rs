//! Application layer orchestrating the checkout page.
//!
//! `SessionReactor` renders payment session notifications received over a
//! `tokio` channel and owns the redirect timers. `ButtonDispatcher` turns a
//! payment button click into a single remote call.

pub mod dispatcher;
pub mod reactor;
