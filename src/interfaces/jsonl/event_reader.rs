use crate::domain::event::CheckoutEvent;
use crate::error::{Result, SessionError};
use std::io::BufRead;

/// Reads checkout events from a JSON Lines source.
///
/// Each non-blank line holds one event tagged with `"event"`. Lines are
/// decoded independently, so a malformed line yields an error without
/// stopping the stream.
pub struct EventReader<R: BufRead> {
    source: R,
}

impl<R: BufRead> EventReader<R> {
    /// Creates a new `EventReader` from any buffered source (e.g., a file or stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Returns an iterator that lazily reads and deserializes events.
    pub fn events(self) -> impl Iterator<Item = Result<CheckoutEvent>> {
        self.source.lines().filter_map(|line| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(serde_json::from_str(&line).map_err(SessionError::from)),
            Err(e) => Some(Err(SessionError::from(e))),
        })
    }
}
