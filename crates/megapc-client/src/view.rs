//! # View Loading
//!
//! Holds the data behind one page and makes sure only the latest request
//! for it lands.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ViewSlot::new()          state = Loading, mounted                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   begin() ──► Ticket #1    state = Loading                              │
//! │   begin() ──► Ticket #2    (operator changed a filter)                  │
//! │        │                                                                │
//! │        ├── complete(#1, ..) ──► Stale    (superseded, dropped)          │
//! │        └── complete(#2, Ok) ──► Applied  state = Ready(data)            │
//! │                                                                         │
//! │   unmount() ──► every outstanding ticket becomes Stale                  │
//! │                                                                         │
//! │   Each ticket resolves to exactly one of data or error.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt::Display;
use tracing::debug;

/// What a page currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    /// Message shown in place of the page.
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            LoadState::Ready(value) => Ok(value),
            LoadState::Failed(message) => Err(message),
            LoadState::Loading => Err("still loading".to_string()),
        }
    }
}

/// Proof of an issued request, redeemed with [`ViewSlot::complete`].
///
/// Not `Clone`: completing consumes it, so a request resolves once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a ticket must be completed for its result to show"]
pub struct Ticket(u64);

/// Outcome of completing a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The result is now the slot's state.
    Applied,
    /// A newer request was issued or the view is gone; result dropped.
    Stale,
}

#[derive(Debug)]
pub struct ViewSlot<T> {
    name: &'static str,
    state: LoadState<T>,
    generation: u64,
    mounted: bool,
}

impl<T> ViewSlot<T> {
    /// A mounted slot that hasn't loaded anything yet.
    pub fn new(name: &'static str) -> Self {
        ViewSlot {
            name,
            state: LoadState::Loading,
            generation: 0,
            mounted: true,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn into_state(self) -> LoadState<T> {
        self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Starts a request; every earlier ticket is superseded.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = LoadState::Loading;
        Ticket(self.generation)
    }

    /// Applies the outcome of `ticket` if it is still the latest request
    /// of a mounted view.
    pub fn complete<E: Display>(&mut self, ticket: Ticket, result: Result<T, E>) -> Delivery {
        if !self.mounted || ticket.0 != self.generation {
            debug!(
                view = self.name,
                ticket = ticket.0,
                latest = self.generation,
                mounted = self.mounted,
                "Dropping stale response"
            );
            return Delivery::Stale;
        }

        self.state = match result {
            Ok(value) => LoadState::Ready(value),
            Err(err) => LoadState::Failed(err.to_string()),
        };
        Delivery::Applied
    }

    /// Like [`complete`](Self::complete), but replaces any error with a
    /// fixed operator-facing message.
    pub fn complete_or<E: Display>(
        &mut self,
        ticket: Ticket,
        result: Result<T, E>,
        message: &str,
    ) -> Delivery {
        let result = result.map_err(|err| {
            debug!(view = self.name, error = %err, "Load failed");
            message.to_string()
        });
        self.complete(ticket, result)
    }

    /// The view went away; outstanding results are dropped.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slot_is_loading() {
        let slot: ViewSlot<u32> = ViewSlot::new("dashboard");
        assert!(slot.state().is_loading());
        assert!(slot.is_mounted());
    }

    #[test]
    fn test_success_is_applied() {
        let mut slot = ViewSlot::new("dashboard");
        let ticket = slot.begin();
        assert_eq!(slot.complete(ticket, Ok::<_, String>(42)), Delivery::Applied);
        assert_eq!(slot.state().ready(), Some(&42));
    }

    #[test]
    fn test_error_is_applied() {
        let mut slot: ViewSlot<u32> = ViewSlot::new("dashboard");
        let ticket = slot.begin();
        slot.complete_or(ticket, Err("HTTP 500"), "Failed to load dashboard data");
        assert_eq!(
            slot.state(),
            &LoadState::Failed("Failed to load dashboard data".to_string())
        );
    }

    #[test]
    fn test_superseded_ticket_is_stale() {
        let mut slot = ViewSlot::new("catalogue");
        let first = slot.begin();
        let second = slot.begin();

        assert_eq!(slot.complete(first, Ok::<_, String>("old")), Delivery::Stale);
        assert!(slot.state().is_loading());

        assert_eq!(slot.complete(second, Ok::<_, String>("new")), Delivery::Applied);
        assert_eq!(slot.state().ready(), Some(&"new"));
    }

    #[test]
    fn test_unmount_drops_results() {
        let mut slot = ViewSlot::new("analytics");
        let ticket = slot.begin();
        slot.unmount();

        assert_eq!(slot.complete(ticket, Ok::<_, String>(7)), Delivery::Stale);
        assert!(slot.state().is_loading());
        assert!(!slot.is_mounted());
    }

    #[test]
    fn test_into_result() {
        assert_eq!(LoadState::Ready(3).into_result(), Ok(3));
        assert_eq!(
            LoadState::<u8>::Failed("boom".into()).into_result(),
            Err("boom".to_string())
        );
        assert!(LoadState::<u8>::Loading.into_result().is_err());
    }
}
