//! # Console Pages
//!
//! One module per page. Each exposes:
//!
//! - `fetch(api, ..)`: the page's requests and view-model shaping, as a
//!   `ConsoleResult`
//! - `load(api, ..)`: `fetch` run through a [`ViewSlot`], yielding the
//!   `LoadState` the page shows
//!
//! ## Page Flow
//! ```text
//! ┌──────────┐  begin()   ┌──────────┐  fetch  ┌──────────────┐
//! │ Loading  │ ─────────► │ ticket   │ ──────► │ complete(..) │
//! └──────────┘            └──────────┘         └──────┬───────┘
//!                                                     │
//!                     ┌───────────────────────────────┼────────────────┐
//!                     ▼                               ▼                ▼
//!               Ready(view)                 Failed(page message)  Failed(validation
//!                                                                      message)
//! ```
//!
//! Validation errors keep their text so the operator can fix the flag;
//! every other failure becomes the page's fixed message.

pub mod analytics;
pub mod catalogue;
pub mod dashboard;
pub mod products;
pub mod sales;
pub mod settings;

use megapc_client::{LoadState, ViewSlot};
use std::future::Future;

use crate::error::{ConsoleError, ConsoleResult, ErrorCode};

/// Runs one page load through a fresh view slot.
pub async fn load_view<T, Fut>(name: &'static str, failure: &str, fetch: Fut) -> LoadState<T>
where
    Fut: Future<Output = ConsoleResult<T>>,
{
    let mut slot = ViewSlot::new(name);
    let ticket = slot.begin();
    match fetch.await {
        Err(err) if err.code == ErrorCode::ValidationError => {
            slot.complete(ticket, Err(err.message))
        }
        result => slot.complete_or(ticket, result, failure),
    };
    slot.into_state()
}

/// Turns what a page shows into the process outcome.
///
/// `failure` is the page's fixed message; any other failure text came from
/// a rejected parameter and keeps the validation code.
pub fn settle<T>(state: LoadState<T>, failure: &str) -> ConsoleResult<T> {
    state.into_result().map_err(|message| {
        if message == failure {
            ConsoleError::load_failed(message)
        } else {
            ConsoleError::validation(message)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_view_ready() {
        let state = load_view("test", "Failed", async { Ok::<_, ConsoleError>(5) }).await;
        assert_eq!(state, LoadState::Ready(5));
    }

    #[tokio::test]
    async fn test_load_view_replaces_fetch_errors() {
        let state: LoadState<u8> = load_view("test", "Failed to load test data", async {
            Err(ConsoleError::load_failed("Could not reach /test"))
        })
        .await;
        assert_eq!(state, LoadState::Failed("Failed to load test data".into()));
    }

    #[tokio::test]
    async fn test_load_view_keeps_validation_message() {
        let state: LoadState<u8> = load_view("test", "Failed to load test data", async {
            Err(ConsoleError::validation("days must be between 1 and 365"))
        })
        .await;
        assert_eq!(
            state,
            LoadState::Failed("days must be between 1 and 365".into())
        );
    }

    const FAILURE: &str = "Failed to load sales data";

    #[test]
    fn test_settle() {
        assert_eq!(settle(LoadState::Ready(1), FAILURE).unwrap(), 1);
        let err = settle(LoadState::<u8>::Failed(FAILURE.into()), FAILURE).unwrap_err();
        assert_eq!(err.code, ErrorCode::LoadFailed);
        assert_eq!(err.message, FAILURE);
    }

    #[tokio::test]
    async fn test_rejected_parameter_keeps_validation_code() {
        let state: LoadState<u8> = load_view("sales", FAILURE, async {
            Err(ConsoleError::validation("days must be positive"))
        })
        .await;
        let err = settle(state, FAILURE).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.code.exit_code(), 2);
        assert_eq!(err.message, "days must be positive");
    }
}
