//! Shared WebSocket adapter state.

use std::sync::Arc;

use crate::domain::ports::OrderEventChannel;

/// Dependency bundle for WebSocket sessions.
#[derive(Clone)]
pub struct WsState {
    pub events: Arc<dyn OrderEventChannel>,
}

impl WsState {
    #[must_use]
    pub fn new(events: Arc<dyn OrderEventChannel>) -> Self {
        Self { events }
    }
}
