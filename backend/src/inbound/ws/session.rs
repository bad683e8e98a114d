//! Per-connection WebSocket handler.
//!
//! Keeps framing and heartbeats at the edge while the broadcast channel
//! supplies the events. The public contract pings every 5s and considers a
//! connection idle after 10s without client traffic. Tests shorten these
//! intervals to speed up feedback; adjust the constants below if SLAs change
//! so clients and intermediaries stay aligned.

use std::time::{Duration, Instant};

use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use serde::Serialize;
use tokio::time;
use tracing::warn;

use crate::domain::events::{OrderSnapshot, PendingOrderEvent};

/// Time between heartbeats to the client (5s in production, shorter in tests).
#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Max idle time before disconnecting the client (10s in production, shorter in tests).
#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

/// Frame delivered for each pending order addressed to the subscriber.
#[derive(Debug, Serialize)]
struct PendingOrderFrame {
    order: OrderSnapshot,
}

pub(super) async fn handle_ws_session(
    owner_id: i32,
    events: BoxStream<'static, PendingOrderEvent>,
    session: Session,
    stream: MessageStream,
) {
    WsSession::new(owner_id).run(events, session, stream).await;
}

enum SessionError {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    EventsClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    Network(Closed),
}

enum CloseAction {
    None,
    Close(Option<CloseReason>),
}

struct WsSession {
    owner_id: i32,
}

impl WsSession {
    fn new(owner_id: i32) -> Self {
        Self { owner_id }
    }

    async fn run(
        &self,
        mut events: BoxStream<'static, PendingOrderEvent>,
        mut session: Session,
        mut stream: MessageStream,
    ) {
        let mut last_heartbeat = Instant::now();
        let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

        loop {
            let result = tokio::select! {
                _ = heartbeat.tick() => {
                    self.handle_heartbeat_tick(&mut session, &last_heartbeat).await
                }
                event = events.next() => {
                    self.handle_event(&mut session, event).await
                }
                message = stream.recv() => {
                    self.handle_stream_message(&mut last_heartbeat, message)
                }
            };

            if let Err(error) = result {
                self.log_shutdown_reason(&error);
                let close_action = self.close_action_for(&error);
                self.close_session_if_needed(session, close_action).await;
                return;
            }
        }
    }

    async fn handle_heartbeat_tick(
        &self,
        session: &mut Session,
        last_heartbeat: &Instant,
    ) -> Result<(), SessionError> {
        if Instant::now().duration_since(*last_heartbeat) > CLIENT_TIMEOUT {
            return Err(SessionError::HeartbeatTimeout);
        }

        session.ping(b"").await.map_err(SessionError::Network)
    }

    async fn handle_event(
        &self,
        session: &mut Session,
        event: Option<PendingOrderEvent>,
    ) -> Result<(), SessionError> {
        let Some(event) = event else {
            return Err(SessionError::EventsClosed);
        };
        // Ownership filter applied at delivery time, per subscriber.
        if event.owner_id != self.owner_id {
            return Ok(());
        }
        let frame = PendingOrderFrame { order: event.order };
        self.send_json(session, &frame)
            .await
            .map_err(SessionError::Network)
    }

    fn handle_stream_message(
        &self,
        last_heartbeat: &mut Instant,
        message: Option<Result<Message, ProtocolError>>,
    ) -> Result<(), SessionError> {
        let Some(message) = message else {
            return Err(SessionError::StreamClosed);
        };

        match message {
            Ok(Message::Close(reason)) => Err(SessionError::ClientClosed(reason)),
            // The feed is one-way; any other client traffic only proves liveness.
            Ok(_) => {
                *last_heartbeat = Instant::now();
                Ok(())
            }
            Err(error) => Err(SessionError::Protocol(error)),
        }
    }

    async fn send_json<T: serde::Serialize>(
        &self,
        session: &mut Session,
        payload: &T,
    ) -> Result<(), Closed> {
        match serde_json::to_string(payload) {
            Ok(body) => session.text(body).await,
            Err(error) => {
                warn!(error = %error, "Failed to serialize WebSocket payload");
                Ok(())
            }
        }
    }

    fn log_shutdown_reason(&self, error: &SessionError) {
        match error {
            SessionError::HeartbeatTimeout => {
                warn!("WebSocket heartbeat timeout; closing connection");
            }
            SessionError::Protocol(error) => {
                warn!(error = %error, "WebSocket protocol error");
            }
            SessionError::Network(error) => {
                warn!(error = %error, "WebSocket send failed; closing connection");
            }
            SessionError::EventsClosed => {
                warn!("order event channel closed; ending subscription");
            }
            SessionError::ClientClosed(_) | SessionError::StreamClosed => {}
        }
    }

    fn close_action_for(&self, error: &SessionError) -> CloseAction {
        match error {
            SessionError::HeartbeatTimeout => CloseAction::Close(Some(CloseReason {
                code: CloseCode::Normal,
                description: Some("heartbeat timeout".to_owned()),
            })),
            SessionError::Protocol(_) => CloseAction::Close(Some(CloseReason {
                code: CloseCode::Protocol,
                description: Some("protocol error".to_owned()),
            })),
            SessionError::EventsClosed => CloseAction::Close(Some(CloseReason {
                code: CloseCode::Away,
                description: Some("feed closed".to_owned()),
            })),
            SessionError::ClientClosed(reason) => CloseAction::Close(reason.clone()),
            SessionError::StreamClosed | SessionError::Network(_) => CloseAction::None,
        }
    }

    async fn close_session_if_needed(&self, session: Session, close_action: CloseAction) {
        if let CloseAction::Close(reason) = close_action {
            if let Err(error) = session.close(reason).await {
                warn!(error = %error, "Failed to close WebSocket session");
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
