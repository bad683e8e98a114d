//! WebSocket inbound adapter streaming pending-order announcements.
//!
//! Responsibilities:
//! - authenticate the upgrade request (token in the query string, since
//!   browsers cannot attach headers to WebSocket handshakes)
//! - gate the subscription to restaurant owners
//! - initialise the per-connection session loop

use actix_web::web::{self, Payload};
use actix_web::{HttpRequest, HttpResponse, get};
use serde::Deserialize;
use tracing::error;

use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;

mod session;

pub mod state;

#[derive(Debug, Deserialize)]
struct SubscribeQuery {
    token: String,
}

/// Handle WebSocket upgrade for the pending-orders feed.
///
/// Authentication failures are rejected before the upgrade, so they surface
/// as plain 401/403 responses rather than envelope payloads.
#[get("/ws/pending-orders")]
pub async fn pending_orders(
    http_state: web::Data<HttpState>,
    ws_state: web::Data<state::WsState>,
    query: web::Query<SubscribeQuery>,
    req: HttpRequest,
    stream: Payload,
) -> actix_web::Result<HttpResponse> {
    let context = resolve_subscriber(&http_state, &query.token).await;
    let owner = context.require("pending_orders").map_err(actix_web::Error::from)?;
    let owner_id = owner.id;

    let (response, session, message_stream) = actix_ws::handle(&req, stream).map_err(|err| {
        error!(error = %err, "WebSocket upgrade failed");
        err
    })?;

    let events = ws_state.events.subscribe_pending();
    actix_web::rt::spawn(session::handle_ws_session(
        owner_id,
        events,
        session,
        message_stream,
    ));

    Ok(response)
}

async fn resolve_subscriber(state: &HttpState, token: &str) -> AuthContext {
    let user_id = match state.tokens.verify(token) {
        Ok(id) => id,
        Err(err) => {
            tracing::debug!(error = %err, "rejected subscription token");
            return AuthContext::anonymous();
        }
    };
    match state.accounts.find_by_id(user_id).await {
        Ok(user) => AuthContext::authenticated(user),
        Err(err) => {
            tracing::debug!(error = %err, "subscription token names an unknown user");
            AuthContext::anonymous()
        }
    }
}
