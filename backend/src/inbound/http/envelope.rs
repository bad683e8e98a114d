//! Uniform `{ok, error?}` response envelope.
//!
//! Every operation answers 200 with `ok` signalling success; failures carry
//! the domain message in `error`. Payload fields are flattened beside `ok` so
//! clients read `{"ok": true, "token": "..."}` rather than a nested wrapper.

use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::json;

use crate::domain::Error;

#[derive(Debug, Serialize)]
struct SuccessEnvelope<T: Serialize> {
    ok: bool,
    #[serde(flatten)]
    data: T,
}

fn success_value(data: impl Serialize) -> serde_json::Value {
    serde_json::to_value(SuccessEnvelope { ok: true, data })
        .unwrap_or_else(|_| json!({"ok": true}))
}

fn failure_value(error: &Error) -> serde_json::Value {
    json!({"ok": false, "error": error.message()})
}

/// Successful response carrying a flattened payload.
pub fn ok(data: impl Serialize) -> HttpResponse {
    HttpResponse::Ok().json(success_value(data))
}

/// Successful response with no payload beyond `ok`.
pub fn ok_empty() -> HttpResponse {
    HttpResponse::Ok().json(json!({"ok": true}))
}

/// Failed operation; still status 200 with `ok: false`.
pub fn fail(error: &Error) -> HttpResponse {
    HttpResponse::Ok().json(failure_value(error))
}

/// Fold an operation result into the envelope.
pub fn respond<T: Serialize>(result: Result<T, Error>) -> HttpResponse {
    match result {
        Ok(data) => ok(data),
        Err(error) => fail(&error),
    }
}

/// Fold a payload-less operation result into the envelope.
pub fn respond_empty(result: Result<(), Error>) -> HttpResponse {
    match result {
        Ok(()) => ok_empty(),
        Err(error) => fail(&error),
    }
}
