//! Inbound adapters translating transports into domain operations.
//!
//! - **http**: REST endpoints returning the uniform `{ok, error?}` envelope
//! - **ws**: WebSocket subscription streaming pending-order announcements

pub mod http;
pub mod ws;
