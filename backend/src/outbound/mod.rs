//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories via Diesel and `diesel-async`
//! - **auth**: JWT token signing and bcrypt credential hashing
//! - **email**: verification mail delivery over the Mailgun HTTP API
//! - **events**: in-process broadcast channel for order announcements
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations; business logic stays in the domain services.

pub mod auth;
pub mod email;
pub mod events;
pub mod persistence;
