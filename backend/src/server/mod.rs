//! Server construction: migrations, state assembly, and route wiring.

mod config;
mod state_builders;

pub use config::{Config, MailgunSettings};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::ws::state::WsState;
use crate::inbound::{http, ws};
use crate::middleware::Trace;
use crate::outbound::persistence::{DbPool, PoolConfig};
use state_builders::build_states;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply pending schema migrations over a blocking connection.
///
/// # Errors
/// Fails when the database is unreachable or a migration cannot be applied.
fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut connection = diesel::PgConnection::establish(database_url)
        .map_err(|err| std::io::Error::other(format!("database connection failed: {err}")))?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
    if !applied.is_empty() {
        info!(count = applied.len(), "applied schema migrations");
    }
    Ok(())
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    ws_state: web::Data<WsState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(ws_state)
        .wrap(Trace)
        .service(web::scope("/api").configure(http::configure))
        .service(ws::pending_orders)
        .service(ready)
        .service(live)
}

/// Run migrations, build the connection pool and services, and serve until
/// shutdown.
///
/// # Errors
/// Propagates [`std::io::Error`] from migrations, pool construction, or
/// binding the listener.
pub async fn run(config: Config) -> std::io::Result<()> {
    run_migrations(&config.database_url)?;

    let pool = DbPool::new(
        PoolConfig::new(&config.database_url).with_max_size(config.db_pool_size),
    )
    .await
    .map_err(|err| std::io::Error::other(err.to_string()))?;

    let (http_state, ws_state) = build_states(&config, pool);
    let http_state = web::Data::new(http_state);
    let ws_state = web::Data::new(ws_state);
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            ws_state.clone(),
        )
    })
    .bind(config.bind_addr)?
    .run();

    info!(addr = %config.bind_addr, "listening");
    health_state.mark_ready();
    server.await
}
