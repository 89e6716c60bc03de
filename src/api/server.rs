use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::users;
use crate::api::ws;
use crate::config::{AppConfig, RegistrationConfig};
use crate::db::{self, UserStore};
use crate::registration::{Argon2Hasher, Registrar};

pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub registrar: Registrar,
}

impl AppState {
    /// Registrar stores passwords as submitted.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            registrar: Registrar::new(store.clone()),
            store,
        }
    }

    pub fn from_config(store: Arc<dyn UserStore>, config: &RegistrationConfig) -> Self {
        let mut registrar = Registrar::new(store.clone());
        if config.hash_passwords {
            registrar = registrar.with_hasher(Arc::new(Argon2Hasher));
        }

        Self { store, registrar }
    }
}

/// Which front ends a process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontends {
    Both,
    Http,
    Socket,
}

pub fn http_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(users::list_users))
        .route("/user", post(users::create_user))
        .route("/health", get(|| async { "OK" }))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Every path on the socket port is an upgrade endpoint.
pub fn ws_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(ws::ws_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve(name: &str, host: &str, port: u16, app: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    info!("{} server running on {}", name, listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("{} server stopped", name);
    Ok(())
}

pub async fn serve_http(host: &str, port: u16, state: Arc<AppState>) -> std::io::Result<()> {
    serve("HTTP", host, port, http_router(state)).await
}

pub async fn serve_ws(host: &str, port: u16, state: Arc<AppState>) -> std::io::Result<()> {
    serve("WebSocket", host, port, ws_router(state)).await
}

/// Open the store, serve until Ctrl-C, then close the store.
pub async fn run(config: AppConfig, frontends: Frontends) -> anyhow::Result<()> {
    let store = db::open_store(&config.database).await?;
    info!(url = %config.database.url, "user store opened");

    let state = Arc::new(AppState::from_config(store.clone(), &config.registration));
    let host = config.server.host.as_str();

    let result = match frontends {
        Frontends::Both => tokio::try_join!(
            serve_http(host, config.server.http_port, state.clone()),
            serve_ws(host, config.server.ws_port, state),
        )
        .map(|_| ()),
        Frontends::Http => serve_http(host, config.server.http_port, state).await,
        Frontends::Socket => serve_ws(host, config.server.ws_port, state).await,
    };

    store.close().await;
    info!("user store closed");

    Ok(result?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
