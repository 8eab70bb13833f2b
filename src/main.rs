//! PC Advisor - conversational PC build recommender API
//!
//! Walks a user through a short guided chat (use case, needs, budget),
//! validates what they type, spots buyer personas along the way and answers
//! with three tiered builds checked for part compatibility.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod builds;
mod config;
mod conversation;
mod core;
mod providers;
mod routes;
mod validation;

use crate::config::Config;
use crate::core::{ChatEngine, SessionStore};
use crate::providers::MockResponder;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pc_advisor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let store = Arc::new(SessionStore::new(&config.data_dir.join("advisor.db")).await?);

    let responder = Arc::new(MockResponder::new(&config.advisor.responder));
    if responder.is_simulating_network_error() {
        tracing::warn!("🧪 Responder is simulating network errors");
    }

    let chat_engine = Arc::new(ChatEngine::new(config.advisor.clone(), responder, store));

    let state = AppState {
        config,
        chat_engine,
    };

    let app = Router::new()
        .merge(routes::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("🖥️ PC Advisor API running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
