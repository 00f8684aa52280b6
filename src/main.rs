mod config;
mod game;
mod models;
mod routes;
mod utils;
mod websocket;
mod words;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use config::Config;
use dashmap::DashMap;
use game::Round;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use words::WordList;

/// How often the retention task scans for expired rounds
pub const ROUND_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// A round created over the HTTP API, retained for refetch until it expires
pub struct StoredRound {
    pub round: Round,
    pub created_at: DateTime<Utc>,
    pub stored_at: Instant,
}

impl StoredRound {
    /// Whether the round has outlived the configured retention window
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.stored_at) > ttl
    }
}

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub words: WordList,
    /// Rounds created over the HTTP API, keyed by round id
    pub rounds: DashMap<Uuid, StoredRound>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_search_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting word search backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load target words
    let word_list = match WordList::load(&config.game.word_list_path).await {
        Ok(words) if !words.is_empty() => {
            tracing::info!("Word list ready ({} words)", words.len());
            words
        }
        Ok(_) => {
            tracing::warn!(
                "Word list at {} has no usable words. Using built-in default words.",
                config.game.word_list_path
            );
            WordList::default_words()
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load word list from {}: {}. Using built-in default words.",
                config.game.word_list_path,
                e
            );
            WordList::default_words()
        }
    };

    // Create application state
    let state = Arc::new(AppState {
        config: config.clone(),
        words: word_list,
        rounds: DashMap::new(),
    });

    // Spawn background task to evict expired rounds
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        round_cleanup_task(cleanup_state).await;
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Serve frontend static files
    let frontend_service = ServeDir::new("./frontend");

    // Build router
    let app = Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        // API routes
        .merge(routes::create_routes())
        .fallback_service(frontend_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Background task that periodically evicts rounds past their retention TTL
async fn round_cleanup_task(state: Arc<AppState>) {
    let ttl = Duration::from_secs(state.config.game.round_ttl_secs);
    let mut interval = tokio::time::interval(ROUND_SWEEP_INTERVAL);

    loop {
        interval.tick().await;

        let now = Instant::now();
        let expired: Vec<Uuid> = state
            .rounds
            .iter()
            .filter(|entry| entry.is_expired(now, ttl))
            .map(|entry| *entry.key())
            .collect();

        for round_id in expired {
            if state.rounds.remove(&round_id).is_some() {
                tracing::info!("Removed expired round {}", round_id);
            }
        }
    }
}
