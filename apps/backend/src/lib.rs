pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{JsonFileStore, LadderScheduler, ReviewStore, Scheduler, Vocabulary};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scheduler: Arc<Mutex<Scheduler>>,
    pub vocabulary: Arc<RwLock<Vocabulary>>,
    /// Pins the study day instead of reading the clock.
    pub fixed_today: Option<NaiveDate>,
}

impl AppState {
    /// Load vocabulary and review progress from the configured paths.
    pub fn from_config(config: Config) -> Self {
        let store = JsonFileStore::new(config.progress_path.clone());
        tracing::info!(path = %store.path().display(), "using review progress file");
        Self::with_store(config, Box::new(store))
    }

    /// Build state over an explicit progress store.
    pub fn with_store(config: Config, store: Box<dyn ReviewStore>) -> Self {
        let vocabulary = Vocabulary::load(&config.vocab_path, config.parse_mode);
        tracing::info!(
            path = %config.vocab_path.display(),
            items = vocabulary.len(),
            missions = vocabulary.missions().len(),
            "loaded vocabulary"
        );

        let algorithm = LadderScheduler::new(config.ladder.clone(), config.failure_policy);
        let scheduler = Scheduler::open(store, Box::new(algorithm), config.experience);

        Self {
            config: Arc::new(config),
            scheduler: Arc::new(Mutex::new(scheduler)),
            vocabulary: Arc::new(RwLock::new(vocabulary)),
            fixed_today: None,
        }
    }

    /// Current study day.
    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| clock::study_today(self.config.daily_reset_hour))
    }
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Study routes
        .route("/api/study/due", get(routes::study::due))
        .route("/api/study/review", post(routes::study::review))
        // Progress routes
        .route("/api/progress", get(routes::progress::summary))
        // Vocabulary routes
        .route("/api/vocabulary", get(routes::vocabulary::list))
        .route("/api/vocabulary/stats", get(routes::vocabulary::stats))
        .route("/api/vocabulary/reload", post(routes::vocabulary::reload))
        .route("/api/missions", get(routes::vocabulary::missions))
        // Settings routes
        .route("/api/settings", get(routes::settings::get_all))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr = config.addr();

    tracing::info!(
        progress = %config.progress_path.display(),
        policy = config.failure_policy.as_str(),
        rungs = config.ladder.len(),
        "Opening review progress..."
    );
    let state = AppState::from_config(config);

    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
