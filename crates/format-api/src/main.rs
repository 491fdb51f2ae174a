//! format-api - HTTP API server for the FormAT assistant

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use format_ai::{KnowledgeCache, KnowledgeTrainer, QueryAssistant};
use format_core::defaults;
use format_db::{Database, PoolConfig};
use format_jobs::{Scheduler, SchedulerConfig, SchedulerEvent};
use format_search::WebSearchClient;
use format_translate::TranslationEngine;

use format_api::{cors_layer, router, AppState, TrainingTask};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "format_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "format_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("format-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DATABASE_URL.to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults::SERVER_PORT);

    let db = Database::connect_with_config(&database_url, PoolConfig::from_env()).await?;
    db.migrate().await?;
    info!("Database migrations applied");

    let knowledge = Arc::new(db.knowledge.clone());
    let training = Arc::new(db.training.clone());
    let history = Arc::new(db.history.clone());
    let search = Arc::new(WebSearchClient::from_env()?);
    let translator = Arc::new(TranslationEngine::from_env()?);
    let cache = Arc::new(KnowledgeCache::new());

    let assistant = Arc::new(QueryAssistant::new(
        knowledge.clone(),
        training.clone(),
        search.clone(),
        cache.clone(),
    ));
    let seeded = assistant.initialize().await?;
    info!(seeded, providers = ?translator.provider_names(), "Assistant ready");

    let scheduler_config = SchedulerConfig::from_env();
    let trainer = Arc::new(KnowledgeTrainer::new(knowledge, training, cache));
    let scheduler = Scheduler::new(scheduler_config.clone()).with_task(TrainingTask::new(
        trainer,
        scheduler_config.training_interval,
    ));
    let mut scheduler_events = scheduler.events();
    let scheduler = scheduler.start();

    tokio::spawn(async move {
        while let Ok(event) = scheduler_events.recv().await {
            if let SchedulerEvent::TaskCompleted { summary: Some(summary), .. } = &event {
                debug!(summary = %summary, "Scheduled task summary");
            }
        }
    });

    let state = AppState {
        assistant,
        search,
        translator,
        history,
    };

    let cors_origins = std::env::var("CORS_ALLOWED_ORIGINS").ok();
    let app = router(state).layer(cors_layer(cors_origins.as_deref()));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
