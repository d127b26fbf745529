use std::net::SocketAddr;
use std::sync::Arc;

use designsight_ai::config::{GeminiConfig, VisionConfig};
use designsight_ai::{GeminiClient, ScreenAnalyzer, VisionClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use designsight_api::config::{ServerConfig, UPLOAD_TIMEOUT_MARGIN_SECS};
use designsight_api::router::build_app_router;
use designsight_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "designsight_api=debug,designsight_ai=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        upload_dir = %config.upload_dir.display(),
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = designsight_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    designsight_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    designsight_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Upload directory ---
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .expect("Failed to create upload directory");

    // --- AI providers ---
    let vision_config = VisionConfig::from_env();
    let gemini_config = GeminiConfig::from_env();
    let ai_timeout_secs = vision_config.timeout_secs.max(gemini_config.timeout_secs);
    assert!(
        config.covers_ai_timeout(ai_timeout_secs),
        "REQUEST_TIMEOUT_SECS ({}) must be at least twice AI_TIMEOUT_SECS ({}) plus {}s",
        config.request_timeout_secs,
        ai_timeout_secs,
        UPLOAD_TIMEOUT_MARGIN_SECS,
    );

    let vision = VisionClient::new(&vision_config).expect("Failed to build vision client");
    let gemini = GeminiClient::new(&gemini_config).expect("Failed to build Gemini client");
    tracing::info!(model = %gemini.model(), "AI provider clients created");

    let analyzer = ScreenAnalyzer::new(Arc::new(vision), Arc::new(gemini));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        analyzer: Arc::new(analyzer),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
