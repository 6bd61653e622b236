//! Snipshare Server — code snippet sharing platform
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use snipshare_core::config::AppConfig;
use snipshare_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("SNIPSHARE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Snipshare v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = snipshare_database::connection::DatabasePool::connect(&config.database).await?;
    let db_pool = db.into_pool();
    snipshare_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Cache ────────────────────────────────────────────
    let cache = Arc::new(snipshare_cache::MemoryCache::new(&config.cache));
    tracing::info!(
        capacity = config.cache.max_capacity,
        ttl_seconds = config.cache.time_to_live_seconds,
        "Cache initialized"
    );

    // ── Step 3: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(snipshare_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let snippet_repo = Arc::new(
        snipshare_database::repositories::snippet::SnippetRepository::new(db_pool.clone()),
    );
    let share_repo = Arc::new(
        snipshare_database::repositories::share::ShareTokenRepository::new(db_pool.clone()),
    );
    let log_repo = Arc::new(
        snipshare_database::repositories::access_log::ShareAccessLogRepository::new(
            db_pool.clone(),
        ),
    );
    let comment_repo = Arc::new(
        snipshare_database::repositories::comment::CommentRepository::new(db_pool.clone()),
    );
    let report_repo = Arc::new(
        snipshare_database::repositories::report::CommentReportRepository::new(db_pool.clone()),
    );
    let message_repo = Arc::new(
        snipshare_database::repositories::message::MessageRepository::new(db_pool.clone()),
    );
    let notification_repo = Arc::new(
        snipshare_database::repositories::notification::NotificationRepository::new(
            db_pool.clone(),
        ),
    );
    let settings_repo = Arc::new(
        snipshare_database::repositories::settings::SystemSettingRepository::new(db_pool.clone()),
    );

    // ── Step 4: Auth ─────────────────────────────────────────────
    let password_hasher = Arc::new(snipshare_auth::password::hasher::PasswordHasher::new());
    let jwt_encoder = Arc::new(snipshare_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(snipshare_auth::jwt::decoder::JwtDecoder::new(&config.auth));
    let policy = Arc::new(snipshare_auth::policy::Policy::new());

    // ── Step 5: Services ─────────────────────────────────────────
    let user_service = Arc::new(snipshare_service::user::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        config.auth.clone(),
    ));
    let admin_user_service = Arc::new(snipshare_service::user::AdminUserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&policy),
    ));
    let snippet_service = Arc::new(snipshare_service::snippet::SnippetService::new(
        Arc::clone(&snippet_repo),
        Arc::clone(&policy),
    ));
    let share_service = Arc::new(snipshare_service::share::ShareService::new(
        Arc::clone(&share_repo),
        Arc::clone(&log_repo),
        Arc::clone(&snippet_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&policy),
    ));
    let access_validator = Arc::new(snipshare_service::share::AccessValidator::new(
        Arc::clone(&share_repo),
        Arc::clone(&log_repo),
        Arc::clone(&snippet_repo),
        Arc::clone(&password_hasher),
    ));
    let notification_service = Arc::new(snipshare_service::notification::NotificationService::new(
        Arc::clone(&notification_repo),
        Arc::clone(&user_repo),
        Arc::clone(&policy),
    ));
    let comment_service = Arc::new(snipshare_service::comment::CommentService::new(
        Arc::clone(&comment_repo),
        Arc::clone(&report_repo),
        Arc::clone(&snippet_repo),
        Arc::clone(&notification_service),
        Arc::clone(&cache),
        Arc::clone(&policy),
    ));
    let message_service = Arc::new(snipshare_service::message::MessageService::new(
        Arc::clone(&message_repo),
        Arc::clone(&user_repo),
        Arc::clone(&notification_service),
        Arc::clone(&cache),
    ));
    let settings_service = Arc::new(snipshare_service::settings::SettingsService::new(
        Arc::clone(&settings_repo),
        Arc::clone(&cache),
        Arc::clone(&policy),
    ));
    tracing::info!("Services initialized");

    // ── Step 6: Maintenance worker ───────────────────────────────
    let mut scheduler = if config.worker.enabled {
        let jobs = Arc::new(snipshare_worker::jobs::CleanupJobs::new(
            Arc::clone(&share_repo),
            Arc::clone(&log_repo),
            Arc::clone(&notification_repo),
            config.worker.clone(),
        ));
        let scheduler = snipshare_worker::MaintenanceScheduler::new(jobs).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Maintenance worker disabled");
        None
    };

    // ── Step 7: HTTP server ──────────────────────────────────────
    let app_state = snipshare_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        cache,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        policy,
        user_service,
        admin_user_service,
        snippet_service,
        share_service,
        access_validator,
        comment_service,
        message_service,
        notification_service,
        settings_service,
    };

    let app = snipshare_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Snipshare server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 8: Drain background tasks ───────────────────────────
    if let Some(ref mut scheduler) = scheduler {
        let _ = scheduler.shutdown().await;
    }

    tracing::info!("Snipshare server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
