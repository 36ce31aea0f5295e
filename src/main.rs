//! Note service entrypoint

use note_service::{
    auth::JwtService,
    config::AppConfig,
    db,
    middleware::AppState,
    repository::{PgNoteStore, PgUserStore},
    routes,
    services::{AuthService, NoteService},
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("note-service {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
    }

    // Load .env in development; production sets real environment variables
    dotenv::dotenv().ok();

    // 1. Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. Initialize logging
    telemetry::init_telemetry(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Note service starting...");

    // 3. Database pool + migrations
    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    tracing::info!("Database initialized");

    // 4. Build services over the Postgres stores
    let jwt_service = Arc::new(JwtService::from_config(&config)?);
    let user_store = Arc::new(PgUserStore::new(db_pool.clone()));
    let note_store = Arc::new(PgNoteStore::new(db_pool.clone()));

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db: db_pool,
        auth_service: Arc::new(AuthService::new(user_store, jwt_service)),
        note_service: Arc::new(NoteService::new(note_store)),
    });

    // 5. Build routes
    let app = routes::create_router(app_state);

    // 6. Start server
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 7. Graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}

fn print_help() {
    println!("note-service {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE:");
    println!("    note-service [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --version    Print version information");
    println!("    --help       Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    All settings come from NOTE_-prefixed environment variables,");
    println!("    e.g. NOTE_DATABASE__URL, NOTE_SECURITY__JWT_SECRET,");
    println!("    NOTE_SECURITY__TOKEN_TTL_SECS, NOTE_SERVER__ADDR.");
}
