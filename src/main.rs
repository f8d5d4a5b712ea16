use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use blog_server::auth::CookieSigner;
use blog_server::blog::Blog;
use blog_server::config::Config;
use blog_server::db::Database;
use blog_server::mail::{spawn_worker, ContactQueue, Mailer};
use blog_server::web::{self, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    init_tracing()?;

    info!("Starting blog-server");

    // Load and validate configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(database = ?config.database, "Configuration loaded");

    if config.uses_default_secret() {
        warn!("SECRET_KEY is not set; using the development default key");
    }

    // Initialize database
    let db = Database::connect(&config.database)
        .await
        .context("Failed to initialize database")?;

    info!("Database initialized");

    let signer =
        CookieSigner::new(&config.secret_key).context("Failed to set up cookie signing")?;

    // Contact mail delivery
    let mailer = Mailer::new(&config).context("Failed to set up mailer")?;

    let (contact, contact_rx) = ContactQueue::channel(config.contact_queue_capacity);
    let worker_handle = spawn_worker(contact_rx, mailer);

    let state = AppState {
        blog: Blog::new(db),
        config: Arc::new(config),
        signer,
        contact,
    };

    // Serve until a shutdown signal arrives
    web::serve(state, shutdown_signal()).await?;

    info!("Shutting down...");

    // The router (and with it every queue sender) is gone, so the worker
    // finishes whatever is still queued and exits.
    if let Err(e) = worker_handle.await {
        warn!("Contact mail worker ended abnormally: {e}");
    }

    info!("Shutdown complete");

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,blog_server=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    if use_json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        // Pretty-printed logging for development
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
