use mimalloc::MiMalloc;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use vitrine::mailer::{Mailer, Outbox};
use vitrine::server::{AppState, api_router, cors_layer};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &vitrine::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    if cfg.api_key.trim().is_empty() {
        warn!("API_KEY is not set; every protected endpoint will refuse requests");
    }

    let pool = vitrine::db::connect(&cfg.database_url).await?;
    vitrine::db::apply_schema(&pool).await?;
    info!(database_url = %cfg.database_url, "database ready");

    let mailer = Arc::new(Mailer::from_config(cfg));
    if !mailer.is_configured() {
        warn!("MailerSend is not fully configured; contact notifications will be dropped");
    }
    let outbox = Outbox::spawn(Arc::clone(&mailer), cfg.mailersend_send_thankyou);

    let api_key: Arc<str> = Arc::from(cfg.api_key.as_str());
    let state = AppState::new(pool.clone(), mailer, outbox, api_key);
    let app = api_router(state).layer(cors_layer(cfg));

    let addr = SocketAddr::from((cfg.listen_addr, cfg.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { /* ... */ },
        _ = terminate => { /* ... */ },
    }
}
