use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use orgmanage::auth::token::TokenIssuer;
use orgmanage::config::Config;
use orgmanage::server::{AppState, api_router};
use orgmanage::service::ensure_default_admin;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        port = cfg.port,
        loglevel = %cfg.loglevel,
    );

    // a store connection failure here aborts startup; later failures are
    // fatal to individual requests only
    let pool = orgmanage::db::connect(&cfg.database_url).await?;
    orgmanage::db::init_schema(&pool).await?;

    let state = AppState::new(pool, TokenIssuer::new(&cfg.jwt_secret));
    ensure_default_admin(&state.users).await;

    let app = api_router(state);

    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
