use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::fmt::format::FmtSpan;

use kiwz_trust::{
    api::{create_trust_router, TrustApiState},
    config::TrustConfig,
    TrustManager,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first - this validates the scoring policy
    let config = TrustConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        eprintln!("Please check KIWZ_* environment variables.");
        e
    })?;

    init_logging(&config)?;

    info!("Starting KIWZ Trust Engine");
    info!(
        "Scoring policy: credit base {}, investment base {}, transaction base {}, review every {} days",
        config.scoring.base_credit_limit,
        config.scoring.base_investment_limit,
        config.scoring.base_transaction_limit,
        config.scoring.review_period_days
    );

    let manager = Arc::new(RwLock::new(TrustManager::new(config.scoring.to_policy())));

    let admin_api_key = std::env::var("KIWZ_ADMIN_API_KEY").ok();
    if admin_api_key.is_none() {
        warn!("KIWZ_ADMIN_API_KEY not set - policy updates will be rejected");
    }

    let app = Router::new()
        .nest(
            "/trust",
            create_trust_router(TrustApiState {
                manager: manager.clone(),
                admin_api_key,
            }),
        )
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http());

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", bind_addr, e))?;

    info!("Trust engine listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize logging from the configured level
fn init_logging(config: &TrustConfig) -> Result<()> {
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(if config.logging.log_requests {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set logging subscriber: {}", e))?;

    Ok(())
}
