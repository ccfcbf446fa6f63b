//! DKM report server
//!
//! Serves the report form and turns submissions into Word documents.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dkm_api::{AppState, create_router};
use dkm_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dkm=debug,dkm_api=debug,dkm_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    info!(
        parse_mode = ?config.form.parse_mode,
        max_income_rows = config.form.max_income_rows,
        max_expense_rows = config.form.max_expense_rows,
        title = %config.template.title,
        "Configuration loaded"
    );

    let app = create_router(AppState::from_config(&config));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
