//! PhishGuard API Server binary
//!
//! Loads the classifier named by `MODEL_PATH` and serves the prediction API.

use anyhow::Context;
use phishguard_core::{load_classifier, PredictionService};
use phishguard_server::{config::LogFormat, create_router, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(format: LogFormat) {
    let (json, pretty) = match format {
        LogFormat::Json => (Some(tracing_subscriber::fmt::layer().json()), None),
        LogFormat::Pretty => (None, Some(tracing_subscriber::fmt::layer())),
    };

    // `log` records from phishguard-core are bridged by `init`
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "phishguard_server=debug,phishguard_core=info,tower_http=debug".into()))
        .with(json)
        .with(pretty)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("invalid configuration")?;

    init_tracing(config.log_format);
    tracing::info!("PhishGuard API starting ({})...", config.environment);

    let service = match load_classifier(&config.model_path) {
        Ok(model) => PredictionService::from_loaded(model),
        Err(e) if config.allow_missing_model => {
            tracing::error!("Model unavailable, serving degraded: {}", e);
            PredictionService::unavailable()
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("failed to load model from {}", config.model_path.display())
            });
        }
    };

    let status = service.status();
    if let Some(model) = &status.model {
        tracing::info!(
            "Model: {} [{} bytes, sha256 {}]",
            model.description,
            model.size_bytes,
            model.sha256
        );
    }
    tracing::info!(
        "Feature layout v{} ({} features, hash {:08x})",
        status.feature_layout.version,
        status.feature_layout.feature_count,
        status.feature_layout.hash
    );

    let addr = config.socket_addr();
    let app = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await
        .context("server error")?;

    Ok(())
}
