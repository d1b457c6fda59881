//! Application startup and lifecycle management.

use crate::config::LookConfig;
use crate::handlers::{analyze_look, health_check};
use crate::services::providers::gemini::{GeminiConfig, GeminiProvider};
use crate::services::ContentProvider;
use axum::{
    middleware::from_fn,
    routing::{any, get},
    Router,
};
use secrecy::SecretString;
use service_core::error::AppError;
use service_core::middleware::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. Nothing here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub api_key: Option<Arc<SecretString>>,
    pub provider: Arc<dyn ContentProvider>,
    /// Enforced by the analyze handler after its method and key checks.
    pub max_body_bytes: usize,
}

impl AppState {
    /// State backed by the real Gemini provider.
    pub fn from_config(config: LookConfig) -> Result<Self, AppError> {
        let provider = GeminiProvider::new(GeminiConfig::from(&config.gemini))
            .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

        tracing::info!(
            model = %config.gemini.model,
            api_key_present = config.gemini.api_key.is_some(),
            "Initialized Gemini provider"
        );

        Ok(Self {
            api_key: config.gemini.api_key.map(Arc::new),
            provider: Arc::new(provider),
            max_body_bytes: config.max_body_bytes,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/analyze-look", any(analyze_look))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application and bind the listener (port 0 = random port).
    pub async fn build(config: LookConfig) -> Result<Self, AppError> {
        let port = config.common.port;
        let state = AppState::from_config(config)?;

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Look service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM, letting in-flight requests finish.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
