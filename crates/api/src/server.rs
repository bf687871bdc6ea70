//! Server configuration and startup.

use crate::routes::create_router;
use crate::state::AppState;
use axum::Router;
use risk_sim_simulation::config::{DEFAULT_MAX_MATRIX_CELLS, EngineConfig};
use risk_sim_simulation::price_path::{ANNUAL_DRIFT, GbmModel, TRADING_DAYS_PER_YEAR};
use risk_sim_simulation::sampler::SamplerKind;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Engine configuration shared by all requests.
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads configuration from `RISK_SIM_*` environment variables.
    ///
    /// Missing variables take their defaults; malformed ones are logged
    /// and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("RISK_SIM_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, "RISK_SIM_PORT", DEFAULT_PORT);
        let max_cells = parse_or(&lookup, "RISK_SIM_MAX_CELLS", DEFAULT_MAX_MATRIX_CELLS);
        let sampler = parse_or(&lookup, "RISK_SIM_SAMPLER", SamplerKind::default());

        let drift = parse_or(&lookup, "RISK_SIM_DRIFT", ANNUAL_DRIFT);
        let trading_days = parse_or(&lookup, "RISK_SIM_TRADING_DAYS", TRADING_DAYS_PER_YEAR);
        let model = GbmModel::new(drift, trading_days).unwrap_or_else(|e| {
            warn!(error = %e, "Invalid model overrides, using defaults");
            GbmModel::default()
        });

        Self {
            host,
            port,
            engine: EngineConfig::default()
                .with_model(model)
                .with_max_matrix_cells(max_cells)
                .with_sampler(sampler),
        }
    }

    /// `host:port` string to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!(key, value = %raw, error = %e, "Ignoring malformed setting");
            default
        }),
    }
}

/// HTTP server wrapping the simulation engine.
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Creates a server from `config`.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::new(config.engine);
        Self { config, state }
    }

    /// Builds the router without binding.
    #[must_use]
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Binds and serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the address cannot be bound or the server
    /// fails while running.
    pub async fn run(self) -> std::io::Result<()> {
        let addr = self.config.bind_address();
        let listener = TcpListener::bind(&addr).await?;
        info!(
            address = %addr,
            sampler = %self.config.engine.sampler,
            max_matrix_cells = self.config.engine.max_matrix_cells,
            "Risk simulator API listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
