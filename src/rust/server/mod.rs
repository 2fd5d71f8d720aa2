//! HTTP prediction service.
//!
//! ```text
//! POST /predict   {"problem": "..."} -> {"specialization": "..."}
//! GET  /health    -> {"status": "ML service is running"}
//! ```
//!
//! The trained model, when available, is loaded once at startup and injected
//! into the router state. Without it every prediction goes through the keyword
//! classifier.

mod api;

use std::io;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::classifier::{self, ClassifierError, ModelArtifacts, SpecialistPredictor};
use crate::config::ServiceConfig;
use crate::Specialization;

pub use api::{
    ErrorResponse, HealthResponse, PredictRequest, PredictResponse, HEALTH_STATUS, PROBLEM_REQUIRED,
};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },
    #[error("Server error: {0}")]
    Serve(#[from] io::Error),
}

/// Which path produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSource {
    Model,
    Keywords,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Keywords => "keywords",
        }
    }
}

/// Router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone; the predictor is reference-counted and never mutated.
#[derive(Clone, Default)]
pub struct AppState {
    predictor: Option<Arc<dyn SpecialistPredictor>>,
}

impl AppState {
    pub fn new(predictor: Option<Arc<dyn SpecialistPredictor>>) -> Self {
        Self { predictor }
    }

    /// State backed by loaded artifacts, or keyword-only when `None`.
    pub fn from_artifacts(artifacts: Option<ModelArtifacts>) -> Self {
        Self::new(artifacts.map(|a| Arc::new(a) as Arc<dyn SpecialistPredictor>))
    }

    pub fn keyword_only() -> Self {
        Self::default()
    }

    pub fn has_model(&self) -> bool {
        self.predictor.is_some()
    }

    /// Routes `problem` through the model when one is loaded, otherwise through the keyword table.
    pub fn predict(
        &self,
        problem: &str,
    ) -> Result<(Specialization, PredictionSource), ClassifierError> {
        match &self.predictor {
            Some(predictor) => {
                let specialization = predictor.predict(&problem.to_lowercase())?;
                Ok((specialization, PredictionSource::Model))
            }
            None => Ok((classifier::classify(problem), PredictionSource::Keywords)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(api::predict))
        .route("/health", get(api::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `config.bind_addr()` and serves until Ctrl-C.
pub async fn serve(config: &ServiceConfig, state: AppState) -> Result<(), ServiceError> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServiceError::Bind { addr: addr.clone(), source })?;

    let mode = if state.has_model() { "model" } else { "keyword fallback" };
    info!("ML service listening on {} ({} mode)", addr, mode);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ML service shut down");
    Ok(())
}

/// Loads the model artifacts named by `config` (falling back to keywords) and serves.
pub async fn run(config: ServiceConfig) -> Result<(), ServiceError> {
    let artifacts = config.model_manager().load_or_fallback();
    serve(&config, AppState::from_artifacts(artifacts)).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
