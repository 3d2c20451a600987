//! HTTP surface: upload form, upload handling and CSV download

mod error;
pub mod handlers;
pub mod templates;

pub use error::AppError;

use crate::claude::Generator;
use crate::export::CsvArtifact;
use crate::orchestrator::AcceptancePolicy;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use handlebars::{Handlebars, TemplateError};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn Generator>,
    pub artifact: Arc<CsvArtifact>,
    pub policy: AcceptancePolicy,
    pub templates: Arc<Handlebars<'static>>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn Generator>,
        artifact: CsvArtifact,
        policy: AcceptancePolicy,
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            generator,
            artifact: Arc::new(artifact),
            policy,
            templates: Arc::new(templates::templates()?),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::upload))
        .route("/download", get(handlers::download))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
