use crate::export::ExportError;
use crate::extract::ExtractError;
use crate::orchestrator::ConvergenceError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure of a request handler, rendered as a plain-text response.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Convergence(#[from] ConvergenceError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Multipart(e) => e.status(),
            AppError::Export(ExportError::NotGenerated) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
