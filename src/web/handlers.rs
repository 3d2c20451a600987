use crate::export::DOWNLOAD_NAME;
use crate::extract::{extract_text, is_pdf};
use crate::orchestrator::orchestrate_agents;
use crate::web::error::AppError;
use crate::web::templates::{render_results, UPLOAD_FORM};
use crate::web::AppState;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use tracing::Instrument;
use uuid::Uuid;

pub const NO_FILE_PART: &str = "No file part";
pub const NO_SELECTED_FILE: &str = "No selected file";
pub const NOT_A_PDF: &str = "Only PDF files are accepted";

struct Upload {
    file_name: String,
    data: Vec<u8>,
}

pub async fn index() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> Result<Response, AppError> {
    let upload = match read_file_field(multipart).await? {
        Some(upload) => upload,
        None => return Ok(NO_FILE_PART.into_response()),
    };

    if upload.file_name.is_empty() {
        return Ok(NO_SELECTED_FILE.into_response());
    }
    if !upload.file_name.ends_with(".pdf") {
        tracing::info!(file_name = %upload.file_name, "rejected non-PDF upload");
        return Ok(NOT_A_PDF.into_response());
    }

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("upload", %request_id, file_name = %upload.file_name);

    async move {
        if !is_pdf(&upload.data) {
            tracing::warn!("file is named .pdf but has no PDF header");
        }

        let ba_document = extract_text(upload.data).await?;
        tracing::info!(chars = ba_document.len(), "extracted BA document");

        let outcome = orchestrate_agents(
            state.generator.as_ref(),
            &state.artifact,
            &state.policy,
            &ba_document,
        )
        .await?;

        let html = render_results(&state.templates, &outcome)?;
        Ok(Html(html).into_response())
    }
    .instrument(span)
    .await
}

pub async fn download(State(state): State<AppState>) -> Result<Response, AppError> {
    let bytes = state.artifact.read()?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_NAME),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// First multipart field named `file`, with its file name (empty when the
/// browser sent none).
async fn read_file_field(mut multipart: Multipart) -> Result<Option<Upload>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?.to_vec();
        return Ok(Some(Upload { file_name, data }));
    }

    Ok(None)
}
