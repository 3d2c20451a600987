//! PDF text extraction

use lopdf::Document;
use thiserror::Error;

#[cfg(test)]
pub(crate) mod test_utils;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to load PDF document: {0}")]
    Load(#[from] lopdf::Error),

    #[error("Failed to extract text from PDF: {0}")]
    Extract(String),

    #[error("PDF extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Extract the text of every page, in page order, as one string.
///
/// Parsing is CPU bound, so it runs on the blocking pool. A panic inside the
/// PDF library comes back as [`ExtractError::Join`].
pub async fn extract_text(pdf_data: Vec<u8>) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text_blocking(&pdf_data)).await?
}

pub fn extract_text_blocking(pdf_data: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(pdf_data)?;
    let pages = doc.get_pages().len();
    tracing::debug!(pages, bytes = pdf_data.len(), "loaded PDF");

    let text = pdf_extract::extract_text_from_mem(pdf_data)
        .map_err(|e| ExtractError::Extract(e.to_string()))?;
    tracing::debug!(pages, chars = text.len(), "extracted PDF text");

    Ok(text)
}

/// Check if a file is a PDF based on its magic bytes
pub fn is_pdf(file_data: &[u8]) -> bool {
    file_data.starts_with(b"%PDF")
}
