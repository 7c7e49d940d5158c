//! Loading the raw CV text from a file, a PDF or stdin.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Reads CV text from `source`: `-` for stdin, a `.pdf` (text layer
/// extracted), or any other file read as UTF-8.
pub async fn read_cv_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read CV text from stdin")?;
        return Ok(text);
    }

    let path = Path::new(source);
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .context("spawn_blocking failed in PDF text extraction")?
            .map_err(|e| anyhow::anyhow!("Failed to extract text from {}: {e}", path.display()))?;
        debug!(path = %path.display(), chars = text.len(), "Extracted text from PDF");
        return Ok(text);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}
