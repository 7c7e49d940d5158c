// Export — writes a rendered document as a multi-page A4 PDF.
// Layout is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod layout;
pub mod metrics;

use std::path::{Path, PathBuf};

use printpdf::{IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::export::layout::{layout_document, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::models::CvRecord;
use crate::render::{FontFace, RenderedDocument};

const LAYER_NAME: &str = "Layer 1";

// ────────────────────────────────────────────────────────────────────────────
// Fonts
// ────────────────────────────────────────────────────────────────────────────

// DejaVu, embedded so any name, place or punctuation the record holds is drawn
// and extracted as written. Licence: assets/fonts/LICENSE.
const SANS_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const SANS_BOLD_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");
const SERIF_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif.ttf");
const SERIF_BOLD_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif-Bold.ttf");
const SERIF_ITALIC_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif-Italic.ttf");

struct FontSet {
    sans: IndirectFontRef,
    sans_bold: IndirectFontRef,
    serif: IndirectFontRef,
    serif_bold: IndirectFontRef,
    serif_italic: IndirectFontRef,
}

impl FontSet {
    fn embed(pdf: &PdfDocumentReference) -> Result<Self, AppError> {
        let load = |bytes: &'static [u8]| pdf.add_external_font(bytes).map_err(pdf_error);
        Ok(Self {
            sans: load(SANS_TTF)?,
            sans_bold: load(SANS_BOLD_TTF)?,
            serif: load(SERIF_TTF)?,
            serif_bold: load(SERIF_BOLD_TTF)?,
            serif_italic: load(SERIF_ITALIC_TTF)?,
        })
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Sans => &self.sans,
            FontFace::SansBold => &self.sans_bold,
            FontFace::Serif => &self.serif,
            FontFace::SerifBold => &self.serif_bold,
            FontFace::SerifItalic => &self.serif_italic,
        }
    }
}

fn pdf_error(e: printpdf::Error) -> AppError {
    AppError::Export(format!("PDF writer failed: {e}"))
}

/// Control characters have no glyph; they are drawn as spaces.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// PDF writing
// ────────────────────────────────────────────────────────────────────────────

/// Lays `doc` out and returns the finished PDF bytes. Synchronous.
pub fn export_pdf(doc: &RenderedDocument) -> Result<Vec<u8>, AppError> {
    let pages = layout_document(doc);
    let title = printable(&doc.title);

    let (pdf, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);

    let fonts = FontSet::embed(&pdf)?;

    for (index, page) in pages.iter().enumerate() {
        let (page_ref, layer_ref) = if index == 0 {
            (first_page, first_layer)
        } else {
            pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME)
        };
        let layer = pdf.get_page(page_ref).get_layer(layer_ref);

        for line in &page.lines {
            layer.use_text(
                printable(&line.text),
                line.size_pt,
                Mm(line.x_mm),
                Mm(line.y_mm),
                fonts.get(line.face),
            );
        }
    }

    let bytes = pdf.save_to_bytes().map_err(pdf_error)?;
    debug!(
        pages = pages.len(),
        bytes = bytes.len(),
        template = %doc.template,
        "PDF written"
    );
    Ok(bytes)
}

/// Runs `export_pdf` on the blocking pool.
pub async fn export_pdf_async(doc: RenderedDocument) -> Result<Vec<u8>, AppError> {
    tokio::task::spawn_blocking(move || export_pdf(&doc))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))?
}

// ────────────────────────────────────────────────────────────────────────────
// Files
// ────────────────────────────────────────────────────────────────────────────

/// `CV_<full name>.pdf` with whitespace runs collapsed to `_`.
pub fn export_file_name(record: &CvRecord) -> String {
    let name = record
        .personal_info
        .full_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "-");

    if name.is_empty() {
        "CV.pdf".to_string()
    } else {
        format!("CV_{name}.pdf")
    }
}

/// Exports `doc` and writes it into `dir`, returning the written path.
pub async fn save_pdf(
    doc: RenderedDocument,
    record: &CvRecord,
    dir: &Path,
) -> Result<PathBuf, AppError> {
    let bytes = export_pdf_async(doc).await?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Export(format!("cannot create {}: {e}", dir.display())))?;

    let path = dir.join(export_file_name(record));
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| AppError::Export(format!("cannot write {}: {e}", path.display())))?;

    info!(path = %path.display(), bytes = bytes.len(), "CV exported");
    Ok(path)
}
