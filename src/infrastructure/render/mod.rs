//! Question paper renderers

mod docx;
mod latex;
mod pdf;

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::paper::{DocumentFormat, DocumentRenderer};

pub use self::docx::DocxRenderer;
pub use latex::LatexRenderer;
pub use pdf::PdfRenderer;

/// Picks the renderer for a format; `pdflatex` and `scratch_dir` only matter for PDF
pub fn renderer_for(
    format: DocumentFormat,
    pdflatex: &str,
    scratch_dir: impl Into<PathBuf>,
) -> Arc<dyn DocumentRenderer> {
    match format {
        DocumentFormat::Docx => Arc::new(DocxRenderer::new()),
        DocumentFormat::Tex => Arc::new(LatexRenderer::new()),
        DocumentFormat::Pdf => Arc::new(PdfRenderer::new(pdflatex, scratch_dir)),
    }
}
