//! PDF renderer: LaTeX source compiled with an external pdflatex

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::latex::LatexRenderer;
use crate::domain::paper::{DocumentFormat, DocumentRenderer, PaperDocument};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    latex: LatexRenderer,
    pdflatex: String,
    scratch_dir: PathBuf,
}

impl PdfRenderer {
    pub fn new(pdflatex: impl Into<String>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            latex: LatexRenderer::new(),
            pdflatex: pdflatex.into(),
            scratch_dir: scratch_dir.into(),
        }
    }
}

#[async_trait]
impl DocumentRenderer for PdfRenderer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    /// Writes `<scratch_dir>/<stem>.tex` and compiles it in place. The path
    /// is shared by concurrent requests for the same subject and day.
    async fn render(&self, document: &PaperDocument, stem: &str) -> Result<Vec<u8>, DomainError> {
        if Path::new(stem).file_name().and_then(|n| n.to_str()) != Some(stem) {
            return Err(DomainError::render(format!("Invalid file stem '{}'", stem)));
        }

        let tex_path = self.scratch_dir.join(format!("{}.tex", stem));
        let pdf_path = self.scratch_dir.join(format!("{}.pdf", stem));

        tokio::fs::create_dir_all(&self.scratch_dir)
            .await
            .map_err(|e| DomainError::render(format!("Cannot create scratch directory: {}", e)))?;
        tokio::fs::write(&tex_path, self.latex.source(document))
            .await
            .map_err(|e| DomainError::render(format!("Cannot write LaTeX source: {}", e)))?;

        debug!(tex = %tex_path.display(), "Compiling question paper");

        let output = Command::new(&self.pdflatex)
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg("-output-directory")
            .arg(&self.scratch_dir)
            .arg(&tex_path)
            .output()
            .await
            .map_err(|e| {
                DomainError::render(format!("Cannot run '{}': {}", self.pdflatex, e))
            })?;

        if !output.status.success() {
            let log = String::from_utf8_lossy(&output.stdout);
            let tail: String = log.lines().rev().take(5).collect::<Vec<_>>().join(" | ");
            warn!(status = %output.status, tail = %tail, "pdflatex failed");
            return Err(DomainError::render(format!(
                "pdflatex exited with {}",
                output.status
            )));
        }

        tokio::fs::read(&pdf_path)
            .await
            .map_err(|e| DomainError::render(format!("Cannot read compiled PDF: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> PaperDocument {
        PaperDocument {
            institution: "Institute".into(),
            exam_name: "Test".into(),
            subject_name: "Networks".into(),
            total_marks: 20,
            time: "1 Hour".into(),
            sections: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_stem_with_path_separator_is_refused() {
        let root = tempfile::tempdir().unwrap();
        let scratch = root.path().join("scratch");
        let renderer = PdfRenderer::new("/nonexistent/pdflatex-binary", &scratch);

        let result = renderer.render(&document(), "../escaped_18102026").await;

        assert!(matches!(result, Err(DomainError::Render { .. })));
        assert!(!root.path().join("escaped_18102026.tex").exists());
    }

    #[tokio::test]
    async fn test_missing_compiler_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = PdfRenderer::new("/nonexistent/pdflatex-binary", dir.path());
        let document = document();

        let result = renderer.render(&document, "Networks_1112026").await;

        assert!(matches!(result, Err(DomainError::Render { .. })));
        assert!(dir.path().join("Networks_1112026.tex").exists());
    }
}
