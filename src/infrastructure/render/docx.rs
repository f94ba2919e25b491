//! Word document renderer

use std::io::Cursor;

use async_trait::async_trait;
use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts};

use crate::domain::paper::{DocumentFormat, DocumentRenderer, PaperDocument, PaperItem};
use crate::domain::DomainError;

const TITLE_FONT: &str = "Times New Roman";
/// Half-points
const TITLE_SIZE: usize = 28;

#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }

    fn centered(text: &str) -> Paragraph {
        Paragraph::new()
            .add_run(Run::new().add_text(text))
            .align(AlignmentType::Center)
    }

    fn item(item: &PaperItem) -> Paragraph {
        let mut run = Run::new();

        for (i, line) in item.lines.iter().enumerate() {
            if i == 0 {
                run = run.add_text(format!("{}. {}", item.number, line));
            } else {
                run = run.add_break(BreakType::TextWrapping).add_text(line.as_str());
            }
        }

        if let Some(mark) = item.mark {
            run = run.add_tab().add_text(format!("({})", mark));
        }

        Paragraph::new().add_run(run)
    }

    pub fn build(&self, document: &PaperDocument) -> Docx {
        let title = Paragraph::new()
            .add_run(
                Run::new()
                    .add_text(document.institution.as_str())
                    .bold()
                    .size(TITLE_SIZE)
                    .fonts(RunFonts::new().ascii(TITLE_FONT)),
            )
            .align(AlignmentType::Center);

        let mut docx = Docx::new()
            .add_paragraph(title)
            .add_paragraph(Self::centered(&document.exam_name))
            .add_paragraph(Self::centered(&document.subject_name))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(document.marks_line())));

        for section in &document.sections {
            docx = docx.add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(section.heading.as_str()).bold())
                    .align(AlignmentType::Center),
            );

            for item in &section.items {
                docx = docx.add_paragraph(Self::item(item));
            }
        }

        docx
    }
}

#[async_trait]
impl DocumentRenderer for DocxRenderer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    async fn render(&self, document: &PaperDocument, _stem: &str) -> Result<Vec<u8>, DomainError> {
        let mut buffer = Cursor::new(Vec::new());

        self.build(document)
            .build()
            .pack(&mut buffer)
            .map_err(|e| DomainError::render(format!("Failed to write docx: {}", e)))?;

        Ok(buffer.into_inner())
    }
}
