//! LaTeX source renderer

use async_trait::async_trait;

use crate::domain::paper::{DocumentFormat, DocumentRenderer, PaperDocument, PaperItem};
use crate::domain::DomainError;

const PREAMBLE: &str = r"\documentclass[12pt]{article}
\usepackage[a4paper,margin=2cm]{geometry}
\usepackage[T1]{fontenc}
\usepackage{times}
\pagestyle{empty}
";

/// Escapes characters LaTeX treats specially
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(c),
        }
    }

    out
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LatexRenderer;

impl LatexRenderer {
    pub fn new() -> Self {
        Self
    }

    fn item(item: &PaperItem) -> String {
        let body = item
            .lines
            .iter()
            .map(|line| escape(line))
            .collect::<Vec<_>>()
            .join("\\\\\n");

        match item.mark {
            Some(mark) => format!("\\item{{{}\\hfill {}}}\n", body, mark),
            None => format!("\\item{{{}}}\n", body),
        }
    }

    /// Full LaTeX source of the paper
    pub fn source(&self, document: &PaperDocument) -> String {
        let mut tex = String::from(PREAMBLE);

        tex.push_str("\\begin{document}\n\\begin{center}\n");
        tex.push_str(&format!(
            "{{\\large\\textbf{{{}}}}}\\\\\n",
            escape(&document.institution)
        ));
        tex.push_str(&format!("{}\\\\\n", escape(&document.exam_name)));
        tex.push_str(&format!("{}\n", escape(&document.subject_name)));
        tex.push_str("\\end{center}\n");
        tex.push_str(&format!(
            "\\noindent Marks : {}\\hfill Time : {}\n",
            document.total_marks,
            escape(&document.time)
        ));

        for section in &document.sections {
            tex.push_str(&format!(
                "\\begin{{center}}\\textbf{{{}}}\\end{{center}}\n",
                escape(&section.heading)
            ));
            tex.push_str("\\begin{enumerate}\n");
            for item in &section.items {
                tex.push_str(&Self::item(item));
            }
            tex.push_str("\\end{enumerate}\n");
        }

        tex.push_str("\\end{document}\n");
        tex
    }
}

#[async_trait]
impl DocumentRenderer for LatexRenderer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Tex
    }

    async fn render(&self, document: &PaperDocument, _stem: &str) -> Result<Vec<u8>, DomainError> {
        Ok(self.source(document).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::paper::PaperSection;
    use crate::domain::question::Mark;

    fn document() -> PaperDocument {
        PaperDocument {
            institution: "Adi Shankara Institute of Engineering and Technology, Kalady".into(),
            exam_name: "Model Exam".into(),
            subject_name: "Operating Systems".into(),
            total_marks: 100,
            time: "3 Hours".into(),
            sections: vec![
                PaperSection {
                    heading: "Part A".into(),
                    items: vec![
                        PaperItem {
                            number: 1,
                            lines: vec!["What is a race condition?".into()],
                            mark: Some(Mark::new(3.0)),
                        },
                        PaperItem {
                            number: 2,
                            lines: vec!["first line".into(), "second line".into()],
                            mark: None,
                        },
                    ],
                },
                PaperSection {
                    heading: "Part C".into(),
                    items: vec![PaperItem {
                        number: 1,
                        lines: vec!["Explain 50% of paging & segmentation.".into()],
                        mark: Some(Mark::new(7.5)),
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a_b & 50%"), r"a\_b \& 50\%");
        assert_eq!(escape(r"x^2 \ y"), r"x\textasciicircum{}2 \textbackslash{} y");
    }

    #[test]
    fn test_source_layout() {
        let tex = LatexRenderer::new().source(&document());

        assert!(tex.starts_with("\\documentclass"));
        assert!(tex.contains("\\textbf{Adi Shankara Institute of Engineering and Technology, Kalady}"));
        assert!(tex.contains("\\noindent Marks : 100\\hfill Time : 3 Hours"));
        assert!(tex.contains("\\begin{center}\\textbf{Part A}\\end{center}"));
        assert!(tex.contains("\\item{What is a race condition?\\hfill 3}"));
        assert!(tex.contains("\\item{first line\\\\\nsecond line}"));
        assert!(tex.contains("\\item{Explain 50\\% of paging \\& segmentation.\\hfill 7.5}"));
        assert!(tex.trim_end().ends_with("\\end{document}"));
        assert_eq!(tex.matches("\\begin{enumerate}").count(), 2);
    }

    #[tokio::test]
    async fn test_render_returns_source_bytes() {
        let renderer = LatexRenderer::new();
        let bytes = renderer.render(&document(), "OS_1112026").await.unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), renderer.source(&document()));
    }
}
