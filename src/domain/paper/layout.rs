//! Format-independent layout of a question paper

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::assembler::AssembledPaper;
use crate::domain::exam::Exam;
use crate::domain::question::Mark;
use crate::domain::subject::Subject;

/// Width of the "Marks ... Time" line in characters
const MARKS_LINE_WIDTH: usize = 100;
const MIN_MARKS_LINE_GAP: usize = 4;

/// Where long question text is broken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapRule {
    /// Text longer than this many characters is split
    pub threshold: usize,
    /// Split at the first space at or after this character position
    pub search_from: usize,
}

impl Default for WrapRule {
    fn default() -> Self {
        Self {
            threshold: 75,
            search_from: 70,
        }
    }
}

/// Splits text longer than the threshold at the first space at or after the
/// search column, repeating on the remainder. A line without such a space is
/// kept whole.
pub fn wrap_text(text: &str, rule: WrapRule) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while rest.chars().count() > rule.threshold {
        let split = rest
            .char_indices()
            .skip(rule.search_from)
            .find(|(_, c)| *c == ' ')
            .map(|(i, _)| i);

        match split {
            Some(i) => {
                lines.push(rest[..i].to_string());
                rest = &rest[i + 1..];
            }
            None => break,
        }
    }

    if !rest.is_empty() || lines.is_empty() {
        lines.push(rest.to_string());
    }

    lines
}

/// File stem for a subject's paper: every character outside
/// `[A-Za-z0-9_-]` becomes an underscore, then the unpadded day, month and
/// year follow (`Data_Structures_18102026`)
pub fn artifact_stem(subject_name: &str, date: NaiveDate) -> String {
    let name: String = subject_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "{}_{}{}{}",
        name,
        date.day(),
        date.month(),
        date.year()
    )
}

/// A numbered question as printed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaperItem {
    pub number: usize,
    pub lines: Vec<String>,
    pub mark: Option<Mark>,
}

impl PaperItem {
    pub fn text(&self) -> String {
        self.lines.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaperSection {
    pub heading: String,
    pub items: Vec<PaperItem>,
}

/// Everything a renderer needs, already ordered and numbered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaperDocument {
    pub institution: String,
    pub exam_name: String,
    pub subject_name: String,
    pub total_marks: u32,
    pub time: String,
    pub sections: Vec<PaperSection>,
}

impl PaperDocument {
    /// Lays out the assembled paper. Empty sections get no heading; numbering
    /// restarts at 1 in every section.
    pub fn compose(
        institution: &str,
        subject: &Subject,
        exam: &Exam,
        paper: &AssembledPaper,
        wrap: WrapRule,
    ) -> Self {
        let sections = paper
            .sections
            .iter()
            .filter(|section| !section.is_empty())
            .map(|section| PaperSection {
                heading: section.label.clone(),
                items: section
                    .questions
                    .iter()
                    .enumerate()
                    .map(|(i, question)| PaperItem {
                        number: i + 1,
                        lines: wrap_text(question.text(), wrap),
                        mark: question.mark(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            institution: institution.to_string(),
            exam_name: exam.name().to_string(),
            subject_name: subject.name().to_string(),
            total_marks: exam.total_marks(),
            time: exam.time().to_string(),
            sections,
        }
    }

    /// `Marks : <m>` and `Time : <t>` spread across a fixed-width line
    pub fn marks_line(&self) -> String {
        let marks = format!("Marks : {}", self.total_marks);
        let time = format!("Time : {}", self.time);
        let used = marks.chars().count() + time.chars().count();
        let gap = MARKS_LINE_WIDTH.saturating_sub(used).max(MIN_MARKS_LINE_GAP);

        format!("{}{}{}", marks, " ".repeat(gap), time)
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}
