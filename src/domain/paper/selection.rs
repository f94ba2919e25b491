//! Questions grouped under exam section labels

use serde::Serialize;

use crate::domain::question::Question;

pub const PART_A: &str = "Part A";
pub const PART_B: &str = "Part B";
pub const PART_C: &str = "Part C";

/// Sections every paper carries, in print order
pub const CANONICAL_SECTIONS: [&str; 3] = [PART_A, PART_B, PART_C];

/// One exam section and its questions in selection order
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub label: String,
    pub questions: Vec<Question>,
}

impl Section {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            questions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Ordered label -> questions mapping built criterion by criterion
#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionedSelection {
    sections: Vec<Section>,
}

impl SectionedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the section with this label, creating it on first use
    pub fn extend(&mut self, label: &str, questions: impl IntoIterator<Item = Question>) {
        match self.sections.iter_mut().find(|s| s.label == label) {
            Some(section) => section.questions.extend(questions),
            None => {
                let mut section = Section::new(label);
                section.questions.extend(questions);
                self.sections.push(section);
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.label == label)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    /// Number of selected questions, counting repeats
    pub fn total(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::question::Mark;
    use crate::domain::subject::SubjectId;

    fn question(text: &str) -> Question {
        Question::marked(SubjectId::generate(), text, "Trees", Mark::new(2.0))
    }

    #[test]
    fn test_same_label_appends() {
        let mut selection = SectionedSelection::new();
        selection.extend(PART_A, vec![question("one")]);
        selection.extend(PART_B, vec![question("two")]);
        selection.extend(PART_A, vec![question("three")]);

        assert_eq!(selection.sections().len(), 2);
        let part_a = selection.get(PART_A).unwrap();
        let texts: Vec<_> = part_a.questions.iter().map(|q| q.text()).collect();
        assert_eq!(texts, vec!["one", "three"]);
        assert_eq!(selection.total(), 3);
    }

    #[test]
    fn test_empty_extend_still_creates_section() {
        let mut selection = SectionedSelection::new();
        selection.extend(PART_C, Vec::new());

        assert!(selection.get(PART_C).unwrap().is_empty());
        assert!(selection.is_empty());
    }
}
