//! Selection criteria for question paper generation

use serde::{Deserialize, Serialize};

use crate::domain::question::Mark;

/// Category half of a criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classifier {
    /// Mark scheme: questions worth exactly this mark
    Mark(Mark),
    /// Part scheme: questions of this part and level
    Part { part: String, level: String },
}

/// "Pick `count` questions of this module and category"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub module: String,
    pub classifier: Classifier,
    pub count: usize,
}

impl Criterion {
    pub fn by_mark(module: impl Into<String>, mark: Mark, count: usize) -> Self {
        Self {
            module: module.into(),
            classifier: Classifier::Mark(mark),
            count,
        }
    }

    pub fn by_part(
        module: impl Into<String>,
        part: impl Into<String>,
        level: impl Into<String>,
        count: usize,
    ) -> Self {
        Self {
            module: module.into(),
            classifier: Classifier::Part {
                part: part.into(),
                level: level.into(),
            },
            count,
        }
    }
}
