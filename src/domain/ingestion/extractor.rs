//! Fixed-position row extraction

use thiserror::Error;

use super::cell::Cell;
use crate::domain::question::{Classification, Mark};
use crate::domain::subject::SchemeKind;

// Column 0 conventionally holds a serial number and is ignored.
const TEXT_COLUMN: usize = 1;
const MODULE_COLUMN: usize = 2;
const MARK_COLUMN: usize = 3;
const CO_COLUMN: usize = 3;
const PART_COLUMN: usize = 4;
const LEVEL_COLUMN: usize = 5;

/// Why a row was not ingested
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SkipReason {
    #[error("missing column {0}")]
    MissingColumn(usize),

    #[error("empty {0}")]
    EmptyField(&'static str),

    #[error("mark '{0}' is not a number")]
    InvalidMark(String),

    #[error("could not be stored: {0}")]
    StoreFailed(String),
}

/// Question fields read from one row
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedQuestion {
    pub text: String,
    pub module: String,
    pub classification: Classification,
}

fn column<'a>(row: &'a [Cell], index: usize) -> Result<&'a Cell, SkipReason> {
    row.get(index).ok_or(SkipReason::MissingColumn(index))
}

fn text_field(row: &[Cell], index: usize, name: &'static str) -> Result<String, SkipReason> {
    column(row, index)?
        .as_text()
        .ok_or(SkipReason::EmptyField(name))
}

/// Extracts a question from a row laid out for the given scheme
pub fn extract_row(scheme: SchemeKind, row: &[Cell]) -> Result<ExtractedQuestion, SkipReason> {
    let text = text_field(row, TEXT_COLUMN, "text")?;
    let module = text_field(row, MODULE_COLUMN, "module")?;

    let classification = match scheme {
        SchemeKind::Mark => {
            let cell = column(row, MARK_COLUMN)?;
            let mark = cell.as_number().ok_or_else(|| {
                SkipReason::InvalidMark(cell.as_text().unwrap_or_default())
            })?;
            Classification::Marked {
                mark: Mark::new(mark),
            }
        }
        SchemeKind::Part => Classification::Sectioned {
            co: text_field(row, CO_COLUMN, "co")?,
            part: text_field(row, PART_COLUMN, "part")?,
            level: text_field(row, LEVEL_COLUMN, "level")?,
        },
    };

    Ok(ExtractedQuestion {
        text,
        module,
        classification,
    })
}
