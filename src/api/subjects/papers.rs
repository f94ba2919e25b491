//! Question paper generation and exam lookup endpoints

use std::collections::{BTreeMap, HashMap};

use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::Redirect,
    Form,
};
use tracing::debug;

use super::parse_subject_id;
use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::exam::{Exam, ExamId};
use crate::domain::paper::Criterion;
use crate::domain::question::Mark;
use crate::domain::subject::SchemeKind;
use crate::infrastructure::services::{GeneratePaperRequest, NO_QUESTIONS_CHOSEN};

const ROW_PREFIX: &str = "form-";

fn choose_questions() -> ApiError {
    ApiError::bad_request(NO_QUESTIONS_CHOSEN)
}

/// Criteria rows of the formset, keyed by row index, blank values dropped
fn criteria_rows(fields: &[(String, String)]) -> BTreeMap<usize, HashMap<&str, &str>> {
    let mut rows: BTreeMap<usize, HashMap<&str, &str>> = BTreeMap::new();

    for (name, value) in fields {
        let Some((index, field)) = name
            .strip_prefix(ROW_PREFIX)
            .and_then(|rest| rest.split_once('-'))
        else {
            continue;
        };
        // Management fields such as form-TOTAL_FORMS carry no row index
        let Ok(index) = index.parse::<usize>() else {
            continue;
        };

        let row = rows.entry(index).or_default();
        let value = value.trim();
        if !value.is_empty() {
            row.insert(field, value);
        }
    }

    rows
}

/// Last non-blank value of a top-level field
fn field_value<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .rev()
        .find(|(key, _)| key == name)
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}

fn parse_criterion(row: &HashMap<&str, &str>) -> Option<Criterion> {
    let module = row.get("module")?;
    let count = row.get("count")?.parse::<usize>().ok()?;

    if let Some(mark) = row.get("mark") {
        return Some(Criterion::by_mark(*module, Mark::parse(mark)?, count));
    }

    Some(Criterion::by_part(*module, *row.get("part")?, *row.get("level")?, count))
}

/// Reads the urlencoded generation form. Rows whose fields are all blank are
/// ignored; anything else that is incomplete rejects the whole form.
pub fn parse_generation_form(fields: &[(String, String)]) -> Result<GeneratePaperRequest, ApiError> {
    let exam_name = field_value(fields, "examname").ok_or_else(choose_questions)?;
    let time = field_value(fields, "time").ok_or_else(choose_questions)?;
    let total_marks = field_value(fields, "totalmarks")
        .and_then(|v| v.parse::<u32>().ok())
        .ok_or_else(choose_questions)?;
    let scheme = match field_value(fields, "scheme") {
        Some(raw) => Some(SchemeKind::parse(raw).ok_or_else(choose_questions)?),
        None => None,
    };

    let mut criteria = Vec::new();
    for row in criteria_rows(fields).values() {
        if row.is_empty() {
            continue;
        }
        criteria.push(parse_criterion(row).ok_or_else(choose_questions)?);
    }

    if criteria.is_empty() {
        return Err(choose_questions());
    }

    Ok(GeneratePaperRequest {
        exam_name: exam_name.to_string(),
        total_marks,
        time: time.to_string(),
        scheme,
        criteria,
    })
}

/// POST /subjects/{subject_id}/papers
///
/// Redirects (303) to the stored question paper.
pub async fn generate_paper(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(subject_id): Path<String>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let subject_id = parse_subject_id(&subject_id)?;
    let Form(fields) = form.map_err(|_| choose_questions())?;
    let request = parse_generation_form(&fields)?;

    debug!(
        subject_id = %subject_id,
        user_id = %user.id(),
        criteria = request.criteria.len(),
        "Generating question paper"
    );

    let generated = state.paper_service.generate(&subject_id, request).await?;

    Ok(Redirect::to(&generated.url))
}

/// GET /subjects/{subject_id}/exams/{exam_id}
pub async fn get_exam(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path((subject_id, exam_id)): Path<(String, String)>,
) -> Result<Json<Exam>, ApiError> {
    let subject_id = parse_subject_id(&subject_id)?;
    let exam_id = ExamId::parse(&exam_id)
        .map_err(|_| ApiError::not_found(format!("Exam '{}' not found", exam_id)))?;

    Ok(Json(state.paper_service.get_exam(&subject_id, &exam_id).await?))
}
