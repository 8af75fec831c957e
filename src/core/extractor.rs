use crate::core::{HomeworkRecord, StatusUpdate, ValidatedPayload, Verdict};
use crate::utils::error::ExtractionError;
use chrono::{DateTime, Utc};
use serde_json::Value;

const MAX_CODE_CHARS: usize = 64;

/// Reads the newest homework of a validated payload.
///
/// `Ok(None)` means the list was empty and there is nothing to report.
pub fn extract(payload: &ValidatedPayload) -> Result<Option<StatusUpdate>, ExtractionError> {
    let Some(latest) = payload.homeworks.first() else {
        return Ok(None);
    };

    let record = parse_record(latest)?;
    let message = status_message(&record.homework_name, record.verdict);

    Ok(Some(StatusUpdate { record, message }))
}

pub fn status_message(homework_name: &str, verdict: Verdict) -> String {
    format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework_name,
        verdict.description()
    )
}

fn parse_record(value: &Value) -> Result<HomeworkRecord, ExtractionError> {
    let obj = value.as_object().ok_or(ExtractionError::NotAMapping)?;

    let homework_name = obj
        .get("homework_name")
        .ok_or(ExtractionError::MissingField {
            field: "homework_name",
        })?
        .as_str()
        .ok_or(ExtractionError::NotAString {
            field: "homework_name",
        })?
        .to_string();

    let code = obj
        .get("status")
        .ok_or(ExtractionError::MissingField { field: "status" })?;

    let verdict = code
        .as_str()
        .and_then(Verdict::from_code)
        .ok_or_else(|| ExtractionError::UnexpectedVerdict {
            code: describe_code(code),
        })?;

    let date_updated = obj
        .get("date_updated")
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Ok(HomeworkRecord {
        id: obj.get("id").and_then(|v| v.as_i64()),
        homework_name,
        verdict,
        reviewer_comment: obj
            .get("reviewer_comment")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        date_updated,
    })
}

/// Short form of an unrecognized code for the user-facing error text.
/// Non-strings are reported by JSON type only.
fn describe_code(code: &Value) -> String {
    match code {
        Value::String(s) if s.chars().count() > MAX_CODE_CHARS => {
            let head: String = s.chars().take(MAX_CODE_CHARS).collect();
            format!("{}…", head)
        }
        Value::String(s) => s.clone(),
        Value::Null => "<null>".to_string(),
        Value::Bool(_) => "<boolean>".to_string(),
        Value::Number(_) => "<number>".to_string(),
        Value::Array(_) => "<array>".to_string(),
        Value::Object(_) => "<object>".to_string(),
    }
}
