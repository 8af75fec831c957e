use crate::core::ValidatedPayload;
use crate::utils::error::SchemaError;
use serde_json::Value;

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Structural check of a raw status API payload. The first failing rule wins.
pub fn validate(raw: &Value) -> Result<ValidatedPayload, SchemaError> {
    let map = raw.as_object().ok_or(SchemaError::NotAMapping)?;

    let homeworks = map
        .get(HOMEWORKS_KEY)
        .ok_or(SchemaError::MissingHomeworks)?;

    let homeworks = match homeworks {
        Value::Array(items) => items.clone(),
        _ => return Err(SchemaError::HomeworksNotAList),
    };

    let current_date = match map.get(CURRENT_DATE_KEY) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_i64().ok_or(SchemaError::CurrentDateNotInteger)?),
    };

    Ok(ValidatedPayload {
        homeworks,
        current_date,
    })
}
