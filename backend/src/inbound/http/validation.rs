//! Shape checks for JSON request bodies before they reach the domain.
//!
//! Fields arrive as raw JSON values so type mismatches produce the same
//! field-specific messages as range violations.

use serde_json::{Value, json};

use crate::domain::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    Required,
    NotAString,
    NotAnInteger,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::NotAString => "not_a_string",
            Self::NotAnInteger => "not_an_integer",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: &str, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// Require a non-blank JSON string. Missing, null, blank, and non-string
/// values all fail with `message`; accepted text is returned untrimmed.
pub(crate) fn required_string(
    value: Option<Value>,
    field: FieldName,
    message: &str,
) -> Result<String, Error> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text),
        Some(Value::String(_)) | None | Some(Value::Null) => {
            Err(field_error(field, message, ValidationCode::Required))
        }
        Some(_) => Err(field_error(field, message, ValidationCode::NotAString)),
    }
}

/// Accept an absent/null value or an integral JSON number.
///
/// Integral floats such as `5.0` count as integers. Magnitudes beyond `i64`
/// saturate so the domain reports them as out of range.
pub(crate) fn optional_integer(
    value: Option<Value>,
    field: FieldName,
    message: &str,
) -> Result<Option<i64>, Error> {
    let number = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number,
        Some(_) => return Err(field_error(field, message, ValidationCode::NotAnInteger)),
    };
    if let Some(integer) = number.as_i64() {
        return Ok(Some(integer));
    }
    if number.as_u64().is_some() {
        return Ok(Some(i64::MAX));
    }
    match number.as_f64() {
        Some(float) if float.is_finite() && float.fract() == 0.0 => Ok(Some(float as i64)),
        _ => Err(field_error(field, message, ValidationCode::NotAnInteger)),
    }
}
