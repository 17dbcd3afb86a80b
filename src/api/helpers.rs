//! Request parsing and field validation.
//!
//! Bodies are read as loose JSON and fields pulled out one by one, so every
//! bad field is reported at once as `"<field> - <message>"`.

use serde_json::Value;

use crate::api::error::{ApiError, ApiResult};

pub fn parse_body(bytes: &[u8]) -> ApiResult<Value> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Value::Object(Default::default()));
    }
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ApiError::validation(format!("body - invalid JSON: {e}")))?;
    if !value.is_object() {
        return Err(ApiError::validation("body - must be a JSON object"));
    }
    Ok(value)
}

/// Path segments must be integers >= 1.
pub fn parse_path_id(field: &str, raw: &str) -> ApiResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(ApiError::validation(format!(
            "{field} - must be an integer >= 1"
        ))),
    }
}

/// Integers arrive either as JSON numbers or numeric strings.
fn as_integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f))
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Collects field errors while extracting values from a request body.
pub struct Fields<'a> {
    params: &'a Value,
    errors: Vec<String>,
}

impl<'a> Fields<'a> {
    pub fn new(params: &'a Value) -> Self {
        Self {
            params,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.errors.push(format!("{field} - {message}"));
    }

    /// Required string, trimmed, non-empty.
    pub fn text(&mut self, field: &str) -> String {
        match self.params.get(field) {
            Some(Value::String(v)) if !v.trim().is_empty() => v.trim().to_string(),
            Some(Value::String(_)) => {
                self.fail(field, "must not be empty");
                String::new()
            }
            Some(Value::Null) | None => {
                self.fail(field, "is required");
                String::new()
            }
            Some(_) => {
                self.fail(field, "must be a string");
                String::new()
            }
        }
    }

    pub fn email(&mut self, field: &str) -> String {
        match self.params.get(field) {
            Some(Value::String(v)) if looks_like_email(v.trim()) => v.trim().to_string(),
            Some(Value::String(_)) => {
                self.fail(field, "must be a valid email address");
                String::new()
            }
            Some(Value::Null) | None => {
                self.fail(field, "is required");
                String::new()
            }
            Some(_) => {
                self.fail(field, "must be a string");
                String::new()
            }
        }
    }

    pub fn int_in(&mut self, field: &str, min: i64, max: i64) -> i64 {
        let value = self.params.get(field).and_then(as_integer);
        match value {
            Some(v) if (min..=max).contains(&v) => v,
            _ if max == i64::MAX => {
                self.fail(field, &format!("must be an integer >= {min}"));
                0
            }
            _ => {
                self.fail(field, &format!("must be an integer between {min} and {max}"));
                0
            }
        }
    }

    pub fn id(&mut self, field: &str) -> i64 {
        self.int_in(field, 1, i64::MAX)
    }

    pub fn finish(self) -> ApiResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}
