use serde_json::{Map, Value};

use crate::snapshot::{MetricSnapshot, ServerStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NotAnObject,
    MissingField(&'static str),
    InvalidField { field: &'static str, reason: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "snapshot must be a JSON object"),
            Self::MissingField(field) => write!(f, "missing field: {field}"),
            Self::InvalidField { field, reason } => write!(f, "invalid field {field}: {reason}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Turns an untyped upstream record into a `MetricSnapshot`.
///
/// Only the shape is checked. Out-of-range gauges are accepted so a single
/// misbehaving exporter shows up as a bad score instead of a missing server.
pub fn validate_snapshot(raw: &Value) -> Result<MetricSnapshot, ValidationError> {
    let obj = raw.as_object().ok_or(ValidationError::NotAnObject)?;

    let server_id = required_str(obj, "serverId")?;
    if server_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "serverId",
            reason: "must not be empty".into(),
        });
    }

    let status_raw = required_str(obj, "status")?;
    let status = ServerStatus::parse(&status_raw).ok_or_else(|| ValidationError::InvalidField {
        field: "status",
        reason: format!("unknown status '{status_raw}'"),
    })?;

    Ok(MetricSnapshot {
        server_id,
        server_type: required_str(obj, "serverType")?,
        location: optional_str(obj, "location")?.unwrap_or_default(),
        cpu: required_number(obj, "cpu")?,
        memory: required_number(obj, "memory")?,
        disk: required_number(obj, "disk")?,
        network: required_number(obj, "network")?,
        status,
    })
}

fn required_str(obj: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    optional_str(obj, field)?.ok_or(ValidationError::MissingField(field))
}

fn optional_str(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ValidationError::InvalidField {
            field,
            reason: format!("expected string, got {}", type_name(other)),
        }),
    }
}

fn required_number(obj: &Map<String, Value>, field: &'static str) -> Result<f64, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| ValidationError::InvalidField {
            field,
            reason: "number out of f64 range".into(),
        }),
        Some(other) => Err(ValidationError::InvalidField {
            field,
            reason: format!("expected number, got {}", type_name(other)),
        }),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
