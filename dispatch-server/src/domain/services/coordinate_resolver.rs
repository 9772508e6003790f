//! Normalizes the payload shapes the conversational agent sends into a
//! `MissionCommand`.
//!
//! Shapes are detected in priority order:
//! 1. Nested: `{"flight_data": {"lat", "lng", "mission_id", "task_type"}}`
//! 2. Flat keyed: `{"target_coordinate": <object | "lat,lng" | JSON string>, "mission_id", "task_type"}`
//! 3. Direct: `{"lat", "lng", "mission_id", "task_type"}`
//!
//! Anything else is an error. A target that resolves to (0, 0) is always
//! rejected, never treated as a real position.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::errors::DispatchError;
use crate::domain::models::{Coordinate, MissionCommand, DEFAULT_TASK_TYPE};

/// One of the recognized request layouts, carrying the fields it was found with
#[derive(Debug, Clone, PartialEq)]
pub enum RequestShape {
    /// `fields` is the `flight_data` object
    Nested { fields: Map<String, Value> },
    /// `fields` is the top-level object holding `mission_id` / `task_type`
    FlatKeyed {
        target: Value,
        fields: Map<String, Value>,
    },
    Direct { fields: Map<String, Value> },
}

impl RequestShape {
    pub fn name(&self) -> &'static str {
        match self {
            RequestShape::Nested { .. } => "nested",
            RequestShape::FlatKeyed { .. } => "flat_keyed",
            RequestShape::Direct { .. } => "direct",
        }
    }

    fn fields(&self) -> &Map<String, Value> {
        match self {
            RequestShape::Nested { fields }
            | RequestShape::FlatKeyed { fields, .. }
            | RequestShape::Direct { fields } => fields,
        }
    }
}

/// Decide which layout a payload uses
pub fn detect_shape(payload: &Value) -> Result<RequestShape, DispatchError> {
    let root = payload.as_object().ok_or_else(|| {
        DispatchError::UnrecognizedShape(format!("expected a JSON object, got {}", kind(payload)))
    })?;

    if let Some(flight_data) = root.get("flight_data") {
        let fields = object_or_encoded_object(flight_data).ok_or_else(|| {
            DispatchError::InvalidCoordinates("flight_data must be an object".to_string())
        })?;
        return Ok(RequestShape::Nested { fields });
    }

    if let Some(target) = root.get("target_coordinate") {
        return Ok(RequestShape::FlatKeyed {
            target: target.clone(),
            fields: root.clone(),
        });
    }

    if root.contains_key("lat") && root.contains_key("lng") {
        return Ok(RequestShape::Direct {
            fields: root.clone(),
        });
    }

    Err(DispatchError::UnrecognizedShape(
        "expected flight_data, target_coordinate, or lat/lng fields".to_string(),
    ))
}

/// Turns raw request payloads into mission commands
#[derive(Debug, Clone)]
pub struct CoordinateResolver {
    default_task_type: String,
}

impl Default for CoordinateResolver {
    fn default() -> Self {
        Self::new(DEFAULT_TASK_TYPE)
    }
}

impl CoordinateResolver {
    pub fn new(default_task_type: impl Into<String>) -> Self {
        Self {
            default_task_type: default_task_type.into(),
        }
    }

    pub fn resolve(&self, payload: &Value) -> Result<MissionCommand, DispatchError> {
        let shape = detect_shape(payload)?;

        let target = match &shape {
            RequestShape::Nested { fields } | RequestShape::Direct { fields } => {
                coordinate_from_fields(fields)?
            }
            RequestShape::FlatKeyed { target, .. } => parse_target_coordinate(target)?,
        };
        validate_target(&target)?;

        let fields = shape.fields();
        let mission_id = fields
            .get("mission_id")
            .and_then(text_value)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let task_type = fields
            .get("task_type")
            .and_then(text_value)
            .unwrap_or_else(|| self.default_task_type.clone());

        tracing::debug!(
            shape = shape.name(),
            mission_id = %mission_id,
            task_type = %task_type,
            coordinate = %target,
            "Resolved mission command"
        );

        Ok(MissionCommand {
            mission_id,
            task_type,
            target,
        })
    }
}

/// Parse the `target_coordinate` field in any of its accepted encodings
fn parse_target_coordinate(value: &Value) -> Result<Coordinate, DispatchError> {
    match value {
        Value::Object(fields) => coordinate_from_fields(fields),
        Value::String(text) => {
            let text = text.trim();
            if text.starts_with('{') {
                let decoded: Value = serde_json::from_str(text).map_err(|e| {
                    DispatchError::InvalidCoordinates(format!(
                        "target_coordinate is not valid JSON: {}",
                        e
                    ))
                })?;
                match decoded {
                    Value::Object(fields) => coordinate_from_fields(&fields),
                    other => Err(DispatchError::InvalidCoordinates(format!(
                        "target_coordinate JSON must be an object, got {}",
                        kind(&other)
                    ))),
                }
            } else {
                let parts: Vec<&str> = text.split(',').collect();
                match parts.as_slice() {
                    [lat, lng] => Ok(Coordinate::new(
                        parse_number_str(lat, "lat")?,
                        parse_number_str(lng, "lng")?,
                    )),
                    _ => Err(DispatchError::InvalidCoordinates(format!(
                        "target_coordinate must look like \"<lat>,<lng>\", got {:?}",
                        text
                    ))),
                }
            }
        }
        other => Err(DispatchError::InvalidCoordinates(format!(
            "target_coordinate must be an object or string, got {}",
            kind(other)
        ))),
    }
}

fn coordinate_from_fields(fields: &Map<String, Value>) -> Result<Coordinate, DispatchError> {
    let lat = required_number(fields, "lat")?;
    let lng = required_number(fields, "lng")?;
    Ok(Coordinate::new(lat, lng))
}

fn required_number(fields: &Map<String, Value>, key: &str) -> Result<f64, DispatchError> {
    let value = fields
        .get(key)
        .ok_or_else(|| DispatchError::InvalidCoordinates(format!("missing {}", key)))?;
    parse_number(value, key)
}

/// Numbers pass through; numeric-looking strings are coerced
fn parse_number(value: &Value, key: &str) -> Result<f64, DispatchError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            DispatchError::InvalidCoordinates(format!("{} is not representable: {}", key, n))
        }),
        Value::String(s) => parse_number_str(s, key),
        other => Err(DispatchError::InvalidCoordinates(format!(
            "{} must be a number, got {}",
            key,
            kind(other)
        ))),
    }
}

fn parse_number_str(raw: &str, key: &str) -> Result<f64, DispatchError> {
    let parsed: f64 = raw.trim().parse().map_err(|_| {
        DispatchError::InvalidCoordinates(format!("{} is not a number: {:?}", key, raw))
    })?;
    // "NaN" and "inf" parse successfully but are never positions
    if !parsed.is_finite() {
        return Err(DispatchError::InvalidCoordinates(format!(
            "{} is not finite: {:?}",
            key, raw
        )));
    }
    Ok(parsed)
}

fn validate_target(target: &Coordinate) -> Result<(), DispatchError> {
    if target.is_origin() {
        return Err(DispatchError::InvalidCoordinates(
            "target resolved to (0, 0)".to_string(),
        ));
    }
    if !target.is_within_bounds() {
        return Err(DispatchError::InvalidCoordinates(format!(
            "target {} is outside valid latitude/longitude ranges",
            target
        )));
    }
    Ok(())
}

/// Identifier-like fields: non-empty strings, or numbers rendered as text
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn object_or_encoded_object(value: &Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(fields) => Some(fields.clone()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(fields)) => Some(fields),
            _ => None,
        },
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
