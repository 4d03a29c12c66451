use crate::dtos::CustomerPayload;
use crate::error::CustomerError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};

enum BodyFormat {
    Json,
    Form,
    Other,
}

fn body_format(req: &Request) -> BodyFormat {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "application/json" || essence.ends_with("+json") {
        BodyFormat::Json
    } else if essence == "application/x-www-form-urlencoded" {
        BodyFormat::Form
    } else {
        BodyFormat::Other
    }
}

fn parse_json(bytes: &[u8]) -> Result<Map<String, Value>, CustomerError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CustomerError::MalformedBody(
            "expected a JSON object".to_string(),
        )),
        Err(e) => Err(CustomerError::MalformedBody(e.to_string())),
    }
}

// Bracketed keys nest deeper than this are kept as one literal segment.
const MAX_FORM_DEPTH: usize = 5;

/// Splits `a[b][]` into `["a", "b", ""]`.
///
/// Keys without a well-formed bracket suffix stay flat.
fn form_key_segments(key: &str) -> Vec<&str> {
    let Some(open) = key.find('[') else {
        return vec![key];
    };
    if open == 0 {
        return vec![key];
    }

    let mut segments = vec![&key[..open]];
    let mut rest = &key[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        if segments.len() > MAX_FORM_DEPTH {
            segments.push(rest);
            return segments;
        }
        let Some(close) = inner.find(']') else {
            return vec![key];
        };
        segments.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    if !rest.is_empty() {
        return vec![key];
    }
    segments
}

// `[]` and numeric segments build arrays, anything else builds objects.
// Array indices are compacted in arrival order.
fn nest_form_value(segments: &[&str], value: Value) -> Value {
    match segments.split_first() {
        None => value,
        Some((segment, rest)) => {
            let inner = nest_form_value(rest, value);
            if segment.is_empty() || segment.bytes().all(|b| b.is_ascii_digit()) {
                Value::Array(vec![inner])
            } else {
                let mut map = Map::new();
                map.insert((*segment).to_string(), inner);
                Value::Object(map)
            }
        }
    }
}

fn merge_form_value(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(current), Value::Object(extra)) => {
            for (key, value) in extra {
                match current.get_mut(&key) {
                    Some(slot) => merge_form_value(slot, value),
                    None => {
                        current.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(current), Value::Array(extra)) => current.extend(extra),
        (Value::Array(current), value) => current.push(value),
        (slot, value) => {
            let first = slot.take();
            *slot = Value::Array(vec![first, value]);
        }
    }
}

// Repeated keys collect into an array and bracketed keys into nested
// objects. The schema rejects both for its scalar fields.
fn parse_form(bytes: &[u8]) -> Result<Map<String, Value>, CustomerError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(bytes)
        .map_err(|e| CustomerError::MalformedBody(e.to_string()))?;

    let mut map = Map::new();
    for (key, value) in pairs {
        let segments = form_key_segments(&key);
        let (field, nested) = match segments.split_first() {
            Some((field, nested)) => (*field, nested),
            None => continue,
        };
        let value = nest_form_value(nested, Value::String(value));
        match map.get_mut(field) {
            Some(existing) => merge_form_value(existing, value),
            None => {
                map.insert(field.to_string(), value);
            }
        }
    }
    Ok(map)
}

/// Parses JSON and URL-encoded bodies into a [`CustomerPayload`].
///
/// Any other content type yields an empty payload.
#[axum::async_trait]
impl<S> FromRequest<S> for CustomerPayload
where
    S: Send + Sync,
{
    type Rejection = CustomerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = body_format(&req);
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| CustomerError::MalformedBody(e.to_string()))?;

        let map = match format {
            BodyFormat::Json => parse_json(&bytes)?,
            BodyFormat::Form => parse_form(&bytes)?,
            BodyFormat::Other => Map::new(),
        };
        Ok(CustomerPayload(map))
    }
}
