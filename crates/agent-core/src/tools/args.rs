use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid JSON arguments: {0}")]
pub struct ArgumentsError(pub String);

/// Decode the serialized argument payload of a tool call.
///
/// An empty payload is treated as `{}`. Anything else must be a JSON object.
pub fn parse_tool_args(arguments: &str) -> Result<serde_json::Value, ArgumentsError> {
    let args_raw = arguments.trim();

    if args_raw.is_empty() {
        return Ok(serde_json::json!({}));
    }

    let value: serde_json::Value =
        serde_json::from_str(args_raw).map_err(|error| ArgumentsError(error.to_string()))?;

    if !value.is_object() {
        return Err(ArgumentsError(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }

    Ok(value)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
