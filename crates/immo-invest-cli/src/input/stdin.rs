use serde_json::Value;
use std::io::{self, Read};

/// Request document piped on stdin, as JSON or YAML.
///
/// `None` when stdin is a terminal or the pipe is empty, so the command
/// falls back to its flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = parse_document(trimmed)?;
    tracing::debug!(bytes = trimmed.len(), "request read from stdin");
    Ok(Some(value))
}

/// JSON first; YAML only when it yields a mapping, since any bare text is
/// a valid YAML scalar.
fn parse_document(text: &str) -> Result<Value, String> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(json_err) => match serde_yaml::from_str::<Value>(text) {
            Ok(value @ Value::Object(_)) => Ok(value),
            _ => Err(format!("Failed to parse stdin as JSON: {json_err}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_document() {
        let value = parse_document(r#"{"total_price": "500000"}"#).unwrap();
        assert_eq!(value["total_price"], "500000");
    }

    #[test]
    fn test_yaml_mapping() {
        let value = parse_document("property:\n  total_price: 500000\n").unwrap();
        assert_eq!(value["property"]["total_price"], 500000);
    }

    #[test]
    fn test_plain_text_reports_json_error() {
        let err = parse_document("total price 500000").unwrap_err();
        assert!(err.starts_with("Failed to parse stdin as JSON"), "{err}");
    }
}
