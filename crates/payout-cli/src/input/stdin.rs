use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Attempt to read a JSON (or YAML) document from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    tracing::debug!(bytes = trimmed.len(), "read input document from stdin");
    parse_document(trimmed).map(Some)
}

/// Deserialise a piped document straight into `T`.
///
/// JSON goes through serde_json, the same parser `--input foo.json` uses, so
/// both paths see identical numbers. Anything that is not JSON is retried as YAML.
pub fn parse_document<T: DeserializeOwned>(text: &str) -> Result<T, Box<dyn std::error::Error>> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_str(text).map_err(|yaml_err| {
            format!(
                "Failed to parse stdin as JSON ({}) or YAML ({})",
                json_err, yaml_err
            )
            .into()
        }),
    }
}
