//! Fragment text to [`ConfigDocument`].

use serde_json::Value;

use crate::ConfigDocument;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse raw fragment bytes.
///
/// A leading UTF-8 byte order mark is ignored. Empty or whitespace-only
/// content is rejected rather than treated as an empty object. With the
/// `json5` feature, comments and trailing commas are accepted.
pub(crate) fn parse_document(bytes: &[u8]) -> Result<ConfigDocument, String> {
    let text = std::str::from_utf8(bytes).map_err(|err| format!("not valid UTF-8: {err}"))?;
    let body = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    if body.trim().is_empty() {
        return Err("fragment is empty".to_owned());
    }
    let value = parse_value(body)?;
    ConfigDocument::try_from(value).map_err(|err| err.to_string())
}

#[cfg(not(feature = "json5"))]
fn parse_value(body: &str) -> Result<Value, String> {
    serde_json::from_str(body).map_err(|err| err.to_string())
}

#[cfg(feature = "json5")]
fn parse_value(body: &str) -> Result<Value, String> {
    json5::from_str(body).map_err(|err| err.to_string())
}
