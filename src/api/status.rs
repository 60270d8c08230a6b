//! Generic API responses.

use std::fmt;
use serde::{Deserialize, Serialize, Serializer};
use serde::ser::SerializeStruct;


//------------ Success -------------------------------------------------------

/// An empty, successful API response.
///
/// This type needs to be used instead of `()` to make conversion into
/// [`Report`][crate::cli::report::Report] work.
#[derive(Clone, Copy, Debug)]
pub struct Success;

impl fmt::Display for Success {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Ok")
    }
}

impl Serialize for Success {
    fn serialize<S: Serializer>(
        &self, serializer: S
    ) -> Result<S::Ok, S::Error> {
        let mut serializer = serializer.serialize_struct("Success", 1)?;
        serializer.serialize_field("status", "Ok")?;
        serializer.end()
    }
}


//------------ ErrorResponse -------------------------------------------------

/// An API error response.
///
/// The API puts a human readable explanation into `detail`. For validation
/// failures it is a list of objects each carrying a `msg` instead.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(detail: impl fmt::Display) -> Self {
        ErrorResponse {
            detail: Some(serde_json::Value::String(detail.to_string()))
        }
    }

    /// Returns the detail as a message, if there is a usable one.
    pub fn detail_message(&self) -> Option<String> {
        use serde_json::Value;

        match self.detail.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => {
                let msgs: Vec<&str> = items.iter().filter_map(|item| {
                    item.get("msg").and_then(Value::as_str)
                }).collect();
                if msgs.is_empty() {
                    Some(Value::Array(items.clone()).to_string())
                }
                else {
                    Some(msgs.join("; "))
                }
            }
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.detail_message() {
            Some(msg) => f.write_str(&msg),
            None => f.write_str("<no detail>"),
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ErrorResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn string_detail() {
        assert_eq!(
            parse(r#"{"detail": "Usuario ya existe"}"#).detail_message(),
            Some("Usuario ya existe".to_string())
        );
    }

    #[test]
    fn validation_detail() {
        let res = parse(
            r#"{"detail": [
                {"loc": ["body", "email"], "msg": "value is not a valid email"},
                {"loc": ["body", "name"], "msg": "field required"}
            ]}"#
        );
        assert_eq!(
            res.detail_message(),
            Some("value is not a valid email; field required".to_string())
        );
    }

    #[test]
    fn missing_detail() {
        assert_eq!(parse("{}").detail_message(), None);
        assert_eq!(parse(r#"{"detail": null}"#).detail_message(), None);
        assert_eq!(parse(r#"{"detail": " "}"#).detail_message(), None);
    }
}
