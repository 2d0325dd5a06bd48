//! Error body returned by the backend
//!
//! Failed requests carry a JSON body of the form:
//! ```json
//! { "message": "Email already registered" }
//! ```
//! Some endpoints use `error` instead of `message`; both are accepted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, alias = "error")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Non-empty backend message, if any
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_and_alias() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"Horário inválido"}"#).unwrap();
        assert_eq!(body.message(), Some("Horário inválido"));

        let body: ApiErrorBody = serde_json::from_str(r#"{"error":"Not allowed"}"#).unwrap();
        assert_eq!(body.message(), Some("Not allowed"));
    }

    #[test]
    fn test_blank_message_is_none() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"   "}"#).unwrap();
        assert_eq!(body.message(), None);
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message(), None);
    }
}
