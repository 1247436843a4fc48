use serde::Serialize;

use crate::error::ScrapeError;

/// JSON envelope handed to callers that cannot receive a Rust `Result`
///
/// `{"success": true, "data": ...}` or
/// `{"success": false, "error": {"type", "message", "host"?}}`.
#[derive(Debug, Serialize)]
pub struct ScrapeResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl From<&ScrapeError> for ErrorBody {
    fn from(error: &ScrapeError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
            host: error.host().map(str::to_string),
        }
    }
}

impl<T: Serialize> ScrapeResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: &ScrapeError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody::from(error)),
        }
    }

    pub fn from_result(result: Result<T, ScrapeError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::err(&error),
        }
    }

    /// Serialized envelope.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<T: Serialize> From<Result<T, ScrapeError>> for ScrapeResponse<T> {
    fn from(result: Result<T, ScrapeError>) -> Self {
        Self::from_result(result)
    }
}
