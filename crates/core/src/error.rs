use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Failure classes the HTTP surface distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Conflict,
    /// The catalog API failed or answered with something unusable.
    UpstreamError,
    InternalError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::UpstreamError => "upstream_error",
            Self::InternalError => "internal_error",
        }
    }

    pub fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::UpstreamError => 502,
            Self::InternalError => 500,
        }
    }
}

/// An error as reported to API clients: a kind, a human message and
/// optional structured details (the offending season, provider id, ...).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    details: Map<String, Value>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Map::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalError, message)
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &Map<String, Value> {
        &self.details
    }
}

/// JSON error envelope: `{ "error": { "code": "…", "message": "…", "details": {} } }`
#[derive(Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    pub details: Map<String, Value>,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(e: &ApiError) -> Self {
        Self {
            error: ErrorBody {
                code: e.code(),
                message: e.message.clone(),
                details: e.details.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_code_message_and_details() {
        let err = ApiError::conflict("episode data is stale")
            .with_detail("catalog_id", 1399u64)
            .with_detail("season", 2u32);
        let json = serde_json::to_value(ErrorEnvelope::from(&err)).unwrap();

        assert_eq!(json["error"]["code"], "conflict");
        assert_eq!(json["error"]["message"], "episode data is stale");
        assert_eq!(json["error"]["details"]["catalog_id"], 1399);
        assert_eq!(json["error"]["details"]["season"], 2);
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn details_default_to_empty_object() {
        let err = ApiError::upstream("catalog timed out");
        let json = serde_json::to_value(ErrorEnvelope::from(&err)).unwrap();
        assert_eq!(json["error"]["code"], "upstream_error");
        assert_eq!(json["error"]["details"], serde_json::json!({}));
        assert_eq!(err.kind(), ErrorKind::UpstreamError);
        assert_eq!(err.status_code(), 502);
    }
}
