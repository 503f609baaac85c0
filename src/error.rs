use std::fmt::{Display, Formatter};

use serde_json::Value;

/// Classification of every failure this crate surfaces.
///
/// A single discriminated tag rather than an error hierarchy: callers match
/// on the kind and, where one exists, inspect the attached payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalyticsErrorKind {
    /// The request could not be transmitted or no response was received.
    Network,
    /// A response arrived but was not in the expected shape.
    Protocol,
    /// The response parsed but the HTTP status signals failure.
    Server,
    /// Debug endpoint parsed the hit and reported it as invalid.
    Validation,
    /// Client construction failed. Never produced by a send.
    Internal,
}

impl AnalyticsErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsErrorKind::Network => "analytics/network",
            AnalyticsErrorKind::Protocol => "analytics/protocol",
            AnalyticsErrorKind::Server => "analytics/server",
            AnalyticsErrorKind::Validation => "analytics/validation",
            AnalyticsErrorKind::Internal => "analytics/internal",
        }
    }
}

#[derive(Clone, Debug)]
pub struct AnalyticsError {
    kind: AnalyticsErrorKind,
    message: String,
    payload: Option<Value>,
}

impl AnalyticsError {
    pub fn new(kind: AnalyticsErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            payload: None,
        }
    }

    pub fn with_payload(kind: AnalyticsErrorKind, message: impl Into<String>, payload: Value) -> Self {
        Self {
            kind,
            message: message.into(),
            payload: Some(payload),
        }
    }

    pub fn kind(&self) -> &AnalyticsErrorKind {
        &self.kind
    }

    pub fn code_str(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Raw response text for [`AnalyticsErrorKind::Protocol`]; the parsed
    /// response body for [`AnalyticsErrorKind::Server`] and
    /// [`AnalyticsErrorKind::Validation`].
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}

impl Display for AnalyticsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for AnalyticsError {}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

pub fn network_error(message: impl Into<String>) -> AnalyticsError {
    AnalyticsError::new(AnalyticsErrorKind::Network, message)
}

pub fn protocol_error(message: impl Into<String>, raw_body: impl Into<String>) -> AnalyticsError {
    AnalyticsError::with_payload(
        AnalyticsErrorKind::Protocol,
        message,
        Value::String(raw_body.into()),
    )
}

pub fn server_error(message: impl Into<String>, body: Value) -> AnalyticsError {
    AnalyticsError::with_payload(AnalyticsErrorKind::Server, message, body)
}

pub fn validation_error(message: impl Into<String>, body: Value) -> AnalyticsError {
    AnalyticsError::with_payload(AnalyticsErrorKind::Validation, message, body)
}

pub fn internal_error(message: impl Into<String>) -> AnalyticsError {
    AnalyticsError::new(AnalyticsErrorKind::Internal, message)
}
