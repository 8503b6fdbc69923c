//! Structured error contract.
//!
//! Every failure carries a stable machine code, a human message, JSON details,
//! and optional hints. The CLI maps codes to exit statuses.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    ConfigMissingKey,
    ConfigInvalidValue,

    ValidationInvalidArgument,

    StoreConnectionFailed,
    StoreQueryFailed,
    StoreEmptyResult,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigMissingKey => "config.missing_key",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",
            ErrorCode::StoreConnectionFailed => "store.connection_failed",
            ErrorCode::StoreQueryFailed => "store.query_failed",
            ErrorCode::StoreEmptyResult => "store.empty_result",
            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    pub fn config_missing_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            ErrorCode::ConfigMissingKey,
            format!("Missing required configuration key: {}", key),
            json!({ "key": key }),
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let problem = problem.into();
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: {}", key, problem),
            json!({ "key": key, "value": value, "problem": problem }),
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        message: impl Into<String>,
        id: Option<String>,
        hints: Option<Vec<String>>,
    ) -> Self {
        let field = field.into();
        let message = message.into();
        let mut err = Self::new(
            ErrorCode::ValidationInvalidArgument,
            message.clone(),
            json!({ "field": field, "problem": message, "id": id }),
        );
        for hint in hints.unwrap_or_default() {
            err = err.with_hint(hint);
        }
        err
    }

    /// The store session could not be established or used.
    pub fn store_connection_failed(message: impl Into<String>, target: Option<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorCode::StoreConnectionFailed,
            format!("Store connection failed: {}", message),
            json!({ "error": message, "target": target }),
        )
    }

    /// The store rejected or failed to evaluate a pipeline.
    pub fn store_query_failed(message: impl Into<String>, collection: Option<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorCode::StoreQueryFailed,
            format!("Query failed: {}", message),
            json!({ "error": message, "collection": collection }),
        )
    }

    /// A call site required at least one document and the store returned none.
    pub fn store_empty_result(collection: impl Into<String>) -> Self {
        let collection = collection.into();
        Self::new(
            ErrorCode::StoreEmptyResult,
            format!("Aggregation on '{}' returned no documents", collection),
            json!({ "collection": collection }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let error = error.into();
        Self::new(
            ErrorCode::InternalIoError,
            format!("IO error: {}", error),
            json!({ "error": error, "context": context }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let error = error.into();
        Self::new(
            ErrorCode::InternalJsonError,
            format!("JSON error: {}", error),
            json!({ "error": error, "context": context }),
        )
    }

    /// Classify a driver error into the connection/query taxonomy.
    pub fn from_driver(err: &mongodb::error::Error, collection: Option<&str>) -> Self {
        use mongodb::error::ErrorKind;

        let message = err.to_string();
        match err.kind.as_ref() {
            ErrorKind::Authentication { .. } => {
                Self::store_connection_failed(message, None).with_hint(
                    "Check USER and PASSWORD; both are percent-encoded before use",
                )
            }
            ErrorKind::DnsResolve { .. } => Self::store_connection_failed(message, None)
                .with_hint("Check HOST; it must be an SRV host name such as cluster0.example.mongodb.net")
                .with_retryable(true),
            ErrorKind::ServerSelection { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::Io(_) => {
                Self::store_connection_failed(message, None).with_retryable(true)
            }
            ErrorKind::InvalidTlsConfig { .. } => Self::store_connection_failed(message, None),
            _ => Self::store_query_failed(message, collection.map(str::to_string)),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_namespaced() {
        assert_eq!(ErrorCode::StoreConnectionFailed.as_str(), "store.connection_failed");
        assert_eq!(ErrorCode::StoreQueryFailed.as_str(), "store.query_failed");
        assert_eq!(ErrorCode::StoreEmptyResult.as_str(), "store.empty_result");
    }

    #[test]
    fn with_hint_appends_in_order() {
        let err = Error::config_missing_key("HOST")
            .with_hint("first")
            .with_hint("second");
        let hints: Vec<_> = err.hints.iter().map(|h| h.message.as_str()).collect();
        assert_eq!(hints, vec!["first", "second"]);
    }

    #[test]
    fn empty_result_names_collection() {
        let err = Error::store_empty_result("movies");
        assert_eq!(err.code, ErrorCode::StoreEmptyResult);
        assert_eq!(err.details["collection"], "movies");
        assert!(err.message.contains("movies"));
    }

    #[test]
    fn driver_command_error_is_query_failure() {
        let decode = mongodb::bson::from_document::<Hint>(mongodb::bson::doc! {})
            .expect_err("missing field");
        let driver = mongodb::error::Error::from(decode);
        let err = Error::from_driver(&driver, Some("movies"));
        assert_eq!(err.code, ErrorCode::StoreQueryFailed);
        assert_eq!(err.details["collection"], "movies");
    }

    #[test]
    fn driver_io_error_is_connection_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let driver = mongodb::error::Error::from(io);
        let err = Error::from_driver(&driver, None);
        assert_eq!(err.code, ErrorCode::StoreConnectionFailed);
        assert_eq!(err.retryable, Some(true));
    }

    #[test]
    fn validation_argument_carries_hints() {
        let err = Error::validation_invalid_argument(
            "report",
            "Unknown report",
            Some("nope".to_string()),
            Some(vec!["Run 'mflix list'".to_string()]),
        );
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
        assert_eq!(err.details["id"], "nope");
        assert_eq!(err.hints.len(), 1);
    }
}
