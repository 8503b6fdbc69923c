//! JSON envelope for `--json` mode.
//!
//! Report output goes under `data`; a failure goes under `error` with its
//! code, the collection or target it concerns, and any hints. The process
//! exit status is derived from the error code so scripts can tell a bad
//! `.env` apart from an unreachable cluster or a rejected pipeline.

use mflix::error::Hint;
use mflix::{Error, ErrorCode, Result};
use serde::Serialize;
use serde_json::Value;

/// Configuration or argument problem; nothing was sent to the store.
pub const EXIT_USAGE: i32 = 2;
/// A single-row report came back empty.
pub const EXIT_EMPTY_RESULT: i32 = 4;
/// The session could not be established.
pub const EXIT_CONNECTION: i32 = 10;
/// The store rejected a pipeline or returned rows of the wrong shape.
pub const EXIT_QUERY: i32 = 20;
pub const EXIT_INTERNAL: i32 = 1;

#[derive(Debug, Serialize)]
pub struct CliResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<Hint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl From<&Error> for CliError {
    fn from(err: &Error) -> Self {
        Self {
            code: err.code.as_str(),
            message: err.message.clone(),
            details: err.details.clone(),
            hints: err.hints.clone(),
            retryable: err.retryable,
        }
    }
}

impl CliResponse {
    pub fn from_result(result: &Result<Value>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data.clone()),
                error: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                error: Some(CliError::from(err)),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

pub fn print_json_result(result: Result<Value>) -> Result<()> {
    let payload = CliResponse::from_result(&result).to_json()?;
    super::write_stdout_line(&payload)
}

/// Serialize a command's output, pairing it with the exit status to use.
pub fn map_cmd_result_to_json<T: Serialize>(result: Result<(T, i32)>) -> (Result<Value>, i32) {
    let (data, exit_code) = match result {
        Ok(pair) => pair,
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            return (Err(err), exit_code);
        }
    };

    match serde_json::to_value(data) {
        Ok(value) => (Ok(value), exit_code),
        Err(e) => (
            Err(Error::internal_json(
                e.to_string(),
                Some("serialize command output".to_string()),
            )),
            EXIT_INTERNAL,
        ),
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigMissingKey
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationInvalidArgument => EXIT_USAGE,
        ErrorCode::StoreEmptyResult => EXIT_EMPTY_RESULT,
        ErrorCode::StoreConnectionFailed => EXIT_CONNECTION,
        ErrorCode::StoreQueryFailed => EXIT_QUERY,
        ErrorCode::InternalIoError | ErrorCode::InternalJsonError => EXIT_INTERNAL,
    }
}
