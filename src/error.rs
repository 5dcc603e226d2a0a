//! Error taxonomy for workbook inspection.
//!
//! Lookups owned by this crate (path resolution, sheet lookup, address parsing)
//! fail with a typed [`InspectError`]. Failures raised by the workbook collaborator
//! stay as `anyhow::Error` and are reported unmodified.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Custom JSON-RPC application codes attached to error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    /// Invalid method parameter(s)
    InvalidParams = -32602,
    /// Internal JSON-RPC error
    InternalError = -32603,
    /// Workbook file not found at any search location
    WorkbookNotFound = -32001,
    /// Sheet not found in workbook
    SheetNotFound = -32006,
    /// Cell or range address is malformed
    InvalidRange = -32007,
    /// Tool disabled by configuration
    ToolDisabled = -32014,
}

impl ErrorCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Error category used in structured log fields.
    pub fn category(&self) -> &'static str {
        match self {
            ErrorCode::InvalidParams | ErrorCode::InvalidRange => "validation_error",
            ErrorCode::InternalError => "server_error",
            ErrorCode::WorkbookNotFound | ErrorCode::SheetNotFound => "resource_not_found",
            ErrorCode::ToolDisabled => "not_found",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectError {
    /// No search location held the requested file. Carries the caller's input verbatim.
    #[error("File '{path}' does not exist")]
    FileNotFound { path: String },

    #[error("Sheet {sheet} does not exist")]
    SheetNotFound { sheet: String },

    #[error("invalid cell address '{address}'")]
    InvalidCellAddress { address: String },

    #[error("invalid range '{range}'")]
    InvalidRange { range: String },

    #[error("tool '{tool_name}' is disabled by server configuration")]
    ToolDisabled { tool_name: String },
}

impl InspectError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InspectError::FileNotFound { .. } => ErrorCode::WorkbookNotFound,
            InspectError::SheetNotFound { .. } => ErrorCode::SheetNotFound,
            InspectError::InvalidCellAddress { .. } | InspectError::InvalidRange { .. } => {
                ErrorCode::InvalidRange
            }
            InspectError::ToolDisabled { .. } => ErrorCode::ToolDisabled,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    code: i32,
    kind: String,
    category: &'static str,
}

impl ErrorPayload {
    fn new(code: ErrorCode) -> Self {
        Self {
            code: code.code(),
            kind: format!("{code:?}"),
            category: code.category(),
        }
    }
}

/// Map a tool failure to the error returned over MCP.
///
/// Typed lookups pick their code from [`InspectError`]; anything else (corrupt
/// file, unsupported format) is an internal error carrying the full context chain.
pub fn to_mcp_error(error: anyhow::Error) -> rmcp::ErrorData {
    let Some(inspect) = error.downcast_ref::<InspectError>() else {
        let data = serde_json::to_value(ErrorPayload::new(ErrorCode::InternalError)).ok();
        return rmcp::ErrorData::internal_error(format!("{error:#}"), data);
    };

    let code = inspect.code();
    let data = serde_json::to_value(ErrorPayload::new(code)).ok();
    let message = inspect.to_string();
    match inspect {
        InspectError::InvalidCellAddress { .. } | InspectError::InvalidRange { .. } => {
            rmcp::ErrorData::invalid_params(message, data)
        }
        InspectError::ToolDisabled { .. } => rmcp::ErrorData::invalid_request(message, data),
        InspectError::FileNotFound { .. } | InspectError::SheetNotFound { .. } => {
            rmcp::ErrorData::internal_error(message, data)
        }
    }
}
