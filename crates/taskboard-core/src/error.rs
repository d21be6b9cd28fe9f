use crate::model::ParseEnumError;
use std::fmt;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidEnumValue,
    InvalidTimestamp,
    TaskNotFound,
    UnknownStatus,
    ApiRejected,
    TransportFailed,
    DecodeFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidEnumValue => "E2005",
            Self::InvalidTimestamp => "E2007",
            Self::TaskNotFound => "E2001",
            Self::UnknownStatus => "E2006",
            Self::ApiRejected => "E4001",
            Self::TransportFailed => "E4002",
            Self::DecodeFailed => "E4003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidEnumValue => "Invalid priority/view value",
            Self::InvalidTimestamp => "Invalid timestamp",
            Self::TaskNotFound => "Task not found",
            Self::UnknownStatus => "Unknown status",
            Self::ApiRejected => "Backend rejected the request",
            Self::TransportFailed => "Backend unreachable",
            Self::DecodeFailed => "Unexpected response payload",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidEnumValue => {
                Some("Use one of: critical, high, medium, low (priority); list, columns (mode).")
            }
            Self::InvalidTimestamp => {
                Some("Use an RFC 3339 timestamp (2026-06-01T09:00:00Z) or a date (YYYY-MM-DD).")
            }
            Self::TaskNotFound => Some("Re-fetch the board; the task may have been deleted."),
            Self::UnknownStatus => Some("Run `tb statuses` to see the board's statuses."),
            Self::ApiRejected => None,
            Self::TransportFailed => Some("Check --api / TASKBOARD_API_BASE and that the backend is up."),
            Self::DecodeFailed => Some("Check that the backend and client versions match."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by board loading and mutation workflows.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("failed to decode {what}: {reason}")]
    Decode { what: String, reason: String },

    #[error(transparent)]
    InvalidValue(#[from] ParseEnumError),

    #[error("invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },

    #[error("task {task_id} not found on board {board_id}")]
    TaskNotFound { task_id: i64, board_id: i64 },

    #[error("status '{status}' is not one of the board's statuses")]
    UnknownStatus { status: String },
}

impl BoardError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Api { .. } => ErrorCode::ApiRejected,
            Self::Transport { .. } => ErrorCode::TransportFailed,
            Self::Decode { .. } => ErrorCode::DecodeFailed,
            Self::InvalidValue(_) => ErrorCode::InvalidEnumValue,
            Self::InvalidTimestamp { .. } => ErrorCode::InvalidTimestamp,
            Self::TaskNotFound { .. } => ErrorCode::TaskNotFound,
            Self::UnknownStatus { .. } => ErrorCode::UnknownStatus,
        }
    }

    /// Remediation text, falling back to the code's summary.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or_else(|| code.message()).to_string()
    }

    /// HTTP status when the backend answered with a non-2xx response.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
