/// Serializable output envelopes.
use serde::{Deserialize, Serialize};

use crate::records::PeekError;

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `PeekError`.
    #[must_use]
    pub fn from_peek_error(err: &PeekError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}

/// One row of `--list-keys` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortKeyOutput {
    /// Position in the ordered list, starting at 1.
    pub position: usize,
    /// The sort key itself.
    pub sort_key: String,
    /// Whether this is a `STATE` entry.
    pub state: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_shape() {
        let err = PeekError::UnknownAccount {
            account: "42".to_owned(),
        };
        let json = serde_json::to_value(ErrorOutput::from_peek_error(&err)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ok": false,
                "error": {"code": "unknown_account", "message": "Unknown account number 42"}
            })
        );
    }
}
