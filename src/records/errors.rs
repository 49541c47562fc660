/// Errors from every stage of a lookup.
use thiserror::Error;

/// Everything that can end a `ddbpeek` run early.
///
/// Each variant is fatal; `main` prints it once and exits with [`PeekError::exit_code`].
#[derive(Debug, Error)]
pub enum PeekError {
    /// The positional identifier is not a UUID.
    #[error("The final argument must be a valid UUID: '{input}' ({reason})")]
    InvalidId {
        /// What the operator typed.
        input: String,
        /// Parser explanation.
        reason: String,
    },

    /// The table mapping file could not be read or parsed.
    #[error("Failed to load table mapping from {path}: {reason}")]
    TableConfig {
        /// Path given via `--tables`.
        path: String,
        /// Underlying IO or JSON error.
        reason: String,
    },

    /// Credential loading or the identity call failed.
    #[error("Failed to get caller identity: {0}")]
    Identity(String),

    /// The identity service answered without an account number.
    #[error("No account number found in the caller identity response")]
    MissingAccount,

    /// The account is not in the table mapping.
    #[error("Unknown account number {account}")]
    UnknownAccount {
        /// Account number reported by the identity service.
        account: String,
    },

    /// A DynamoDB request failed.
    #[error("{operation} API call failed on table {table}: {message}")]
    Store {
        /// `GetItem` or `Query`.
        operation: &'static str,
        /// Target table.
        table: String,
        /// SDK error with context.
        message: String,
    },

    /// A stored attribute could not be turned into JSON.
    #[error("Failed to unmarshal DynamoDB item: {0}")]
    Unmarshal(String),

    /// The policy partition holds no items.
    #[error("No items found for ID {id} in table {table}")]
    NoItems {
        /// Policy identifier.
        id: String,
        /// Queried table.
        table: String,
    },

    /// The operator aborted the sort-key prompt.
    #[error("Sort key selection aborted")]
    SelectionAborted,

    /// The sort-key prompt could not run or produced nothing usable.
    #[error("Failed to run prompt or no sort key selected: {0}")]
    Selection(String),

    /// Output serialization failed.
    #[error("Failed to render JSON: {0}")]
    Render(String),

    /// Process setup (logging, async runtime) failed.
    #[error("Startup failed: {0:#}")]
    Startup(#[from] anyhow::Error),
}

impl PeekError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidId { .. } | Self::TableConfig { .. } => 2,
            Self::Identity(_) | Self::MissingAccount => 3,
            Self::UnknownAccount { .. } | Self::NoItems { .. } => 4,
            Self::SelectionAborted => 130,
            Self::Store { .. }
            | Self::Unmarshal(_)
            | Self::Selection(_)
            | Self::Render(_)
            | Self::Startup(_) => 1,
        }
    }

    /// Machine-readable error code (snake_case) for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "invalid_id",
            Self::TableConfig { .. } => "config_error",
            Self::Identity(_) => "identity_error",
            Self::MissingAccount => "missing_account",
            Self::UnknownAccount { .. } => "unknown_account",
            Self::Store { .. } => "store_error",
            Self::Unmarshal(_) => "unmarshal_error",
            Self::NoItems { .. } => "no_items",
            Self::SelectionAborted => "selection_aborted",
            Self::Selection(_) => "selection_error",
            Self::Render(_) => "render_error",
            Self::Startup(_) => "startup_error",
        }
    }
}
