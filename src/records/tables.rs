/// Account-to-table mapping.
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{LookupMode, PeekError};

/// Table names used by one AWS account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTables {
    /// Environment label, only used in logs.
    #[serde(default)]
    pub name: String,
    pub policy_table: String,
    pub quote_table: String,
}

impl AccountTables {
    fn table_for(&self, mode: LookupMode) -> &str {
        match mode {
            LookupMode::Policy => &self.policy_table,
            LookupMode::Quote => &self.quote_table,
        }
    }
}

/// Lookup from account number to that account's tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMap {
    pub accounts: BTreeMap<String, AccountTables>,
}

impl TableMap {
    /// The testing and staging accounts.
    #[must_use]
    pub fn builtin() -> Self {
        let mut accounts = BTreeMap::new();
        accounts.insert(
            "596956765480".to_owned(),
            AccountTables {
                name: "testing".to_owned(),
                policy_table: "policy-api-policyTable777C1DD9-V7ZQ8ZD0HHTM".to_owned(),
                quote_table: "quote-api-quoteTableC29293A1-5EAYAUNFL0XD".to_owned(),
            },
        );
        accounts.insert(
            "743702672182".to_owned(),
            AccountTables {
                name: "staging".to_owned(),
                policy_table: "policy-api-policyTable777C1DD9-1V1XGR44T8OX0".to_owned(),
                quote_table: "quote-api-quoteTableC29293A1-NW27YUGPQXFP".to_owned(),
            },
        );
        Self { accounts }
    }

    /// Read a mapping from a JSON file. The file replaces the built-in accounts.
    ///
    /// # Errors
    ///
    /// Returns `PeekError::TableConfig` if the file is unreadable, malformed, or empty.
    pub fn load(path: &Path) -> Result<Self, PeekError> {
        let config_error = |reason: String| PeekError::TableConfig {
            path: path.display().to_string(),
            reason,
        };
        let contents = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let map: Self = serde_json::from_str(&contents).map_err(|e| config_error(e.to_string()))?;
        if map.accounts.is_empty() {
            return Err(config_error("no accounts defined".to_owned()));
        }
        Ok(map)
    }

    /// Load from `path` when given, otherwise use the built-ins.
    ///
    /// # Errors
    ///
    /// See [`TableMap::load`].
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, PeekError> {
        path.map_or_else(|| Ok(Self::builtin()), Self::load)
    }

    /// Pick the table for `account` in the given mode.
    ///
    /// # Errors
    ///
    /// Returns `PeekError::UnknownAccount` for accounts not in the map.
    pub fn resolve(&self, account: &str, mode: LookupMode) -> Result<&str, PeekError> {
        let tables = self
            .accounts
            .get(account)
            .ok_or_else(|| PeekError::UnknownAccount {
                account: account.to_owned(),
            })?;
        tracing::debug!(account, environment = %tables.name, ?mode, "resolved account tables");
        Ok(tables.table_for(mode))
    }
}
