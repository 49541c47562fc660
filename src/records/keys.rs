/// Record identifiers and composite keys.
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::PeekError;

/// Partition key attribute name.
pub const PARTITION_KEY_ATTR: &str = "_pk";
/// Sort key attribute name.
pub const SORT_KEY_ATTR: &str = "_sk";
/// Fixed sort key of a quote record.
pub const QUOTE_SORT_KEY: &str = "quote";
/// Sort key holding the current state of a policy.
pub const STATE_SORT_KEY: &str = "STATE";

/// Which kind of record is being looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// `quote/<id>` in the quote table.
    Quote,
    /// `policy/<id>` in the policy table.
    Policy,
}

impl LookupMode {
    /// Select the mode from the `--policy` flag.
    #[must_use]
    pub fn from_policy_flag(policy: bool) -> Self {
        if policy { Self::Policy } else { Self::Quote }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Policy => "policy",
        }
    }
}

/// A quote or policy identifier that passed UUID validation.
///
/// Kept exactly as typed so the partition key matches what the services wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordId(String);

impl RecordId {
    /// Validate `input` as a UUID.
    ///
    /// # Errors
    ///
    /// Returns `PeekError::InvalidId` when `input` is not a UUID in any accepted form.
    pub fn parse(input: &str) -> Result<Self, PeekError> {
        Uuid::try_parse(input).map_err(|e| PeekError::InvalidId {
            input: input.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self(input.to_owned()))
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the partition key for this id, e.g. `policy/<id>`.
    #[must_use]
    pub fn partition_key(&self, mode: LookupMode) -> String {
        format!("{}/{}", mode.prefix(), self.0)
    }
}

impl FromStr for RecordId {
    type Err = PeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A full (partition key, sort key) pair addressing one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    pub partition: String,
    pub sort: String,
}

impl RecordKey {
    #[must_use]
    pub fn new(partition: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort: sort.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hyphenated_uuid() {
        let id = RecordId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(id.as_str(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn rejects_garbage() {
        let err = RecordId::parse("not-a-uuid").unwrap_err();
        assert!(matches!(err, PeekError::InvalidId { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn rejects_empty() {
        assert!(RecordId::parse("").is_err());
    }

    #[test]
    fn keeps_id_verbatim() {
        let id = RecordId::parse("550E8400-E29B-41D4-A716-446655440000").unwrap();
        assert_eq!(
            id.partition_key(LookupMode::Quote),
            "quote/550E8400-E29B-41D4-A716-446655440000"
        );
    }

    #[test]
    fn partition_key_per_mode() {
        let id: RecordId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(
            id.partition_key(LookupMode::Policy),
            "policy/550e8400-e29b-41d4-a716-446655440000"
        );
        assert_eq!(LookupMode::from_policy_flag(false), LookupMode::Quote);
    }
}
