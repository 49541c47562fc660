/// Lookup pipeline: identity → table → quote or policy flow.
pub mod policy;
pub mod quote;

use crate::aws::{AwsSession, DynamoStore, IdentityProvider, RecordStore, StsIdentity};
use crate::cli::output::{write_record, write_sort_keys};
use crate::cli::{Cli, OutputCtx};
use crate::prompt::{LatestState, SortKeySelector, TerminalPicker};
use crate::records::{LookupMode, PeekError, Record, RecordId, TableMap};

const PICKER_LABEL: &str = "Select a sort key to inspect";

/// What one run asks for.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub mode: LookupMode,
    pub id: RecordId,
    /// Fetch `STATE` instead of asking the picker.
    pub latest: bool,
    /// Stop after listing the policy's sort keys.
    pub list_keys: bool,
}

impl LookupRequest {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            mode: cli.mode(),
            id: cli.id.clone(),
            latest: cli.latest,
            list_keys: cli.list_keys,
        }
    }
}

/// Result of a lookup, ready for printing.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Record(Record),
    SortKeys(Vec<String>),
}

/// Run the whole tool against real AWS services.
///
/// # Errors
///
/// Returns `PeekError` from whichever step failed first.
pub fn dispatch(cli: &Cli, ctx: &OutputCtx) -> Result<(), PeekError> {
    let tables = TableMap::load_or_builtin(cli.tables.as_deref())?;

    let t_config = ctx.timer("load_aws_config");
    let session = AwsSession::load(&cli.aws_options())?;
    drop(t_config);

    let identity = StsIdentity::new(&session);
    let store = DynamoStore::new(&session);
    let request = LookupRequest::from_cli(cli);

    let mut picker = TerminalPicker::new(PICKER_LABEL);
    match lookup(&identity, &tables, &store, &mut picker, &request, ctx)? {
        Lookup::Record(record) => write_record(&record, ctx),
        Lookup::SortKeys(keys) => write_sort_keys(&keys, ctx),
    }
}

/// Resolve the table, then run the quote or policy flow.
///
/// `picker` is only consulted in policy mode without `latest`.
///
/// # Errors
///
/// Returns `PeekError` from identity, table resolution, store access, or selection.
pub fn lookup(
    identity: &impl IdentityProvider,
    tables: &TableMap,
    store: &impl RecordStore,
    picker: &mut dyn SortKeySelector,
    request: &LookupRequest,
    ctx: &OutputCtx,
) -> Result<Lookup, PeekError> {
    let table = resolve_table(identity, tables, request.mode, ctx)?;
    tracing::info!(%table, id = %request.id, mode = ?request.mode, "looking up record");

    match request.mode {
        LookupMode::Quote => quote::fetch_quote(store, &table, &request.id, ctx).map(Lookup::Record),
        LookupMode::Policy if request.list_keys => {
            policy::list_sort_keys(store, &table, &request.id, ctx).map(Lookup::SortKeys)
        }
        LookupMode::Policy => {
            let mut latest = LatestState;
            let selector: &mut dyn SortKeySelector = if request.latest {
                &mut latest
            } else {
                picker
            };
            policy::fetch_policy(store, selector, &table, &request.id, ctx).map(Lookup::Record)
        }
    }
}

/// Ask the identity service for the account and map it to a table name.
///
/// # Errors
///
/// Returns `PeekError` if the identity call fails or the account is unknown.
pub fn resolve_table(
    identity: &impl IdentityProvider,
    tables: &TableMap,
    mode: LookupMode,
    ctx: &OutputCtx,
) -> Result<String, PeekError> {
    let _t = ctx.timer("caller_identity");
    let account = identity.account_number()?;
    tables.resolve(&account, mode).map(str::to_owned)
}


#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::testing::*;
    use super::*;
    use crate::records::RecordKey;

    fn request(mode: LookupMode) -> LookupRequest {
        LookupRequest {
            mode,
            id: RecordId::parse(ID).unwrap(),
            latest: false,
            list_keys: false,
        }
    }

    fn parsed(args: &[&str]) -> LookupRequest {
        let cli = Cli::try_parse_from(args).unwrap();
        LookupRequest::from_cli(&cli)
    }

    #[test]
    fn quote_mode_fetches_fixed_key_from_quote_table() {
        let pk = format!("quote/{ID}");
        let store = FakeStore::default().with_item(&pk, "quote");
        let mut picker = ScriptedPicker { choose: 0, shown: None };

        let outcome = lookup(
            &FixedIdentity(Some(TESTING_ACCOUNT)),
            &TableMap::builtin(),
            &store,
            &mut picker,
            &request(LookupMode::Quote),
            &ctx(),
        )
        .unwrap();

        assert_eq!(
            store.gets.borrow().as_slice(),
            &[(
                "quote-api-quoteTableC29293A1-5EAYAUNFL0XD".to_owned(),
                RecordKey::new(pk.clone(), "quote")
            )]
        );
        assert!(store.queries.borrow().is_empty());
        assert!(picker.shown.is_none());
        assert_eq!(
            outcome,
            Lookup::Record(record(serde_json::json!({"_pk": pk, "_sk": "quote"})))
        );
    }

    #[test]
    fn latest_flag_skips_the_picker() {
        let pk = format!("policy/{ID}");
        let store = FakeStore::with_sort_keys(&["v1", "STATE"]).with_item(&pk, "STATE");
        let mut picker = ScriptedPicker { choose: 0, shown: None };

        let outcome = lookup(
            &FixedIdentity(Some(TESTING_ACCOUNT)),
            &TableMap::builtin(),
            &store,
            &mut picker,
            &parsed(&["ddbpeek", "--policy", "--latest", ID]),
            &ctx(),
        )
        .unwrap();

        assert!(picker.shown.is_none());
        let gets = store.gets.borrow();
        assert_eq!(gets.len(), 1);
        assert_eq!(gets[0].0, "policy-api-policyTable777C1DD9-V7ZQ8ZD0HHTM");
        assert_eq!(gets[0].1, RecordKey::new(pk, "STATE"));
        assert!(matches!(outcome, Lookup::Record(ref r) if !r.is_empty()));
    }

    #[test]
    fn without_latest_flag_the_picker_chooses() {
        let pk = format!("policy/{ID}");
        let store = FakeStore::with_sort_keys(&["v1", "STATE"]).with_item(&pk, "v1");
        let mut picker = ScriptedPicker { choose: 1, shown: None };

        lookup(
            &FixedIdentity(Some(TESTING_ACCOUNT)),
            &TableMap::builtin(),
            &store,
            &mut picker,
            &parsed(&["ddbpeek", "--policy", ID]),
            &ctx(),
        )
        .unwrap();

        assert!(picker.shown.is_some());
        assert_eq!(store.gets.borrow()[0].1, RecordKey::new(pk, "v1"));
    }

    #[test]
    fn policy_interactive_presents_ordered_keys_and_fetches_choice() {
        let pk = format!("policy/{ID}");
        let store = FakeStore::with_sort_keys(&["STATE#2", "STATE#1", "v1", "v3", "v2"])
            .with_item(&pk, "v2");
        let mut picker = ScriptedPicker { choose: 3, shown: None };

        lookup(
            &FixedIdentity(Some(TESTING_ACCOUNT)),
            &TableMap::builtin(),
            &store,
            &mut picker,
            &request(LookupMode::Policy),
            &ctx(),
        )
        .unwrap();

        assert_eq!(
            picker.shown.as_deref(),
            Some(&["STATE#1", "STATE#2", "v1", "v2", "v3"].map(String::from)[..])
        );
        assert_eq!(store.gets.borrow()[0].1, RecordKey::new(pk, "v2"));
    }

    #[test]
    fn empty_policy_partition_fails_before_selection_or_get() {
        let store = FakeStore::default();
        let mut picker = ScriptedPicker { choose: 0, shown: None };

        let err = lookup(
            &FixedIdentity(Some(TESTING_ACCOUNT)),
            &TableMap::builtin(),
            &store,
            &mut picker,
            &request(LookupMode::Policy),
            &ctx(),
        )
        .unwrap_err();

        assert!(matches!(err, PeekError::NoItems { .. }));
        assert!(picker.shown.is_none());
        assert!(store.gets.borrow().is_empty());
    }

    #[test]
    fn unknown_account_stops_before_store_access() {
        let store = FakeStore::default();
        let err = lookup(
            &FixedIdentity(Some("000000000000")),
            &TableMap::builtin(),
            &store,
            &mut LatestState,
            &request(LookupMode::Quote),
            &ctx(),
        )
        .unwrap_err();

        assert!(matches!(err, PeekError::UnknownAccount { .. }));
        assert!(store.gets.borrow().is_empty());
    }

    #[test]
    fn missing_account_is_fatal() {
        let err = resolve_table(
            &FixedIdentity(None),
            &TableMap::builtin(),
            LookupMode::Quote,
            &ctx(),
        )
        .unwrap_err();
        assert!(matches!(err, PeekError::MissingAccount));
    }

    #[test]
    fn list_keys_returns_ordered_keys_without_fetching() {
        let store = FakeStore::with_sort_keys(&["v2", "STATE", "v1"]);
        let mut req = request(LookupMode::Policy);
        req.list_keys = true;

        let outcome = lookup(
            &FixedIdentity(Some("743702672182")),
            &TableMap::builtin(),
            &store,
            &mut LatestState,
            &req,
            &ctx(),
        )
        .unwrap();

        assert_eq!(
            outcome,
            Lookup::SortKeys(vec!["STATE".to_owned(), "v1".to_owned(), "v2".to_owned()])
        );
        assert_eq!(
            store.queries.borrow()[0].0,
            "policy-api-policyTable777C1DD9-1V1XGR44T8OX0"
        );
        assert!(store.gets.borrow().is_empty());
    }
}
