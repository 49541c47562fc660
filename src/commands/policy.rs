/// Policy flow: enumerate sort keys, pick one, fetch it.
use crate::aws::RecordStore;
use crate::cli::OutputCtx;
use crate::prompt::SortKeySelector;
use crate::records::{
    LookupMode, PeekError, Record, RecordId, RecordKey, STATE_SORT_KEY, order_sort_keys,
};

/// Query every sort key under `policy/<id>` and order them for display.
///
/// # Errors
///
/// Returns `PeekError::NoItems` when the partition is empty, or a store error.
pub fn list_sort_keys(
    store: &impl RecordStore,
    table: &str,
    id: &RecordId,
    ctx: &OutputCtx,
) -> Result<Vec<String>, PeekError> {
    let partition = id.partition_key(LookupMode::Policy);

    let t_query = ctx.timer("query");
    let sort_keys = store.query_sort_keys(table, &partition)?;
    drop(t_query);

    if sort_keys.is_empty() {
        return Err(PeekError::NoItems {
            id: id.to_string(),
            table: table.to_owned(),
        });
    }
    Ok(order_sort_keys(sort_keys))
}

/// List the policy's sort keys, let `selector` choose one, and fetch that item.
///
/// # Errors
///
/// Returns `PeekError` from the query, the selector, or the point lookup.
pub fn fetch_policy(
    store: &impl RecordStore,
    selector: &mut dyn SortKeySelector,
    table: &str,
    id: &RecordId,
    ctx: &OutputCtx,
) -> Result<Record, PeekError> {
    let sort_keys = list_sort_keys(store, table, id, ctx)?;
    let sort_key = selector.select(&sort_keys)?;

    let key = RecordKey::new(id.partition_key(LookupMode::Policy), sort_key);
    let t_get = ctx.timer("get_item");
    let record = store.get_record(table, &key)?;
    drop(t_get);

    if record.is_empty() {
        // Printed as-is; with --latest the STATE key is never checked against the list.
        tracing::warn!(
            pk = %key.partition,
            sk = %key.sort,
            state_listed = sort_keys.iter().any(|k| k == STATE_SORT_KEY),
            "item not found, printing empty record"
        );
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{FakeStore, ID, ScriptedPicker, ctx};
    use crate::prompt::LatestState;

    fn id() -> RecordId {
        RecordId::parse(ID).unwrap()
    }

    #[test]
    fn query_targets_policy_partition() {
        let store = FakeStore::with_sort_keys(&["v1"]);
        let keys = list_sort_keys(&store, "policies", &id(), &ctx()).unwrap();
        assert_eq!(keys, vec!["v1".to_owned()]);
        assert_eq!(
            store.queries.borrow()[0],
            ("policies".to_owned(), format!("policy/{ID}"))
        );
    }

    #[test]
    fn latest_without_state_item_yields_empty_record() {
        let store = FakeStore::with_sort_keys(&["v1", "v2"]);
        let record = fetch_policy(&store, &mut LatestState, "policies", &id(), &ctx()).unwrap();
        assert!(record.is_empty());
        assert_eq!(store.gets.borrow()[0].1.sort, "STATE");
    }

    #[test]
    fn aborted_selection_skips_the_get() {
        let store = FakeStore::with_sort_keys(&["v1"]);
        let mut picker = ScriptedPicker { choose: 5, shown: None };
        let err = fetch_policy(&store, &mut picker, "policies", &id(), &ctx()).unwrap_err();
        assert!(matches!(err, PeekError::SelectionAborted));
        assert!(store.gets.borrow().is_empty());
    }
}
