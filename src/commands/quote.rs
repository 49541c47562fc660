/// Quote flow: one point lookup on the fixed `quote` sort key.
use crate::aws::RecordStore;
use crate::cli::OutputCtx;
use crate::records::{LookupMode, PeekError, QUOTE_SORT_KEY, Record, RecordId, RecordKey};

/// Fetch `quote/<id>` / `quote` from `table`.
///
/// # Errors
///
/// Returns `PeekError` on store or unmarshal failure.
pub fn fetch_quote(
    store: &impl RecordStore,
    table: &str,
    id: &RecordId,
    ctx: &OutputCtx,
) -> Result<Record, PeekError> {
    let key = RecordKey::new(id.partition_key(LookupMode::Quote), QUOTE_SORT_KEY);
    let _t = ctx.timer("get_item");
    store.get_record(table, &key)
}
