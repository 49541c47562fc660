/// Record domain layer: ids and keys, sort-key ordering, table mapping, filtering.
pub mod errors;
pub mod keys;
pub mod order;
pub mod search;
pub mod tables;

pub use errors::PeekError;
pub use keys::{
    LookupMode, PARTITION_KEY_ATTR, QUOTE_SORT_KEY, RecordId, RecordKey, SORT_KEY_ATTR,
    STATE_SORT_KEY,
};
pub use order::order_sort_keys;
pub use search::filter_keys;
pub use tables::TableMap;

/// A fetched item: opaque field names mapped to JSON values.
pub type Record = serde_json::Map<String, serde_json::Value>;
