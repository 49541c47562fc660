/// DynamoDB point lookups and partition queries.
use std::collections::HashMap;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;

use super::AwsSession;
use super::attribute::{item_to_record, string_attribute};
use crate::records::{PARTITION_KEY_ATTR, PeekError, Record, RecordKey, SORT_KEY_ATTR};

/// Read access to the key-value store.
pub trait RecordStore {
    /// Fetch one item by its full key. A missing item is an empty record.
    ///
    /// # Errors
    ///
    /// Returns `PeekError::Store` on API failure or `PeekError::Unmarshal`.
    fn get_record(&self, table: &str, key: &RecordKey) -> Result<Record, PeekError>;

    /// Return the sort keys of every item in `partition`, in store order.
    ///
    /// # Errors
    ///
    /// Returns `PeekError::Store` on API failure.
    fn query_sort_keys(&self, table: &str, partition: &str) -> Result<Vec<String>, PeekError>;
}

/// [`RecordStore`] backed by the DynamoDB API.
pub struct DynamoStore<'a> {
    session: &'a AwsSession,
    client: aws_sdk_dynamodb::Client,
}

impl<'a> DynamoStore<'a> {
    #[must_use]
    pub fn new(session: &'a AwsSession) -> Self {
        let mut config = aws_sdk_dynamodb::config::Builder::from(session.config());
        if let Some(endpoint) = session.dynamodb_endpoint() {
            config = config.endpoint_url(endpoint);
        }
        Self {
            session,
            client: aws_sdk_dynamodb::Client::from_conf(config.build()),
        }
    }
}

impl RecordStore for DynamoStore<'_> {
    fn get_record(&self, table: &str, key: &RecordKey) -> Result<Record, PeekError> {
        tracing::debug!(table, pk = %key.partition, sk = %key.sort, "GetItem");
        let request = self
            .client
            .get_item()
            .table_name(table)
            .key(PARTITION_KEY_ATTR, AttributeValue::S(key.partition.clone()))
            .key(SORT_KEY_ATTR, AttributeValue::S(key.sort.clone()));

        let output = self
            .session
            .block_on(request.send())
            .map_err(|e| store_error("GetItem", table, &DisplayErrorContext(&e).to_string()))?;

        match output.item() {
            Some(item) => item_to_record(item),
            None => {
                tracing::debug!(table, pk = %key.partition, sk = %key.sort, "item not found");
                Ok(Record::new())
            }
        }
    }

    fn query_sort_keys(&self, table: &str, partition: &str) -> Result<Vec<String>, PeekError> {
        let mut sort_keys = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;
        let mut pages = 0_usize;

        loop {
            let request = self
                .client
                .query()
                .table_name(table)
                .key_condition_expression("#pk = :pkval")
                .projection_expression("#sk")
                .expression_attribute_names("#pk", PARTITION_KEY_ATTR)
                .expression_attribute_names("#sk", SORT_KEY_ATTR)
                .expression_attribute_values(":pkval", AttributeValue::S(partition.to_owned()))
                .set_exclusive_start_key(start_key.take());

            let output = self
                .session
                .block_on(request.send())
                .map_err(|e| store_error("Query", table, &DisplayErrorContext(&e).to_string()))?;
            pages += 1;

            sort_keys.extend(
                output
                    .items()
                    .iter()
                    .filter_map(|item| string_attribute(item, SORT_KEY_ATTR))
                    .map(str::to_owned),
            );

            match output.last_evaluated_key() {
                Some(last) if !last.is_empty() => start_key = Some(last.clone()),
                _ => break,
            }
        }

        tracing::debug!(table, partition, pages, found = sort_keys.len(), "Query complete");
        Ok(sort_keys)
    }
}

fn store_error(operation: &'static str, table: &str, message: &str) -> PeekError {
    PeekError::Store {
        operation,
        table: table.to_owned(),
        message: message.to_owned(),
    }
}
