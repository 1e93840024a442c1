//! Resource Fetcher
//!
//! Single-page fetching and typed decoding of raw records.

use super::query::{Query, MAX_PAGE_LIMIT};
use super::registry::Resource;
use super::transport::{Page, Transport};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Fetch one page of raw records.
///
/// `limit` is passed through untouched; keeping it within 1-100 is up to the
/// caller.
pub async fn fetch_page<C>(client: &C, resource: &Resource, query: &Query) -> Result<Page>
where
    C: Transport + ?Sized,
{
    if let Some(limit) = query.get_limit() {
        if limit == 0 || limit > u64::from(MAX_PAGE_LIMIT) {
            tracing::debug!("{}: page limit {} is outside 1-100", resource, limit);
        }
    }

    let page = client.get_page(resource, query).await?;

    tracing::debug!(
        "{}: fetched {} records, cursor={:?}",
        resource,
        page.records.len(),
        page.cursor
    );

    Ok(page)
}

/// Fetch one page and decode every record.
///
/// Returns the records and the cursor for the next page. Any record that
/// fails to decode fails the whole call.
pub async fn fetch_typed_page<T, C>(
    client: &C,
    resource: &Resource,
    query: &Query,
) -> Result<(Vec<T>, Option<String>)>
where
    T: DeserializeOwned,
    C: Transport + ?Sized,
{
    let page = fetch_page(client, resource, query).await?;
    let records = page
        .records
        .into_iter()
        .map(|record| decode(resource, record))
        .collect::<Result<Vec<T>>>()?;
    Ok((records, page.cursor))
}

/// Decode one raw record into a fresh value
pub fn decode<T: DeserializeOwned>(resource: &Resource, record: Value) -> Result<T> {
    serde_json::from_value(record).map_err(|e| Error::decode(resource.name, e))
}

/// Decode a list of raw records, failing on the first bad one
pub fn decode_all<T: DeserializeOwned>(resource: &Resource, records: Vec<Value>) -> Result<Vec<T>> {
    records
        .into_iter()
        .map(|record| decode(resource, record))
        .collect()
}
