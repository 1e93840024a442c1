//! Generic resource operations
//!
//! The create/get/query/page/update/delete verbs every resource module maps
//! onto. Each is one transport call plus a typed decode.

use super::fetcher::{decode, decode_all, fetch_typed_page};
use super::query::Query;
use super::registry::Resource;
use super::stream::{self, QueryStream};
use super::transport::Transport;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

fn encode<T: Serialize + ?Sized>(resource: &Resource, record: &T) -> Result<Value> {
    serde_json::to_value(record).map_err(|e| {
        Error::Config(format!("unserializable {} request body: {}", resource.name, e))
    })
}

/// POST many records; returns them with server-populated fields
pub async fn create<T, C>(client: &C, resource: &Resource, records: &[T]) -> Result<Vec<T>>
where
    T: Serialize + DeserializeOwned,
    C: Transport + ?Sized,
{
    let raw = records
        .iter()
        .map(|record| encode(resource, record))
        .collect::<Result<Vec<_>>>()?;
    let created = client.post_multi(resource, raw, &Query::new()).await?;
    decode_all(resource, created)
}

/// POST one record as the request body
pub async fn create_single<T, C>(client: &C, resource: &Resource, record: &T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    C: Transport + ?Sized,
{
    let raw = encode(resource, record)?;
    let created = client.post_single(resource, raw).await?;
    decode(resource, created)
}

pub async fn get<T, C>(client: &C, resource: &Resource, id: &str) -> Result<T>
where
    T: DeserializeOwned,
    C: Transport + ?Sized,
{
    let record = client.get_by_id(resource, id, &Query::new()).await?;
    decode(resource, record)
}

/// Binary sub-resource such as a PDF or QR code PNG
pub async fn get_content<C>(
    client: &C,
    resource: &Resource,
    id: &str,
    sub_resource: &str,
    query: &Query,
) -> Result<Vec<u8>>
where
    C: Transport + ?Sized,
{
    client.get_content(resource, id, sub_resource, query).await
}

pub async fn get_sub_resource<T, C>(
    client: &C,
    resource: &Resource,
    id: &str,
    sub_resource: &Resource,
) -> Result<T>
where
    T: DeserializeOwned,
    C: Transport + ?Sized,
{
    let record = client.get_sub_resource(resource, id, sub_resource).await?;
    decode(sub_resource, record)
}

/// Lazy stream over every matching record
pub fn query<T, C>(client: &C, resource: &Resource, params: Query) -> QueryStream<T>
where
    T: DeserializeOwned,
    C: Transport + Clone + 'static,
{
    stream::query(client, *resource, params)
}

/// One page of records plus the cursor for the next page
pub async fn page<T, C>(
    client: &C,
    resource: &Resource,
    params: &Query,
) -> Result<(Vec<T>, Option<String>)>
where
    T: DeserializeOwned,
    C: Transport + ?Sized,
{
    fetch_typed_page(client, resource, params).await
}

/// PATCH with a sparse update
pub async fn update<T, P, C>(client: &C, resource: &Resource, id: &str, patch: &P) -> Result<T>
where
    T: DeserializeOwned,
    P: Serialize + ?Sized,
    C: Transport + ?Sized,
{
    let partial = encode(resource, patch)?;
    let record = client.patch(resource, id, partial).await?;
    decode(resource, record)
}

/// DELETE; returns the final state of the record
pub async fn delete<T, C>(client: &C, resource: &Resource, id: &str) -> Result<T>
where
    T: DeserializeOwned,
    C: Transport + ?Sized,
{
    let record = client.delete_by_id(resource, id).await?;
    decode(resource, record)
}
