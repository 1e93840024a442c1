//! Webhooks
//!
//! Subscriptions that tell the API where to deliver events.

use crate::error::Result;
use crate::resource::{ops, Query, QueryStream, Resource, Transport};
use serde::{Deserialize, Serialize};

pub const RESOURCE: Resource = Resource::new("Webhook");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub url: String,
    /// Event subscriptions, e.g. "transfer", "boleto", "invoice"
    pub subscriptions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Webhooks are created one at a time
pub async fn create<C: Transport + ?Sized>(client: &C, webhook: &Webhook) -> Result<Webhook> {
    ops::create_single(client, &RESOURCE, webhook).await
}

pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Webhook> {
    ops::get(client, &RESOURCE, id).await
}

pub fn query<C>(client: &C, params: Query) -> QueryStream<Webhook>
where
    C: Transport + Clone + 'static,
{
    ops::query(client, &RESOURCE, params)
}

pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<Webhook>, Option<String>)>
where
    C: Transport + ?Sized,
{
    ops::page(client, &RESOURCE, params).await
}

pub async fn delete<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Webhook> {
    ops::delete(client, &RESOURCE, id).await
}
