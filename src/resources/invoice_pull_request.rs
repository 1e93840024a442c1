//! Invoice Pull Requests
//!
//! Requests to debit an invoice through an active pull subscription.

use crate::error::Result;
use crate::resource::{ops, Query, QueryStream, Resource, Transport};
use serde::{Deserialize, Serialize};

pub const RESOURCE: Resource = Resource::new("InvoicePullRequest");
pub const LOG_RESOURCE: Resource = Resource::new("InvoicePullRequestLog");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePullRequest {
    pub subscription_id: String,
    pub invoice_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePullRequestLog {
    pub id: String,
    pub request: InvoicePullRequest,
    #[serde(rename = "type")]
    pub log_type: String,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created: String,
}

pub async fn create<C>(
    client: &C,
    requests: &[InvoicePullRequest],
) -> Result<Vec<InvoicePullRequest>>
where
    C: Transport + ?Sized,
{
    ops::create(client, &RESOURCE, requests).await
}

pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<InvoicePullRequest> {
    ops::get(client, &RESOURCE, id).await
}

pub fn query<C>(client: &C, params: Query) -> QueryStream<InvoicePullRequest>
where
    C: Transport + Clone + 'static,
{
    ops::query(client, &RESOURCE, params)
}

pub async fn page<C>(
    client: &C,
    params: &Query,
) -> Result<(Vec<InvoicePullRequest>, Option<String>)>
where
    C: Transport + ?Sized,
{
    ops::page(client, &RESOURCE, params).await
}

pub async fn cancel<C: Transport + ?Sized>(client: &C, id: &str) -> Result<InvoicePullRequest> {
    ops::delete(client, &RESOURCE, id).await
}

pub mod log {
    use super::{InvoicePullRequestLog, LOG_RESOURCE};
    use crate::error::Result;
    use crate::resource::{ops, Query, QueryStream, Transport};

    pub async fn get<C>(client: &C, id: &str) -> Result<InvoicePullRequestLog>
    where
        C: Transport + ?Sized,
    {
        ops::get(client, &LOG_RESOURCE, id).await
    }

    pub fn query<C>(client: &C, params: Query) -> QueryStream<InvoicePullRequestLog>
    where
        C: Transport + Clone + 'static,
    {
        ops::query(client, &LOG_RESOURCE, params)
    }

    pub async fn page<C>(
        client: &C,
        params: &Query,
    ) -> Result<(Vec<InvoicePullRequestLog>, Option<String>)>
    where
        C: Transport + ?Sized,
    {
        ops::page(client, &LOG_RESOURCE, params).await
    }
}
