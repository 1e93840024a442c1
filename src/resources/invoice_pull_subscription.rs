//! Invoice Pull Subscriptions
//!
//! Recurring Pix authorizations that let pull requests debit a payer.

use crate::error::Result;
use crate::resource::{ops, Query, QueryStream, Resource, Transport};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const RESOURCE: Resource = Resource::new("InvoicePullSubscription");
pub const LOG_RESOURCE: Resource = Resource::new("InvoicePullSubscriptionLog");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePullSubscription {
    pub start: String,
    pub interval: String,
    pub pull_mode: String,
    pub pull_retry_limit: i64,
    #[serde(rename = "type")]
    pub subscription_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_min_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Payer data; shape depends on `type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bacen_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePullSubscriptionLog {
    pub id: String,
    pub subscription: InvoicePullSubscription,
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
    subscriptions: &[InvoicePullSubscription],
) -> Result<Vec<InvoicePullSubscription>>
where
    C: Transport + ?Sized,
{
    ops::create(client, &RESOURCE, subscriptions).await
}

pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<InvoicePullSubscription> {
    ops::get(client, &RESOURCE, id).await
}

pub fn query<C>(client: &C, params: Query) -> QueryStream<InvoicePullSubscription>
where
    C: Transport + Clone + 'static,
{
    ops::query(client, &RESOURCE, params)
}

pub async fn page<C>(
    client: &C,
    params: &Query,
) -> Result<(Vec<InvoicePullSubscription>, Option<String>)>
where
    C: Transport + ?Sized,
{
    ops::page(client, &RESOURCE, params).await
}

pub async fn cancel<C>(client: &C, id: &str) -> Result<InvoicePullSubscription>
where
    C: Transport + ?Sized,
{
    ops::delete(client, &RESOURCE, id).await
}

pub mod log {
    use super::{InvoicePullSubscriptionLog, LOG_RESOURCE};
    use crate::error::Result;
    use crate::resource::{ops, Query, QueryStream, Transport};

    pub async fn get<C>(client: &C, id: &str) -> Result<InvoicePullSubscriptionLog>
    where
        C: Transport + ?Sized,
    {
        ops::get(client, &LOG_RESOURCE, id).await
    }

    pub fn query<C>(client: &C, params: Query) -> QueryStream<InvoicePullSubscriptionLog>
    where
        C: Transport + Clone + 'static,
    {
        ops::query(client, &LOG_RESOURCE, params)
    }

    pub async fn page<C>(
        client: &C,
        params: &Query,
    ) -> Result<(Vec<InvoicePullSubscriptionLog>, Option<String>)>
    where
        C: Transport + ?Sized,
    {
        ops::page(client, &LOG_RESOURCE, params).await
    }
}
