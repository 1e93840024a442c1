//! BR Code Payments
//!
//! Payments of Pix BR Codes. A scheduled payment can be canceled by updating
//! its status to "canceled".

use crate::error::Result;
use crate::resource::{ops, Query, QueryStream, Resource, Transport};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const RESOURCE: Resource = Resource::new("BrcodePayment");
pub const LOG_RESOURCE: Resource = Resource::new("BrcodePaymentLog");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub key: String,
    pub value: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrcodePayment {
    pub brcode: String,
    pub tax_id: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transaction_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrcodePaymentLog {
    pub id: String,
    pub payment: BrcodePayment,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(rename = "type")]
    pub log_type: String,
    pub created: String,
}

pub async fn create<C>(client: &C, payments: &[BrcodePayment]) -> Result<Vec<BrcodePayment>>
where
    C: Transport + ?Sized,
{
    ops::create(client, &RESOURCE, payments).await
}

pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<BrcodePayment> {
    ops::get(client, &RESOURCE, id).await
}

pub async fn pdf<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Vec<u8>> {
    ops::get_content(client, &RESOURCE, id, "pdf", &Query::new()).await
}

pub fn query<C>(client: &C, params: Query) -> QueryStream<BrcodePayment>
where
    C: Transport + Clone + 'static,
{
    ops::query(client, &RESOURCE, params)
}

pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<BrcodePayment>, Option<String>)>
where
    C: Transport + ?Sized,
{
    ops::page(client, &RESOURCE, params).await
}

/// Only `status: "canceled"` is accepted by the API
pub async fn update<C>(client: &C, id: &str, status: &str) -> Result<BrcodePayment>
where
    C: Transport + ?Sized,
{
    ops::update(client, &RESOURCE, id, &json!({ "status": status })).await
}

pub mod log {
    use super::{BrcodePaymentLog, LOG_RESOURCE};
    use crate::error::Result;
    use crate::resource::{ops, Query, QueryStream, Transport};

    pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<BrcodePaymentLog> {
        ops::get(client, &LOG_RESOURCE, id).await
    }

    pub fn query<C>(client: &C, params: Query) -> QueryStream<BrcodePaymentLog>
    where
        C: Transport + Clone + 'static,
    {
        ops::query(client, &LOG_RESOURCE, params)
    }

    pub async fn page<C>(
        client: &C,
        params: &Query,
    ) -> Result<(Vec<BrcodePaymentLog>, Option<String>)>
    where
        C: Transport + ?Sized,
    {
        ops::page(client, &LOG_RESOURCE, params).await
    }
}
