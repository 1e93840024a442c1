//! Boleto Payments
//!
//! Payments of boletos issued by other institutions, identified either by
//! their digitable `line` or their `bar_code`.

use crate::error::Result;
use crate::resource::{ops, Query, QueryStream, Resource, Transport};
use serde::{Deserialize, Serialize};

pub const RESOURCE: Resource = Resource::new("BoletoPayment");
pub const LOG_RESOURCE: Resource = Resource::new("BoletoPaymentLog");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoletoPayment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_code: Option<String>,
    pub tax_id: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transaction_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoletoPaymentLog {
    pub id: String,
    pub payment: BoletoPayment,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(rename = "type")]
    pub log_type: String,
    pub created: String,
}

pub async fn create<C>(client: &C, payments: &[BoletoPayment]) -> Result<Vec<BoletoPayment>>
where
    C: Transport + ?Sized,
{
    ops::create(client, &RESOURCE, payments).await
}

pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<BoletoPayment> {
    ops::get(client, &RESOURCE, id).await
}

/// Payment receipt; only available once the payment succeeded
pub async fn pdf<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Vec<u8>> {
    ops::get_content(client, &RESOURCE, id, "pdf", &Query::new()).await
}

pub fn query<C>(client: &C, params: Query) -> QueryStream<BoletoPayment>
where
    C: Transport + Clone + 'static,
{
    ops::query(client, &RESOURCE, params)
}

pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<BoletoPayment>, Option<String>)>
where
    C: Transport + ?Sized,
{
    ops::page(client, &RESOURCE, params).await
}

pub async fn delete<C: Transport + ?Sized>(client: &C, id: &str) -> Result<BoletoPayment> {
    ops::delete(client, &RESOURCE, id).await
}

pub mod log {
    use super::{BoletoPaymentLog, LOG_RESOURCE};
    use crate::error::Result;
    use crate::resource::{ops, Query, QueryStream, Transport};

    pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<BoletoPaymentLog> {
        ops::get(client, &LOG_RESOURCE, id).await
    }

    pub fn query<C>(client: &C, params: Query) -> QueryStream<BoletoPaymentLog>
    where
        C: Transport + Clone + 'static,
    {
        ops::query(client, &LOG_RESOURCE, params)
    }

    pub async fn page<C>(
        client: &C,
        params: &Query,
    ) -> Result<(Vec<BoletoPaymentLog>, Option<String>)>
    where
        C: Transport + ?Sized,
    {
        ops::page(client, &LOG_RESOURCE, params).await
    }
}
