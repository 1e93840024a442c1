//! Transfers
//!
//! Outgoing transfers to other bank accounts via Pix or TED. Scheduled
//! transfers can be canceled with `delete`.

use crate::error::Result;
use crate::resource::{ops, Query, QueryStream, Resource, Transport};
use serde::{Deserialize, Serialize};

pub use super::brcode_payment::Rule;

pub const RESOURCE: Resource = Resource::new("Transfer");
pub const LOG_RESOURCE: Resource = Resource::new("TransferLog");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Amount in cents
    pub amount: i64,
    pub name: String,
    pub tax_id: String,
    /// ISPB for Pix, bank code for TED
    pub bank_code: String,
    pub branch_code: String,
    pub account_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    /// Idempotency key; repeated values are rejected by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transaction_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferLog {
    pub id: String,
    pub transfer: Transfer,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(rename = "type")]
    pub log_type: String,
    pub created: String,
}

pub async fn create<C>(client: &C, transfers: &[Transfer]) -> Result<Vec<Transfer>>
where
    C: Transport + ?Sized,
{
    ops::create(client, &RESOURCE, transfers).await
}

pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Transfer> {
    ops::get(client, &RESOURCE, id).await
}

pub async fn pdf<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Vec<u8>> {
    ops::get_content(client, &RESOURCE, id, "pdf", &Query::new()).await
}

/// Filters: `limit`, `after`, `before`, `transactionIds`, `status`, `sort`, `tags`, `ids`
pub fn query<C>(client: &C, params: Query) -> QueryStream<Transfer>
where
    C: Transport + Clone + 'static,
{
    ops::query(client, &RESOURCE, params)
}

pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<Transfer>, Option<String>)>
where
    C: Transport + ?Sized,
{
    ops::page(client, &RESOURCE, params).await
}

/// Cancel a scheduled transfer
pub async fn delete<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Transfer> {
    ops::delete(client, &RESOURCE, id).await
}

pub mod log {
    use super::{TransferLog, LOG_RESOURCE};
    use crate::error::Result;
    use crate::resource::{ops, Query, QueryStream, Transport};

    pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<TransferLog> {
        ops::get(client, &LOG_RESOURCE, id).await
    }

    /// Filters: `limit`, `after`, `before`, `types`, `transferIds`
    pub fn query<C>(client: &C, params: Query) -> QueryStream<TransferLog>
    where
        C: Transport + Clone + 'static,
    {
        ops::query(client, &LOG_RESOURCE, params)
    }

    pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<TransferLog>, Option<String>)>
    where
        C: Transport + ?Sized,
    {
        ops::page(client, &LOG_RESOURCE, params).await
    }
}
