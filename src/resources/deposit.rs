//! Deposits
//!
//! Money received into the workspace account. A deposit's amount can be
//! lowered through an update to reverse part of it.

use crate::error::Result;
use crate::resource::{ops, Query, QueryStream, Resource, Transport};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const RESOURCE: Resource = Resource::new("Deposit");
pub const LOG_RESOURCE: Resource = Resource::new("DepositLog");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub bank_code: String,
    pub branch_code: String,
    pub account_number: String,
    pub account_type: String,
    pub amount: i64,
    #[serde(rename = "type")]
    pub deposit_type: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
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
pub struct DepositLog {
    pub id: String,
    pub deposit: Deposit,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(rename = "type")]
    pub log_type: String,
    pub created: String,
}

pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Deposit> {
    ops::get(client, &RESOURCE, id).await
}

pub fn query<C>(client: &C, params: Query) -> QueryStream<Deposit>
where
    C: Transport + Clone + 'static,
{
    ops::query(client, &RESOURCE, params)
}

pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<Deposit>, Option<String>)>
where
    C: Transport + ?Sized,
{
    ops::page(client, &RESOURCE, params).await
}

/// Set the deposit's remaining amount; the difference is reversed
pub async fn update<C: Transport + ?Sized>(client: &C, id: &str, amount: i64) -> Result<Deposit> {
    ops::update(client, &RESOURCE, id, &json!({ "amount": amount })).await
}

pub mod log {
    use super::{DepositLog, LOG_RESOURCE};
    use crate::error::Result;
    use crate::resource::{ops, Query, QueryStream, Transport};

    pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<DepositLog> {
        ops::get(client, &LOG_RESOURCE, id).await
    }

    pub fn query<C>(client: &C, params: Query) -> QueryStream<DepositLog>
    where
        C: Transport + Clone + 'static,
    {
        ops::query(client, &LOG_RESOURCE, params)
    }

    pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<DepositLog>, Option<String>)>
    where
        C: Transport + ?Sized,
    {
        ops::page(client, &LOG_RESOURCE, params).await
    }
}
