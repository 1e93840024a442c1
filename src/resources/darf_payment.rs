//! DARF Payments
//!
//! Payments of federal taxes through DARF slips.

use crate::error::Result;
use crate::resource::{ops, Query, QueryStream, Resource, Transport};
use serde::{Deserialize, Serialize};

pub const RESOURCE: Resource = Resource::new("DarfPayment");
pub const LOG_RESOURCE: Resource = Resource::new("DarfPaymentLog");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DarfPayment {
    pub description: String,
    pub revenue_code: String,
    pub tax_id: String,
    pub competence: String,
    pub nominal_amount: i64,
    pub fine_amount: i64,
    pub interest_amount: i64,
    pub due: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
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
pub struct DarfPaymentLog {
    pub id: String,
    pub payment: DarfPayment,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(rename = "type")]
    pub log_type: String,
    pub created: String,
}

pub async fn create<C>(client: &C, payments: &[DarfPayment]) -> Result<Vec<DarfPayment>>
where
    C: Transport + ?Sized,
{
    ops::create(client, &RESOURCE, payments).await
}

pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<DarfPayment> {
    ops::get(client, &RESOURCE, id).await
}

pub async fn pdf<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Vec<u8>> {
    ops::get_content(client, &RESOURCE, id, "pdf", &Query::new()).await
}

pub fn query<C>(client: &C, params: Query) -> QueryStream<DarfPayment>
where
    C: Transport + Clone + 'static,
{
    ops::query(client, &RESOURCE, params)
}

pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<DarfPayment>, Option<String>)>
where
    C: Transport + ?Sized,
{
    ops::page(client, &RESOURCE, params).await
}

pub async fn delete<C: Transport + ?Sized>(client: &C, id: &str) -> Result<DarfPayment> {
    ops::delete(client, &RESOURCE, id).await
}

pub mod log {
    use super::{DarfPaymentLog, LOG_RESOURCE};
    use crate::error::Result;
    use crate::resource::{ops, Query, QueryStream, Transport};

    pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<DarfPaymentLog> {
        ops::get(client, &LOG_RESOURCE, id).await
    }

    pub fn query<C>(client: &C, params: Query) -> QueryStream<DarfPaymentLog>
    where
        C: Transport + Clone + 'static,
    {
        ops::query(client, &LOG_RESOURCE, params)
    }

    pub async fn page<C>(
        client: &C,
        params: &Query,
    ) -> Result<(Vec<DarfPaymentLog>, Option<String>)>
    where
        C: Transport + ?Sized,
    {
        ops::page(client, &LOG_RESOURCE, params).await
    }
}
