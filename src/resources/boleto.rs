//! Boletos
//!
//! Boleto bank slips issued to collect payments.

use crate::error::Result;
use crate::resource::{ops, Query, QueryStream, Resource, Transport};
use serde::{Deserialize, Serialize};

pub use super::invoice::{Description, Discount};

pub const RESOURCE: Resource = Resource::new("Boleto");
pub const LOG_RESOURCE: Resource = Resource::new("BoletoLog");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boleto {
    /// Amount in cents
    pub amount: i64,
    pub name: String,
    pub tax_id: String,
    pub street_line_1: String,
    pub street_line_2: String,
    pub district: String,
    pub city: String,
    pub state_code: String,
    pub zip_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fine: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdue_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<Description>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discounts: Vec<Discount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub our_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transaction_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoletoLog {
    pub id: String,
    pub boleto: Boleto,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(rename = "type")]
    pub log_type: String,
    pub created: String,
}

pub async fn create<C>(client: &C, boletos: &[Boleto]) -> Result<Vec<Boleto>>
where
    C: Transport + ?Sized,
{
    ops::create(client, &RESOURCE, boletos).await
}

pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Boleto> {
    ops::get(client, &RESOURCE, id).await
}

/// `layout` is "default" or "booklet"; `hidden_fields` lists fields to omit
pub async fn pdf<C>(
    client: &C,
    id: &str,
    layout: Option<&str>,
    hidden_fields: Vec<String>,
) -> Result<Vec<u8>>
where
    C: Transport + ?Sized,
{
    let mut params = Query::new().param("hiddenFields", hidden_fields);
    if let Some(layout) = layout {
        params.set("layout", layout);
    }
    ops::get_content(client, &RESOURCE, id, "pdf", &params).await
}

pub fn query<C: Transport + Clone + 'static>(client: &C, params: Query) -> QueryStream<Boleto> {
    ops::query(client, &RESOURCE, params)
}

pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<Boleto>, Option<String>)>
where
    C: Transport + ?Sized,
{
    ops::page(client, &RESOURCE, params).await
}

pub async fn delete<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Boleto> {
    ops::delete(client, &RESOURCE, id).await
}

pub mod log {
    use super::{BoletoLog, LOG_RESOURCE};
    use crate::error::Result;
    use crate::resource::{ops, Query, QueryStream, Transport};

    pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<BoletoLog> {
        ops::get(client, &LOG_RESOURCE, id).await
    }

    /// Filters: `limit`, `after`, `before`, `types`, `boletoIds`
    pub fn query<C>(client: &C, params: Query) -> QueryStream<BoletoLog>
    where
        C: Transport + Clone + 'static,
    {
        ops::query(client, &LOG_RESOURCE, params)
    }

    pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<BoletoLog>, Option<String>)>
    where
        C: Transport + ?Sized,
    {
        ops::page(client, &LOG_RESOURCE, params).await
    }
}
