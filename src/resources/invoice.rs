//! Invoices
//!
//! Pix invoices charged to a payer. Invoices can be updated (amount, due date,
//! expiration) or canceled while still pending, and expose a PDF, a QR code
//! and the payment information once paid.

use crate::error::Result;
use crate::resource::{ops, Query, QueryStream, Resource, Transport};
use serde::{Deserialize, Serialize};

pub const RESOURCE: Resource = Resource::new("Invoice");
pub const LOG_RESOURCE: Resource = Resource::new("InvoiceLog");
pub const PAYMENT_RESOURCE: Resource = Resource::new("InvoicePayment");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub percentage: f64,
    pub due: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Amount in cents
    pub amount: i64,
    pub tax_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    /// Seconds after `due` until the invoice expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fine: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discounts: Vec<Discount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<Description>,

    // Server populated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nominal_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fine_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transaction_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// Sparse update for a pending invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    /// "canceled" to cancel the invoice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,
}

/// Payment information of a paid invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayment {
    pub amount: i64,
    pub name: String,
    pub tax_id: String,
    pub bank_code: String,
    pub branch_code: String,
    pub account_number: String,
    pub account_type: String,
    pub end_to_end_id: String,
    pub method: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLog {
    pub id: String,
    pub invoice: Invoice,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(rename = "type")]
    pub log_type: String,
    pub created: String,
}

pub async fn create<C>(client: &C, invoices: &[Invoice]) -> Result<Vec<Invoice>>
where
    C: Transport + ?Sized,
{
    ops::create(client, &RESOURCE, invoices).await
}

pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Invoice> {
    ops::get(client, &RESOURCE, id).await
}

pub async fn pdf<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Vec<u8>> {
    ops::get_content(client, &RESOURCE, id, "pdf", &Query::new()).await
}

/// QR code PNG; `size` is the image side in pixels (default chosen by the API)
pub async fn qrcode<C>(client: &C, id: &str, size: Option<u32>) -> Result<Vec<u8>>
where
    C: Transport + ?Sized,
{
    let mut params = Query::new();
    if let Some(size) = size {
        params.set("size", size);
    }
    ops::get_content(client, &RESOURCE, id, "qrcode", &params).await
}

pub async fn payment<C: Transport + ?Sized>(client: &C, id: &str) -> Result<InvoicePayment> {
    ops::get_sub_resource(client, &RESOURCE, id, &PAYMENT_RESOURCE).await
}

/// Filters: `limit`, `after`, `before`, `status`, `tags`, `ids`
pub fn query<C: Transport + Clone + 'static>(client: &C, params: Query) -> QueryStream<Invoice> {
    ops::query(client, &RESOURCE, params)
}

pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<Invoice>, Option<String>)>
where
    C: Transport + ?Sized,
{
    ops::page(client, &RESOURCE, params).await
}

pub async fn update<C>(client: &C, id: &str, patch: &InvoicePatch) -> Result<Invoice>
where
    C: Transport + ?Sized,
{
    ops::update(client, &RESOURCE, id, patch).await
}

pub mod log {
    use super::{InvoiceLog, LOG_RESOURCE};
    use crate::error::Result;
    use crate::resource::{ops, Query, QueryStream, Transport};

    pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<InvoiceLog> {
        ops::get(client, &LOG_RESOURCE, id).await
    }

    /// Filters: `limit`, `after`, `before`, `types`, `invoiceIds`
    pub fn query<C>(client: &C, params: Query) -> QueryStream<InvoiceLog>
    where
        C: Transport + Clone + 'static,
    {
        ops::query(client, &LOG_RESOURCE, params)
    }

    pub async fn page<C: Transport + ?Sized>(
        client: &C,
        params: &Query,
    ) -> Result<(Vec<InvoiceLog>, Option<String>)> {
        ops::page(client, &LOG_RESOURCE, params).await
    }
}
