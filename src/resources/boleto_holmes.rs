//! Boleto Holmes
//!
//! Investigations into the registration status of a boleto.

use crate::error::Result;
use crate::resource::{ops, Query, QueryStream, Resource, Transport};
use serde::{Deserialize, Serialize};

pub const RESOURCE: Resource = Resource::new("BoletoHolmes");
pub const LOG_RESOURCE: Resource = Resource::new("BoletoHolmesLog");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoletoHolmes {
    pub boleto_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoletoHolmesLog {
    pub id: String,
    pub holmes: BoletoHolmes,
    #[serde(rename = "type")]
    pub log_type: String,
    pub created: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

pub async fn create<C>(client: &C, holmes: &[BoletoHolmes]) -> Result<Vec<BoletoHolmes>>
where
    C: Transport + ?Sized,
{
    ops::create(client, &RESOURCE, holmes).await
}

pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<BoletoHolmes> {
    ops::get(client, &RESOURCE, id).await
}

pub fn query<C>(client: &C, params: Query) -> QueryStream<BoletoHolmes>
where
    C: Transport + Clone + 'static,
{
    ops::query(client, &RESOURCE, params)
}

pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<BoletoHolmes>, Option<String>)>
where
    C: Transport + ?Sized,
{
    ops::page(client, &RESOURCE, params).await
}

pub mod log {
    use super::{BoletoHolmesLog, LOG_RESOURCE};
    use crate::error::Result;
    use crate::resource::{ops, Query, QueryStream, Transport};

    pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<BoletoHolmesLog> {
        ops::get(client, &LOG_RESOURCE, id).await
    }

    pub fn query<C>(client: &C, params: Query) -> QueryStream<BoletoHolmesLog>
    where
        C: Transport + Clone + 'static,
    {
        ops::query(client, &LOG_RESOURCE, params)
    }

    pub async fn page<C>(
        client: &C,
        params: &Query,
    ) -> Result<(Vec<BoletoHolmesLog>, Option<String>)>
    where
        C: Transport + ?Sized,
    {
        ops::page(client, &LOG_RESOURCE, params).await
    }
}
