//! Balance
//!
//! The workspace's current account balance.

use crate::error::{Error, Result};
use crate::resource::{ops, Query, Resource, Transport};
use serde::{Deserialize, Serialize};

pub const RESOURCE: Resource = Resource::new("Balance");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub id: String,
    /// Amount in cents
    pub amount: i64,
    pub currency: String,
    pub updated: String,
}

/// The balance endpoint is a list with a single entry
pub async fn get<C: Transport + ?Sized>(client: &C) -> Result<Balance> {
    let (balances, _) = ops::page::<Balance, _>(client, &RESOURCE, &Query::new()).await?;
    balances.into_iter().next().ok_or_else(|| Error::Unknown {
        status: 0,
        message: "balance endpoint returned no balance".to_string(),
    })
}
