//! Events
//!
//! Notifications generated whenever a subscribed resource changes. Each event
//! carries the log that triggered it; the log's concrete type is picked from
//! the event's `subscription` when the event is decoded.

use crate::error::{Error, Result};
use crate::resource::{ops, resolve, Envelope, Payload, Query, QueryStream, Resource, Transport};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const RESOURCE: Resource = Resource::new("Event");
pub const ATTEMPT_RESOURCE: Resource = Resource::new("EventAttempt");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "EventWire")]
pub struct Event {
    pub id: String,
    /// Discriminator for `log`, e.g. "transfer" or "invoice"
    pub subscription: String,
    pub log: Payload,
    pub created: String,
    pub is_delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

/// Event as it comes off the wire, before its log is resolved
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventWire {
    id: String,
    subscription: String,
    log: Value,
    created: String,
    #[serde(default)]
    is_delivered: bool,
    workspace_id: Option<String>,
}

impl TryFrom<EventWire> for Event {
    type Error = Error;

    fn try_from(wire: EventWire) -> Result<Self> {
        let envelope = resolve(Envelope::raw(wire.subscription, wire.log))?;
        Ok(Self {
            id: wire.id,
            subscription: envelope.discriminator,
            log: envelope.payload,
            created: wire.created,
            is_delivered: wire.is_delivered,
            workspace_id: wire.workspace_id,
        })
    }
}

/// A failed delivery of an event to a webhook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAttempt {
    pub id: String,
    pub code: String,
    pub message: String,
    pub webhook_id: String,
    pub event_id: String,
    pub created: String,
}

pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Event> {
    ops::get(client, &RESOURCE, id).await
}

/// Filters: `limit`, `after`, `before`, `isDelivered`
pub fn query<C>(client: &C, params: Query) -> QueryStream<Event>
where
    C: Transport + Clone + 'static,
{
    ops::query(client, &RESOURCE, params)
}

pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<Event>, Option<String>)>
where
    C: Transport + ?Sized,
{
    ops::page(client, &RESOURCE, params).await
}

/// Mark an event as delivered (or not) so it drops out of undelivered queries
pub async fn update<C>(client: &C, id: &str, is_delivered: bool) -> Result<Event>
where
    C: Transport + ?Sized,
{
    ops::update(client, &RESOURCE, id, &json!({ "isDelivered": is_delivered })).await
}

pub async fn delete<C: Transport + ?Sized>(client: &C, id: &str) -> Result<Event> {
    ops::delete(client, &RESOURCE, id).await
}

pub mod attempt {
    use super::{EventAttempt, ATTEMPT_RESOURCE};
    use crate::error::Result;
    use crate::resource::{ops, Query, QueryStream, Transport};

    pub async fn get<C: Transport + ?Sized>(client: &C, id: &str) -> Result<EventAttempt> {
        ops::get(client, &ATTEMPT_RESOURCE, id).await
    }

    /// Filters: `limit`, `after`, `before`, `eventIds`, `webhookIds`
    pub fn query<C>(client: &C, params: Query) -> QueryStream<EventAttempt>
    where
        C: Transport + Clone + 'static,
    {
        ops::query(client, &ATTEMPT_RESOURCE, params)
    }

    pub async fn page<C>(client: &C, params: &Query) -> Result<(Vec<EventAttempt>, Option<String>)>
    where
        C: Transport + ?Sized,
    {
        ops::page(client, &ATTEMPT_RESOURCE, params).await
    }
}
