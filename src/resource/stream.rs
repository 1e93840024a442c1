//! Streaming queries
//!
//! Turns a cursor-paginated list endpoint into a lazy stream of typed records.
//! A producer task walks the pages and hands them over one at a time through a
//! bounded channel; the consumer decodes records as they are pulled.

use super::fetcher::{decode, fetch_page};
use super::query::{Query, MAX_PAGE_LIMIT};
use super::registry::Resource;
use super::transport::{Page, Transport};
use crate::error::{Error, Result};
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Pages handed from producer to consumer at a time
const PAGE_CHANNEL_CAPACITY: usize = 1;

/// Lazy stream of records from a list endpoint.
///
/// Records arrive in server order. A record that fails to decode is yielded as
/// an `Err` and the stream carries on; a failed page fetch is yielded as an
/// `Err` and ends the stream. Dropping the stream stops the producer.
pub struct QueryStream<T> {
    resource: Resource,
    receiver: mpsc::Receiver<Result<Vec<Value>>>,
    buffer: VecDeque<Value>,
    producer: JoinHandle<()>,
    _record: PhantomData<fn() -> T>,
}

/// Start streaming `resource` records matching `query`.
///
/// `limit`, when set, caps the total number of records across all pages.
/// Without it the stream runs until the server stops returning a cursor.
/// Must be called from within a tokio runtime.
pub fn query<T, C>(client: &C, resource: Resource, query: Query) -> QueryStream<T>
where
    T: DeserializeOwned,
    C: Transport + Clone + 'static,
{
    let (sender, receiver) = mpsc::channel(PAGE_CHANNEL_CAPACITY);
    let producer = tokio::spawn(produce_pages(client.clone(), resource, query, sender));

    QueryStream {
        resource,
        receiver,
        buffer: VecDeque::new(),
        producer,
        _record: PhantomData,
    }
}

async fn produce_pages<C: Transport>(
    client: C,
    resource: Resource,
    mut query: Query,
    sender: mpsc::Sender<Result<Vec<Value>>>,
) {
    let mut remaining = query.get_limit();

    loop {
        if let Some(remaining) = remaining {
            if remaining == 0 {
                break;
            }
            let page_limit = remaining.min(u64::from(MAX_PAGE_LIMIT));
            query.set("limit", page_limit as i64);
        }

        let Page { mut records, cursor } = match fetch_page(&client, &resource, &query).await {
            Ok(page) => page,
            Err(err) => {
                let _ = sender.send(Err(err)).await;
                break;
            }
        };

        if let Some(remaining) = remaining.as_mut() {
            records.truncate(usize::try_from(*remaining).unwrap_or(usize::MAX));
            *remaining -= records.len() as u64;
        }

        if !records.is_empty() && sender.send(Ok(records)).await.is_err() {
            tracing::debug!("{}: query consumer dropped, stopping", resource);
            break;
        }

        match cursor {
            Some(cursor) => query.set("cursor", cursor),
            None => break,
        }
    }
}

impl<T: DeserializeOwned> QueryStream<T> {
    /// Drain the stream, keeping decoded records and errors apart
    pub async fn collect_lenient(mut self) -> (Vec<T>, Vec<Error>) {
        let mut records = Vec::new();
        let mut errors = Vec::new();
        while let Some(item) = self.next().await {
            match item {
                Ok(record) => records.push(record),
                Err(err) => errors.push(err),
            }
        }
        (records, errors)
    }
}

impl<T: DeserializeOwned> Stream for QueryStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(record) = this.buffer.pop_front() {
                let decoded = decode::<T>(&this.resource, record);
                if let Err(err) = &decoded {
                    tracing::warn!("{}: skipping record: {}", this.resource, err);
                }
                return Poll::Ready(Some(decoded));
            }

            match ready!(this.receiver.poll_recv(cx)) {
                Some(Ok(records)) => this.buffer.extend(records),
                Some(Err(err)) => return Poll::Ready(Some(Err(err))),
                None => return Poll::Ready(None),
            }
        }
    }
}

impl<T> Drop for QueryStream<T> {
    fn drop(&mut self) {
        self.producer.abort();
    }
}

impl<T> std::fmt::Debug for QueryStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryStream")
            .field("resource", &self.resource)
            .field("buffered", &self.buffer.len())
            .finish()
    }
}
