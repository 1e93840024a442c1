//! Streaming query tests against an in-memory transport
//!
//! Covers cursor following, the total `limit`, ordering, lenient decoding and
//! producer shutdown when a stream is dropped.

use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use serde_json::{json, Value};
use starkbank::resource::{ops, Page, Query, Resource, Transport};
use starkbank::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

const RESOURCE: Resource = Resource::new("Transfer");

#[derive(Debug, Deserialize, PartialEq)]
struct Record {
    id: String,
    amount: i64,
}

fn record(id: &str) -> Value {
    json!({"id": id, "amount": 1})
}

/// How the fake server answers list requests
enum Pages {
    /// Fixed pages keyed by the cursor that requests them ("" for the first)
    Scripted(HashMap<String, Result<Page>>),
    /// Endless listing honoring the requested limit, capped at 100 per page
    Endless,
}

struct FakeTransport {
    pages: Pages,
    /// (limit, cursor) of every list request
    requests: Mutex<Vec<(Option<u64>, Option<String>)>>,
}

impl FakeTransport {
    fn scripted(pages: Vec<(&str, Result<Page>)>) -> Arc<Self> {
        let pages = pages
            .into_iter()
            .map(|(cursor, page)| (cursor.to_string(), page))
            .collect();
        Arc::new(Self {
            pages: Pages::Scripted(pages),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn endless() -> Arc<Self> {
        Arc::new(Self {
            pages: Pages::Endless,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<(Option<u64>, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }
}

fn unsupported() -> Error {
    Error::Unknown {
        status: 0,
        message: "not supported by the fake transport".to_string(),
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get_page(&self, _resource: &Resource, query: &Query) -> Result<Page> {
        let cursor = query.get_cursor().map(|c| c.to_string());
        self.requests
            .lock()
            .unwrap()
            .push((query.get_limit(), cursor.clone()));

        match &self.pages {
            Pages::Scripted(pages) => {
                match pages.get(cursor.as_deref().unwrap_or("")) {
                    Some(Ok(page)) => Ok(page.clone()),
                    Some(Err(_)) => Err(Error::InternalServer),
                    None => Err(unsupported()),
                }
            }
            Pages::Endless => {
                let offset: u64 = cursor.as_deref().unwrap_or("0").parse().unwrap();
                let size = query.get_limit().unwrap_or(100).min(100);
                let records = (offset..offset + size)
                    .map(|i| record(&i.to_string()))
                    .collect();
                Ok(Page {
                    records,
                    cursor: Some((offset + size).to_string()),
                })
            }
        }
    }

    async fn get_by_id(&self, _: &Resource, _: &str, _: &Query) -> Result<Value> {
        Err(unsupported())
    }

    async fn get_content(&self, _: &Resource, _: &str, _: &str, _: &Query) -> Result<Vec<u8>> {
        Err(unsupported())
    }

    async fn get_sub_resource(&self, _: &Resource, _: &str, _: &Resource) -> Result<Value> {
        Err(unsupported())
    }

    async fn post_multi(&self, _: &Resource, _: Vec<Value>, _: &Query) -> Result<Vec<Value>> {
        Err(unsupported())
    }

    async fn post_single(&self, _: &Resource, _: Value) -> Result<Value> {
        Err(unsupported())
    }

    async fn patch(&self, _: &Resource, _: &str, _: Value) -> Result<Value> {
        Err(unsupported())
    }

    async fn delete_by_id(&self, _: &Resource, _: &str) -> Result<Value> {
        Err(unsupported())
    }
}

fn page(records: Vec<Value>, cursor: Option<&str>) -> Result<Page> {
    Ok(Page {
        records,
        cursor: cursor.map(|c| c.to_string()),
    })
}

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

/// Pages [A, B] with cursor "c1", then [C] with no cursor
fn two_pages() -> Arc<FakeTransport> {
    FakeTransport::scripted(vec![
        ("", page(vec![record("A"), record("B")], Some("c1"))),
        ("c1", page(vec![record("C")], None)),
    ])
}

#[tokio::test]
async fn test_query_walks_every_page_in_order() {
    let transport = two_pages();

    let records: Vec<Record> = ops::query(&transport, &RESOURCE, Query::new())
        .map(|r| r.unwrap())
        .collect()
        .await;

    assert_eq!(ids(&records), vec!["A", "B", "C"]);
    assert_eq!(
        transport.requests(),
        vec![(None, None), (None, Some("c1".to_string()))]
    );
}

#[tokio::test]
async fn test_page_fetches_once() {
    let transport = two_pages();

    let fetched = ops::page::<Record, _>(&transport, &RESOURCE, &Query::new()).await;
    let (records, cursor) = assert_ok!(fetched);

    assert_eq!(ids(&records), vec!["A", "B"]);
    assert_eq!(cursor.as_deref(), Some("c1"));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_page_union_equals_query() {
    let transport = two_pages();

    let mut paged = Vec::new();
    let mut query = Query::new();
    loop {
        let (records, cursor) = ops::page::<Record, _>(&transport, &RESOURCE, &query)
            .await
            .unwrap();
        paged.extend(records);
        match cursor {
            Some(cursor) => query = Query::new().cursor(&cursor),
            None => break,
        }
    }

    let streamed: Vec<Record> = ops::query(&transport, &RESOURCE, Query::new())
        .map(|r| r.unwrap())
        .collect()
        .await;

    assert_eq!(paged, streamed);
}

#[tokio::test]
async fn test_limit_spans_pages() {
    let transport = FakeTransport::endless();

    let records: Vec<Record> = ops::query(&transport, &RESOURCE, Query::new().limit(150))
        .map(|r| r.unwrap())
        .collect()
        .await;

    assert_eq!(records.len(), 150);
    assert_eq!(records[0].id, "0");
    assert_eq!(records[149].id, "149");
    assert_eq!(
        transport.requests(),
        vec![(Some(100), None), (Some(50), Some("100".to_string()))]
    );
}

#[tokio::test]
async fn test_limit_below_page_size() {
    let transport = two_pages();

    let records: Vec<Record> = ops::query(&transport, &RESOURCE, Query::new().limit(1))
        .map(|r| r.unwrap())
        .collect()
        .await;

    assert_eq!(ids(&records), vec!["A"]);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_empty_listing() {
    let transport = FakeTransport::scripted(vec![("", page(vec![], None))]);

    let mut stream = ops::query::<Record, _>(&transport, &RESOURCE, Query::new());

    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_undecodable_record_is_skipped_with_error() {
    let transport = FakeTransport::scripted(vec![
        ("", page(vec![record("A"), json!({"id": "B", "amount": "lots"})], Some("c1"))),
        ("c1", page(vec![record("C")], None)),
    ]);

    let stream = ops::query::<Record, _>(&transport, &RESOURCE, Query::new());
    let (records, errors) = stream.collect_lenient().await;

    assert_eq!(ids(&records), vec!["A", "C"]);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], Error::Decode { .. }));
}

#[tokio::test]
async fn test_transport_error_ends_stream() {
    let transport = FakeTransport::scripted(vec![
        ("", page(vec![record("A")], Some("c1"))),
        ("c1", Err(Error::InternalServer)),
    ]);

    let mut stream = ops::query::<Record, _>(&transport, &RESOURCE, Query::new());

    assert_eq!(assert_ok!(stream.next().await.unwrap()).id, "A");
    assert_err!(stream.next().await.unwrap());
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_dropped_stream_releases_transport() {
    let transport = FakeTransport::endless();
    let baseline = Arc::strong_count(&transport);

    let mut stream = ops::query::<Record, _>(&transport, &RESOURCE, Query::new());
    assert_ok!(stream.next().await.unwrap());
    assert!(Arc::strong_count(&transport) > baseline);

    drop(stream);

    let released = tokio::time::timeout(Duration::from_secs(5), async {
        while Arc::strong_count(&transport) > baseline {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;

    assert_ok!(released);
    // The producer stopped instead of walking the endless listing
    assert!(transport.requests().len() <= 3);
}
