//! Transport seam between the resource layer and the HTTP client

use super::query::Query;
use super::registry::Resource;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// One page of raw records from a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub records: Vec<Value>,
    /// Continuation token; `None` once the listing is exhausted
    pub cursor: Option<String>,
}

impl Page {
    /// Unwrap a list envelope such as `{"invoices": [...], "cursor": "..."}`.
    ///
    /// The collection key must hold a list; an empty cursor is normalized to
    /// `None`.
    pub fn from_envelope(resource: &Resource, mut envelope: Value) -> Result<Self> {
        let key = resource.collection_key();
        let records = match envelope.get_mut(&key).map(Value::take) {
            Some(Value::Array(records)) => records,
            Some(other) => {
                return Err(Error::decode(
                    resource.name,
                    format!("expected a list under {:?}, got {}", key, other),
                ))
            }
            None => {
                return Err(Error::decode(
                    resource.name,
                    format!("response has no {:?} field", key),
                ))
            }
        };

        let cursor = envelope
            .get("cursor")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        Ok(Self { records, cursor })
    }

    pub fn is_last(&self) -> bool {
        self.cursor.is_none()
    }
}

/// Authenticated access to the API.
///
/// Implementations resolve the user, sign, send and unwrap envelopes; the
/// resource layer only decodes what comes back.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a list endpoint once
    async fn get_page(&self, resource: &Resource, query: &Query) -> Result<Page>;

    /// GET `/{endpoint}/{id}`
    async fn get_by_id(&self, resource: &Resource, id: &str, query: &Query) -> Result<Value>;

    /// GET binary content such as `/{endpoint}/{id}/pdf`
    async fn get_content(
        &self,
        resource: &Resource,
        id: &str,
        sub_resource: &str,
        query: &Query,
    ) -> Result<Vec<u8>>;

    /// GET a nested record such as `/{endpoint}/{id}/payment`
    async fn get_sub_resource(
        &self,
        resource: &Resource,
        id: &str,
        sub_resource: &Resource,
    ) -> Result<Value>;

    /// POST `{"<collection>": [...]}`
    async fn post_multi(
        &self,
        resource: &Resource,
        records: Vec<Value>,
        query: &Query,
    ) -> Result<Vec<Value>>;

    /// POST a single record as the request body
    async fn post_single(&self, resource: &Resource, record: Value) -> Result<Value>;

    /// PATCH `/{endpoint}/{id}` with a sparse update
    async fn patch(&self, resource: &Resource, id: &str, partial: Value) -> Result<Value>;

    /// DELETE `/{endpoint}/{id}`
    async fn delete_by_id(&self, resource: &Resource, id: &str) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get_page(&self, resource: &Resource, query: &Query) -> Result<Page> {
        (**self).get_page(resource, query).await
    }

    async fn get_by_id(&self, resource: &Resource, id: &str, query: &Query) -> Result<Value> {
        (**self).get_by_id(resource, id, query).await
    }

    async fn get_content(
        &self,
        resource: &Resource,
        id: &str,
        sub_resource: &str,
        query: &Query,
    ) -> Result<Vec<u8>> {
        (**self).get_content(resource, id, sub_resource, query).await
    }

    async fn get_sub_resource(
        &self,
        resource: &Resource,
        id: &str,
        sub_resource: &Resource,
    ) -> Result<Value> {
        (**self).get_sub_resource(resource, id, sub_resource).await
    }

    async fn post_multi(
        &self,
        resource: &Resource,
        records: Vec<Value>,
        query: &Query,
    ) -> Result<Vec<Value>> {
        (**self).post_multi(resource, records, query).await
    }

    async fn post_single(&self, resource: &Resource, record: Value) -> Result<Value> {
        (**self).post_single(resource, record).await
    }

    async fn patch(&self, resource: &Resource, id: &str, partial: Value) -> Result<Value> {
        (**self).patch(resource, id, partial).await
    }

    async fn delete_by_id(&self, resource: &Resource, id: &str) -> Result<Value> {
        (**self).delete_by_id(resource, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_from_envelope() {
        let resource = Resource::new("Invoice");
        let page = Page::from_envelope(
            &resource,
            json!({"invoices": [{"id": "1"}, {"id": "2"}], "cursor": "c1"}),
        )
        .unwrap();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.cursor.as_deref(), Some("c1"));
        assert!(!page.is_last());
    }

    #[test]
    fn test_empty_or_missing_cursor_is_terminal() {
        let resource = Resource::new("Transfer");
        let page = Page::from_envelope(&resource, json!({"transfers": [], "cursor": ""})).unwrap();
        assert!(page.is_last());

        let envelope = json!({"transfers": [{"id": "1"}], "cursor": null});
        let page = Page::from_envelope(&resource, envelope).unwrap();
        assert!(page.is_last());
        assert_eq!(page.records.len(), 1);
    }

    #[test]
    fn test_missing_collection_is_a_decode_error() {
        let resource = Resource::new("Transfer");
        let envelope = json!({"transfer": [{"id": "1"}], "message": "unexpected shape"});
        match Page::from_envelope(&resource, envelope) {
            Err(Error::Decode { resource, .. }) => assert_eq!(resource, "Transfer"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_non_list_collection_is_a_decode_error() {
        let resource = Resource::new("Deposit");
        let envelope = json!({"deposits": {"id": "1"}, "cursor": null});
        assert!(matches!(
            Page::from_envelope(&resource, envelope),
            Err(Error::Decode { .. })
        ));
    }
}
