//! Resource access layer
//!
//! The generic machinery every resource module delegates to.
//!
//! # Architecture
//!
//! - [`registry`] - Static resource descriptors and the lookup table
//! - [`query`] - Query parameters for list endpoints
//! - [`transport`] - The [`Transport`] seam and raw [`Page`]s
//! - [`fetcher`] - Single page fetching and typed decoding
//! - [`stream`] - Lazy cursor-following [`QueryStream`]s
//! - [`resolver`] - Discriminator based payload resolution
//! - [`ops`] - Generic create/get/query/page/update/delete verbs
//!
//! # Example
//!
//! ```ignore
//! use starkbank::resource::{get_resource, ops, Query};
//!
//! async fn first_page(client: &starkbank::Client) -> starkbank::Result<()> {
//!     let resource = get_resource("transfer").unwrap();
//!     let (records, cursor) =
//!         ops::page::<serde_json::Value, _>(client, &resource, &Query::new().limit(10)).await?;
//!     println!("{} records, next cursor {:?}", records.len(), cursor);
//!     Ok(())
//! }
//! ```

pub mod fetcher;
pub mod ops;
pub mod query;
pub mod registry;
pub mod resolver;
pub mod stream;
pub mod transport;

pub use fetcher::{decode, fetch_page, fetch_typed_page};
pub use query::{Query, QueryValue, MAX_PAGE_LIMIT};
pub use registry::{get_all_resource_keys, get_resource, Resource, RESOURCES};
pub use resolver::{resolve, Envelope, Payload};
pub use stream::QueryStream;
pub use transport::{Page, Transport};
