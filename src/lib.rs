//! Stark Bank SDK
//!
//! Typed access to the Stark Bank REST API. Every resource module in
//! [`resources`] is a thin facade over the generic machinery in [`resource`]:
//! a page fetcher, a lazy cursor-following query stream and a resolver for
//! polymorphic event logs.
//!
//! ```ignore
//! use std::sync::Arc;
//! use futures::StreamExt;
//! use starkbank::{Client, Environment, OpensslSigner, Query, User};
//! use starkbank::resources::invoice;
//!
//! let signer = Arc::new(OpensslSigner::new("private-key.pem")?);
//! let user = User::project(Environment::Sandbox, "5656565656565656", signer)?;
//! let client = Client::new(Some(user))?;
//!
//! let mut invoices = invoice::query(&client, Query::new().limit(10).status("paid"));
//! while let Some(invoice) = invoices.next().await {
//!     println!("{:?}", invoice?);
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod resource;
pub mod resources;

pub use api::{set_default_user, Client, ClientConfig, Environment, OpensslSigner, Signer, User};
pub use error::{Error, ErrorEntry, Result};
pub use resource::{Query, QueryStream};
