//! Stark Bank API client
//!
//! Signed HTTP access to the API. [`Client`] implements
//! [`Transport`](crate::resource::Transport), so it can be handed to any
//! resource module.

pub mod auth;
pub mod client;
pub mod http;
pub mod signer;

pub use auth::{set_default_user, Credential, Environment, Signer, User};
pub use client::{Client, ClientConfig};
pub use signer::OpensslSigner;
