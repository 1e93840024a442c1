//! API resources
//!
//! One module per resource: its record types, its descriptor and the
//! operations the API supports on it. Log resources live in a nested `log`
//! module, e.g. [`boleto::log::query`].
//!
//! ```ignore
//! use futures::StreamExt;
//! use starkbank::resources::transfer;
//! use starkbank::Query;
//!
//! let mut transfers = transfer::query(&client, Query::new().limit(150));
//! while let Some(transfer) = transfers.next().await {
//!     println!("{:?}", transfer?.id);
//! }
//! ```

pub mod balance;
pub mod boleto;
pub mod boleto_holmes;
pub mod boleto_payment;
pub mod brcode_payment;
pub mod darf_payment;
pub mod deposit;
pub mod event;
pub mod invoice;
pub mod invoice_pull_request;
pub mod invoice_pull_subscription;
pub mod tax_payment;
pub mod transfer;
pub mod utility_payment;
pub mod webhook;
