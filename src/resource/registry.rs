//! Resource Registry - static descriptors for every API resource
//!
//! A [`Resource`] names one API resource; its REST endpoint and the keys used
//! to unwrap JSON envelopes are derived from that name. All descriptors the
//! SDK knows are listed here and indexed on first access.

use crate::resources::{
    balance, boleto, boleto_holmes, boleto_payment, brcode_payment, darf_payment, deposit, event,
    invoice, invoice_pull_request, invoice_pull_subscription, tax_payment, transfer,
    utility_payment, webhook,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Trailing name segments that map to a nested path, e.g. "invoice/log"
const NESTED_SUFFIXES: &[&str] = &["log", "attempt"];

/// Static description of one API resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resource {
    /// CamelCase resource name, e.g. "BoletoHolmesLog"
    pub name: &'static str,
}

impl Resource {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// REST endpoint relative to the API version, e.g. "boleto-holmes/log"
    pub fn endpoint(&self) -> String {
        let kebab = camel_to_kebab(self.name);
        for suffix in NESTED_SUFFIXES {
            if let Some(parent) = kebab.strip_suffix(suffix) {
                if let Some(parent) = parent.strip_suffix('-') {
                    return format!("{}/{}", parent, suffix);
                }
            }
        }
        kebab
    }

    /// Envelope key for a single record, e.g. "log" for `{"log": {...}}`
    pub fn key(&self) -> String {
        let kebab = camel_to_kebab(self.name);
        kebab.rsplit('-').next().unwrap_or(&kebab).to_string()
    }

    /// Envelope key for a list of records, e.g. "logs" for `{"logs": [...]}`
    pub fn collection_key(&self) -> String {
        pluralize(&self.key())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// "BrcodePayment" -> "brcode-payment"
fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn pluralize(word: &str) -> String {
    if word.ends_with('s') {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Every resource the SDK exposes
pub const RESOURCES: &[Resource] = &[
    balance::RESOURCE,
    boleto::RESOURCE,
    boleto::LOG_RESOURCE,
    boleto_holmes::RESOURCE,
    boleto_holmes::LOG_RESOURCE,
    boleto_payment::RESOURCE,
    boleto_payment::LOG_RESOURCE,
    brcode_payment::RESOURCE,
    brcode_payment::LOG_RESOURCE,
    darf_payment::RESOURCE,
    darf_payment::LOG_RESOURCE,
    deposit::RESOURCE,
    deposit::LOG_RESOURCE,
    event::RESOURCE,
    event::ATTEMPT_RESOURCE,
    invoice::RESOURCE,
    invoice::LOG_RESOURCE,
    invoice_pull_request::RESOURCE,
    invoice_pull_request::LOG_RESOURCE,
    invoice_pull_subscription::RESOURCE,
    invoice_pull_subscription::LOG_RESOURCE,
    tax_payment::RESOURCE,
    tax_payment::LOG_RESOURCE,
    transfer::RESOURCE,
    transfer::LOG_RESOURCE,
    utility_payment::RESOURCE,
    utility_payment::LOG_RESOURCE,
    webhook::RESOURCE,
];

/// Index by endpoint, built on first access
static REGISTRY: OnceLock<HashMap<String, Resource>> = OnceLock::new();

/// Get the resource registry
pub fn get_registry() -> &'static HashMap<String, Resource> {
    REGISTRY.get_or_init(|| {
        RESOURCES
            .iter()
            .map(|resource| (resource.endpoint(), *resource))
            .collect()
    })
}

/// Get a resource by endpoint ("boleto/log") or name ("BoletoLog")
pub fn get_resource(key: &str) -> Option<Resource> {
    if let Some(resource) = get_registry().get(key) {
        return Some(*resource);
    }
    RESOURCES.iter().find(|r| r.name == key).copied()
}

/// Get all resource endpoints, sorted (for listing and completion)
pub fn get_all_resource_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = get_registry().keys().map(|s| s.as_str()).collect();
    keys.sort_unstable();
    keys
}
