//! Polymorphic payload resolution
//!
//! Events carry a log whose shape depends on the subscription that produced
//! it. The dispatch table below maps each known subscription to the log type
//! it decodes into; anything else is kept as raw JSON so that new server-side
//! subscriptions don't break older clients.

use super::fetcher::decode;
use crate::error::Result;
use crate::resources::{
    boleto, boleto_holmes, boleto_payment, brcode_payment, darf_payment, deposit, invoice,
    invoice_pull_request, invoice_pull_subscription, tax_payment, transfer, utility_payment,
};
use serde::Serialize;
use serde_json::Value;

/// Decoded payload of an envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Invoice(invoice::InvoiceLog),
    Boleto(boleto::BoletoLog),
    BoletoHolmes(boleto_holmes::BoletoHolmesLog),
    BoletoPayment(boleto_payment::BoletoPaymentLog),
    BrcodePayment(brcode_payment::BrcodePaymentLog),
    DarfPayment(darf_payment::DarfPaymentLog),
    Deposit(deposit::DepositLog),
    TaxPayment(tax_payment::TaxPaymentLog),
    Transfer(transfer::TransferLog),
    UtilityPayment(utility_payment::UtilityPaymentLog),
    InvoicePullRequest(invoice_pull_request::InvoicePullRequestLog),
    InvoicePullSubscription(invoice_pull_subscription::InvoicePullSubscriptionLog),
    /// Not decoded: unknown discriminator or not resolved yet
    Raw(Value),
}

impl Payload {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Raw(_))
    }
}

/// A discriminator plus the payload it describes
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub discriminator: String,
    pub payload: Payload,
}

impl Envelope {
    pub fn raw(discriminator: impl Into<String>, payload: Value) -> Self {
        Self {
            discriminator: discriminator.into(),
            payload: Payload::Raw(payload),
        }
    }
}

type Decoder = fn(Value) -> Result<Payload>;

/// Discriminator -> decoder
const DISPATCH: &[(&str, Decoder)] = &[
    ("invoice", |v| decode(&invoice::LOG_RESOURCE, v).map(Payload::Invoice)),
    ("boleto", |v| decode(&boleto::LOG_RESOURCE, v).map(Payload::Boleto)),
    ("boleto-holmes", |v| {
        decode(&boleto_holmes::LOG_RESOURCE, v).map(Payload::BoletoHolmes)
    }),
    ("boleto-payment", |v| {
        decode(&boleto_payment::LOG_RESOURCE, v).map(Payload::BoletoPayment)
    }),
    ("brcode-payment", |v| {
        decode(&brcode_payment::LOG_RESOURCE, v).map(Payload::BrcodePayment)
    }),
    ("darf-payment", |v| {
        decode(&darf_payment::LOG_RESOURCE, v).map(Payload::DarfPayment)
    }),
    ("deposit", |v| decode(&deposit::LOG_RESOURCE, v).map(Payload::Deposit)),
    ("tax-payment", |v| {
        decode(&tax_payment::LOG_RESOURCE, v).map(Payload::TaxPayment)
    }),
    ("transfer", |v| decode(&transfer::LOG_RESOURCE, v).map(Payload::Transfer)),
    ("utility-payment", |v| {
        decode(&utility_payment::LOG_RESOURCE, v).map(Payload::UtilityPayment)
    }),
    ("invoice-pull-request", |v| {
        decode(&invoice_pull_request::LOG_RESOURCE, v).map(Payload::InvoicePullRequest)
    }),
    ("invoice-pull-subscription", |v| {
        decode(&invoice_pull_subscription::LOG_RESOURCE, v).map(Payload::InvoicePullSubscription)
    }),
];

fn decoder_for(discriminator: &str) -> Option<Decoder> {
    DISPATCH
        .iter()
        .find(|(key, _)| *key == discriminator)
        .map(|(_, decoder)| *decoder)
}

/// Discriminators with a concrete payload type
pub fn known_discriminators() -> impl Iterator<Item = &'static str> {
    DISPATCH.iter().map(|(key, _)| *key)
}

/// Decode a raw payload according to its discriminator.
///
/// Resolved payloads are returned unchanged. Unknown discriminators keep the
/// raw payload. A known discriminator whose payload does not match its type is
/// an [`Error::Decode`](crate::Error::Decode).
pub fn resolve(envelope: Envelope) -> Result<Envelope> {
    let Envelope {
        discriminator,
        payload,
    } = envelope;

    let payload = match payload {
        Payload::Raw(raw) => match decoder_for(&discriminator) {
            Some(decoder) => decoder(raw)?,
            None => {
                tracing::warn!("Unknown discriminator {:?}, keeping raw payload", discriminator);
                Payload::Raw(raw)
            }
        },
        resolved => resolved,
    };

    Ok(Envelope {
        discriminator,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transfer_log() -> Value {
        json!({
            "id": "5155165527080960",
            "type": "success",
            "errors": [],
            "created": "2024-03-01T12:00:00.000000+00:00",
            "transfer": {
                "id": "5079571212156928",
                "amount": 1500,
                "name": "Jon Snow",
                "taxId": "012.345.678-90",
                "bankCode": "20018183",
                "branchCode": "0001",
                "accountNumber": "10000-0",
                "status": "success",
                "tags": ["rent"]
            }
        })
    }

    #[test]
    fn test_known_discriminator_resolves() {
        let envelope = resolve(Envelope::raw("transfer", transfer_log())).unwrap();
        match envelope.payload {
            Payload::Transfer(log) => {
                assert_eq!(log.log_type, "success");
                assert_eq!(log.transfer.amount, 1500);
                assert_eq!(log.transfer.name, "Jon Snow");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_discriminator_passes_through() {
        let raw = json!({"id": "1", "card": {"id": "2"}});
        let envelope = resolve(Envelope::raw("corporate-card", raw.clone())).unwrap();
        assert_eq!(envelope.payload, Payload::Raw(raw));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let once = resolve(Envelope::raw("transfer", transfer_log())).unwrap();
        let twice = resolve(once.clone()).unwrap();
        assert_eq!(once, twice);
        assert!(twice.payload.is_resolved());
    }

    #[test]
    fn test_mismatched_payload_is_a_decode_error() {
        let result = resolve(Envelope::raw("deposit", json!({"id": 12})));
        assert!(matches!(result, Err(crate::Error::Decode { .. })));
    }

    #[test]
    fn test_dispatch_table_has_unique_keys() {
        let mut keys: Vec<_> = known_discriminators().collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
        assert_eq!(total, 12);
    }
}
