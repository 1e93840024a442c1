//! Integration tests for the API client using wiremock
//!
//! These tests run the resource modules against a mocked API, checking
//! signed headers, envelope handling, pagination and error mapping.

use futures::StreamExt;
use serde_json::json;
use starkbank::api::auth::Signer;
use starkbank::resources::{balance, event, invoice, transfer, webhook};
use starkbank::{Client, ClientConfig, Environment, Error, Query, User};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Signer that records every message it signs
#[derive(Default)]
struct RecordingSigner {
    messages: Mutex<Vec<String>>,
}

impl Signer for RecordingSigner {
    fn sign(&self, message: &str) -> starkbank::Result<String> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok("test-signature".to_string())
    }
}

fn test_client(server: &MockServer) -> (Client, Arc<RecordingSigner>) {
    let signer = Arc::new(RecordingSigner::default());
    let user = User::project(Environment::Sandbox, "5656565656565656", signer.clone()).unwrap();
    let config = ClientConfig::default().with_base_url(&server.uri());
    let client = Client::with_config(Some(user), config).unwrap();
    (client, signer)
}

/// Signer that takes a while, like an external signing process
struct SlowSigner(Duration);

impl Signer for SlowSigner {
    fn sign(&self, _message: &str) -> starkbank::Result<String> {
        std::thread::sleep(self.0);
        Ok("slow-signature".to_string())
    }
}

fn transfer_json(id: &str, amount: i64) -> serde_json::Value {
    json!({
        "id": id,
        "amount": amount,
        "name": "Daenerys Targaryen Stormborn",
        "taxId": "594.739.480-42",
        "bankCode": "20018183",
        "branchCode": "2201",
        "accountNumber": "76543-8",
        "status": "success",
        "fee": 0,
        "tags": ["daenerys", "invoice/1234"],
        "created": "2024-03-01T12:00:00.000000+00:00"
    })
}

/// Test module for signed request handling
mod request_tests {
    use super::*;

    /// Test GET by id sends the access headers and unwraps the envelope
    #[tokio::test]
    async fn test_get_sends_signed_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/transfer/5155165527080960"))
            .and(header("Access-Id", "project/5656565656565656"))
            .and(header("Access-Signature", "test-signature"))
            .and(header("Content-Type", "application/json"))
            .and(header("Accept-Language", "en-US"))
            .and(header_exists("Access-Time"))
            .and(header_exists("User-Agent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"transfer": transfer_json("5155165527080960", 100)})),
            )
            .mount(&server)
            .await;

        let (client, signer) = test_client(&server);
        let transfer = transfer::get(&client, "5155165527080960").await.unwrap();

        assert_eq!(transfer.id.as_deref(), Some("5155165527080960"));
        assert_eq!(transfer.amount, 100);
        assert_eq!(transfer.tags, vec!["daenerys", "invoice/1234"]);

        // GET requests sign an empty body
        let messages = signer.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("project/5656565656565656:"));
        assert!(messages[0].ends_with(':'));
    }

    /// Test create posts the collection envelope and signs the exact body
    #[tokio::test]
    async fn test_create_posts_collection_envelope() {
        let server = MockServer::start().await;

        let new_transfer = transfer::Transfer {
            amount: 200,
            name: "Jon Snow".to_string(),
            tax_id: "012.345.678-90".to_string(),
            bank_code: "01".to_string(),
            branch_code: "0001".to_string(),
            account_number: "10000-0".to_string(),
            ..Default::default()
        };

        Mock::given(method("POST"))
            .and(path("/v2/transfer"))
            .and(body_json(json!({
                "transfers": [{
                    "amount": 200,
                    "name": "Jon Snow",
                    "taxId": "012.345.678-90",
                    "bankCode": "01",
                    "branchCode": "0001",
                    "accountNumber": "10000-0"
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Transfer(s) successfully created",
                "transfers": [transfer_json("1", 200)]
            })))
            .mount(&server)
            .await;

        let (client, signer) = test_client(&server);
        let created = transfer::create(&client, &[new_transfer]).await.unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].id.as_deref(), Some("1"));

        let messages = signer.messages.lock().unwrap();
        assert!(messages[0].contains(r#":{"transfers":[{"#));
        assert!(messages[0].contains(r#""amount":200"#));
    }

    /// Test single-record create posts the record itself
    #[tokio::test]
    async fn test_webhook_create_posts_single_record() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/webhook"))
            .and(body_json(json!({
                "url": "https://winterfell.westeros.gov/events",
                "subscriptions": ["transfer", "invoice"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "webhook": {
                    "id": "6360035755458560",
                    "url": "https://winterfell.westeros.gov/events",
                    "subscriptions": ["transfer", "invoice"]
                }
            })))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let created = webhook::create(
            &client,
            &webhook::Webhook {
                url: "https://winterfell.westeros.gov/events".to_string(),
                subscriptions: vec!["transfer".to_string(), "invoice".to_string()],
                id: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(created.id.as_deref(), Some("6360035755458560"));
    }

    /// Test PATCH sends only the fields that are set
    #[tokio::test]
    async fn test_invoice_update_sends_sparse_patch() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/v2/invoice/5400193516175360"))
            .and(body_json(json!({"status": "canceled"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "invoice": {
                    "id": "5400193516175360",
                    "amount": 400000,
                    "taxId": "20.018.183/0001-80",
                    "name": "Iron Bank S.A.",
                    "status": "canceled"
                }
            })))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let patch = invoice::InvoicePatch {
            status: Some("canceled".to_string()),
            ..Default::default()
        };
        let updated = invoice::update(&client, "5400193516175360", &patch).await.unwrap();

        assert_eq!(updated.status.as_deref(), Some("canceled"));
    }

    /// Test DELETE returns the final state of the record
    #[tokio::test]
    async fn test_delete_returns_record() {
        let server = MockServer::start().await;

        let mut canceled = transfer_json("77", 500);
        canceled["status"] = json!("canceled");

        Mock::given(method("DELETE"))
            .and(path("/v2/transfer/77"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"transfer": canceled})),
            )
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let deleted = transfer::delete(&client, "77").await.unwrap();

        assert_eq!(deleted.status.as_deref(), Some("canceled"));
    }

    /// Test binary content is returned untouched
    #[tokio::test]
    async fn test_pdf_returns_bytes() {
        let server = MockServer::start().await;

        let pdf = b"%PDF-1.4 fake".to_vec();
        Mock::given(method("GET"))
            .and(path("/v2/invoice/42/pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(pdf.clone(), "application/pdf"))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let content = invoice::pdf(&client, "42").await.unwrap();

        assert_eq!(content, pdf);
    }

    /// Test query parameters on content endpoints
    #[tokio::test]
    async fn test_qrcode_passes_size() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/invoice/42/qrcode"))
            .and(query_param("size", "12"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89, 0x50], "image/png"))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let content = invoice::qrcode(&client, "42", Some(12)).await.unwrap();

        assert_eq!(content, vec![0x89, 0x50]);
    }

    /// Test nested records are unwrapped by their own key
    #[tokio::test]
    async fn test_invoice_payment_sub_resource() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/invoice/42/payment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payment": {
                    "amount": 400000,
                    "name": "Iron Bank S.A.",
                    "taxId": "20.018.183/0001-80",
                    "bankCode": "20018183",
                    "branchCode": "0001",
                    "accountNumber": "1000-1",
                    "accountType": "checking",
                    "endToEndId": "E20018183202403011200abcdefghijk",
                    "method": "pix"
                }
            })))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let payment = invoice::payment(&client, "42").await.unwrap();

        assert_eq!(payment.method, "pix");
        assert_eq!(payment.amount, 400000);
    }

    /// Test the balance list endpoint yields its single entry
    #[tokio::test]
    async fn test_balance_get() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/balance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "balances": [{
                    "id": "5847227338899456",
                    "amount": 1000000,
                    "currency": "BRL",
                    "updated": "2024-03-01T12:00:00.000000+00:00"
                }],
                "cursor": null
            })))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let balance = balance::get(&client).await.unwrap();

        assert_eq!(balance.amount, 1000000);
        assert_eq!(balance.currency, "BRL");
    }
}

/// Test module for list endpoints
mod pagination_tests {
    use super::*;

    async fn mount_two_pages(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v2/transfer"))
            .and(query_param("cursor", "c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transfers": [transfer_json("C", 3)],
                "cursor": ""
            })))
            .mount(server)
            .await;

        // Lower priority than the cursor mock, so it only answers the first page
        Mock::given(method("GET"))
            .and(path("/v2/transfer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transfers": [transfer_json("A", 1), transfer_json("B", 2)],
                "cursor": "c1"
            })))
            .with_priority(10)
            .mount(server)
            .await;
    }

    /// Test query follows the cursor until the listing is exhausted
    #[tokio::test]
    async fn test_query_follows_cursor() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;

        let (client, _) = test_client(&server);
        let ids: Vec<String> = transfer::query(&client, Query::new())
            .map(|t| t.unwrap().id.unwrap())
            .collect()
            .await;

        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    /// Test page fetches exactly one page
    #[tokio::test]
    async fn test_page_returns_cursor() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;

        let (client, _) = test_client(&server);
        let (first, cursor) = transfer::page(&client, &Query::new()).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(cursor.as_deref(), Some("c1"));

        let (second, cursor) = transfer::page(&client, &Query::new().cursor("c1")).await.unwrap();
        assert_eq!(second[0].id.as_deref(), Some("C"));
        assert_eq!(cursor, None);
    }

    /// Test filters reach the server in wire format
    #[tokio::test]
    async fn test_filters_are_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/transfer"))
            .and(query_param("limit", "3"))
            .and(query_param("status", "success"))
            .and(query_param("tags", "daenerys,jon"))
            .and(query_param("after", "2024-01-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transfers": [transfer_json("A", 1)],
                "cursor": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let query = Query::new()
            .limit(3)
            .status("success")
            .tags(vec!["daenerys".to_string(), "jon".to_string()])
            .after(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let transfers: Vec<_> = transfer::query(&client, query).collect().await;
        assert_eq!(transfers.len(), 1);
    }

    /// Test a slow signer leaves the runtime free for other tasks
    #[tokio::test(flavor = "current_thread")]
    async fn test_slow_signer_does_not_stall_runtime() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/transfer/1"))
            .and(header("Access-Signature", "slow-signature"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transfer": transfer_json("1", 100)
            })))
            .mount(&server)
            .await;

        let signer = Arc::new(SlowSigner(Duration::from_millis(500)));
        let user = User::project(Environment::Sandbox, "5656565656565656", signer).unwrap();
        let config = ClientConfig::default().with_base_url(&server.uri());
        let client = Client::with_config(Some(user), config).unwrap();

        let started = Instant::now();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            started.elapsed()
        });

        let transfer = transfer::get(&client, "1").await.unwrap();
        assert_eq!(transfer.amount, 100);
        assert!(started.elapsed() >= Duration::from_millis(500));

        let timer_elapsed = timer.await.unwrap();
        assert!(
            timer_elapsed < Duration::from_millis(250),
            "timer fired after {:?}",
            timer_elapsed
        );
    }

    /// Test events come back with their log resolved
    #[tokio::test]
    async fn test_event_query_resolves_logs() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/event"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "events": [{
                    "id": "1",
                    "subscription": "transfer",
                    "created": "2024-03-01T12:00:00.000000+00:00",
                    "isDelivered": false,
                    "log": {
                        "id": "2",
                        "type": "success",
                        "errors": [],
                        "created": "2024-03-01T12:00:00.000000+00:00",
                        "transfer": transfer_json("3", 100)
                    }
                }],
                "cursor": null
            })))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let events: Vec<_> = event::query(&client, Query::new()).collect().await;

        assert_eq!(events.len(), 1);
        let event = events[0].as_ref().unwrap();
        assert!(event.log.is_resolved());
    }
}

/// Test module for error mapping
mod error_tests {
    use super::*;

    /// Test 400 responses carry the API's error codes
    #[tokio::test]
    async fn test_400_is_input_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/transfer"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [
                    {"code": "invalidTaxId", "message": "Invalid taxId"},
                    {"code": "invalidAmount", "message": "Amount must be positive"}
                ]
            })))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let err = transfer::create(&client, &[transfer::Transfer::default()])
            .await
            .unwrap_err();

        assert!(err.has_code("invalidTaxId"));
        assert!(err.has_code("invalidAmount"));
        assert_eq!(err.entries().len(), 2);
    }

    /// Test 500 responses are internal server errors
    #[tokio::test]
    async fn test_500_is_internal_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/transfer/1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Houston"))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let err = transfer::get(&client, "1").await.unwrap_err();

        assert!(matches!(err, Error::InternalServer));
    }

    /// Test other statuses keep the status code
    #[tokio::test]
    async fn test_unexpected_status_is_unknown_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/transfer/1"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let err = transfer::get(&client, "1").await.unwrap_err();

        assert!(matches!(err, Error::Unknown { status: 503, .. }));
    }

    /// Test a failing page ends the stream with the error
    #[tokio::test]
    async fn test_stream_surfaces_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/transfer"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let items: Vec<_> = transfer::query(&client, Query::new()).collect().await;

        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(Error::InternalServer)));
    }

    /// Test a malformed record is a decode error, not a panic
    #[tokio::test]
    async fn test_malformed_record_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/transfer/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transfer": {"id": "1", "amount": "one hundred"}
            })))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);
        let err = transfer::get(&client, "1").await.unwrap_err();

        assert!(matches!(err, Error::Decode { ref resource, .. } if resource == "Transfer"));
    }

    /// Test a list response without its collection key is a decode error
    #[tokio::test]
    async fn test_list_without_collection_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/transfer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transfer": [{"id": "1"}],
                "message": "unexpected shape"
            })))
            .mount(&server)
            .await;

        let (client, _) = test_client(&server);

        let err = transfer::page(&client, &Query::new()).await.unwrap_err();
        assert!(matches!(err, Error::Decode { ref resource, .. } if resource == "Transfer"));

        let items: Vec<_> = transfer::query(&client, Query::new()).collect().await;
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(Error::Decode { .. })));
    }

    /// Test a client without a user fails before any request is made
    #[tokio::test]
    async fn test_missing_user() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = ClientConfig::default().with_base_url(&server.uri());
        let client = Client::with_config(None, config).unwrap();
        let err = transfer::get(&client, "1").await.unwrap_err();

        assert!(matches!(err, Error::MissingUser));
    }
}
