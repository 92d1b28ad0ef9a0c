//! Integration tests for `HubSpotClient` bulk sync using wiremock.

use std::time::Duration;

use growify_crm::{HubSpotClient, SyncOptions};
use growify_store::{CrmStore, MemoryCrmStore};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> HubSpotClient {
    HubSpotClient::with_base_url("test-key", base_url)
        .expect("client construction should not fail")
}

fn test_options() -> SyncOptions {
    SyncOptions {
        page_size: 2,
        rate_limit_backoff: Duration::from_millis(10),
        max_attempts_per_page: 3,
        inter_page_delay: Duration::from_millis(0),
    }
}

fn contact(id: u32, email: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id.to_string(),
        "properties": {
            "firstname": "Test",
            "lastname": format!("Contact{id}"),
            "email": email,
            "createdate": "2024-05-01T12:00:00Z"
        }
    })
}

#[tokio::test]
async fn sync_pages_through_the_cursor() {
    let server = MockServer::start().await;

    let first_page = serde_json::json!({
        "results": [contact(1, "one@example.com"), contact(2, "two@example.com")],
        "paging": {"next": {"after": "cursor-2"}}
    });
    let second_page = serde_json::json!({
        "results": [contact(3, "three@example.com")]
    });

    Mock::given(method("POST"))
        .and(path("/crm/v3/objects/contacts/search"))
        .and(body_partial_json(serde_json::json!({"after": "cursor-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&second_page))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/crm/v3/objects/contacts/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&first_page))
        .mount(&server)
        .await;

    let store = MemoryCrmStore::new();
    let stats = test_client(&server.uri())
        .bulk_sync_contacts(&store, &test_options())
        .await
        .expect("sync should succeed");

    assert_eq!(stats.total_contacts_synced, 3);
    assert_eq!(stats.total_pages, 2);
    assert_eq!(stats.average_contacts_per_page, 2);
    assert_eq!(store.contact_count().await, 3);

    let synced = store.contact("3").await.expect("contact 3 must be stored");
    assert_eq!(synced.email, "three@example.com");
    assert_eq!(
        serde_json::to_value(synced.sync_source).unwrap(),
        serde_json::json!("initialBulkSync")
    );
}

#[tokio::test]
async fn rate_limit_retries_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crm/v3/objects/contacts/search"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/crm/v3/objects/contacts/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [contact(9, "nine@example.com")]
        })))
        .mount(&server)
        .await;

    let store = MemoryCrmStore::new();
    let stats = test_client(&server.uri())
        .bulk_sync_contacts(&store, &test_options())
        .await
        .expect("sync should recover from 429s");

    assert_eq!(stats.total_contacts_synced, 1);
    assert_eq!(store.contact_count().await, 1);
}

#[tokio::test]
async fn rate_limit_past_the_cap_fails_the_sync() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crm/v3/objects/contacts/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let store = MemoryCrmStore::new();
    let err = test_client(&server.uri())
        .bulk_sync_contacts(&store, &test_options())
        .await
        .expect_err("sync must give up after the attempt cap");

    assert!(matches!(
        err,
        growify_crm::CrmError::RateLimited { attempts: 3 }
    ));
    assert_eq!(store.contact_count().await, 0);
}

#[tokio::test]
async fn server_error_is_surfaced_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crm/v3/objects/contacts/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = MemoryCrmStore::new();
    let err = test_client(&server.uri())
        .bulk_sync_contacts(&store, &test_options())
        .await
        .expect_err("a 500 must fail the sync");

    assert!(matches!(
        err,
        growify_crm::CrmError::ApiStatus { status: 500 }
    ));
}
