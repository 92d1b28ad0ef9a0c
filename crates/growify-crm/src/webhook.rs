//! Webhook event dispatch.
//!
//! A webhook request carries one event object or an array of them.
//! Events are processed sequentially and isolated from each other: a
//! bad event produces an itemized failure while the rest of the batch
//! continues.

use chrono::{DateTime, Utc};
use growify_core::SyncSource;
use growify_store::CrmStore;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::map::{map_contact, map_deal};

/// One event from a HubSpot webhook request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(default)]
    pub subscription_type: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    /// HubSpot sends numeric ids; accept both forms.
    #[serde(default, deserialize_with = "flexible_id")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub properties: Option<Value>,
}

fn flexible_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n.to_string()),
        Some(Raw::Text(s)) => Some(s),
        None => None,
    })
}

/// Outcome of one event, echoed back to the webhook caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EventResult {
    fn ok(object_id: String, kind: &str) -> Self {
        Self {
            success: true,
            object_id: Some(object_id),
            kind: Some(kind.to_string()),
            error: None,
        }
    }

    fn failed(kind: Option<String>, error: &str) -> Self {
        Self {
            success: false,
            object_id: None,
            kind,
            error: Some(error.to_string()),
        }
    }
}

/// Process a webhook batch sequentially against the CRM store.
pub async fn process_events<S: CrmStore>(
    store: &S,
    events: &[WebhookEvent],
    now: DateTime<Utc>,
) -> Vec<EventResult> {
    let mut results = Vec::with_capacity(events.len());

    for event in events {
        let event_type = event
            .subscription_type
            .clone()
            .or_else(|| event.event_type.clone())
            .unwrap_or_default();

        let Some(object_id) = event.object_id.clone() else {
            warn!(event_type, "webhook event missing objectId, skipping");
            results.push(EventResult::failed(None, "Missing objectId"));
            continue;
        };

        let properties = event.properties.clone().unwrap_or(Value::Null);

        if event_type.contains("contact") {
            let contact = map_contact(&properties, &object_id, SyncSource::Webhook, now);
            store.upsert_contact(contact).await;
            results.push(EventResult::ok(object_id, "contact"));
        } else if event_type.contains("deal") {
            let deal = map_deal(&properties, &object_id, SyncSource::Webhook, now);
            store.upsert_deal(deal).await;
            results.push(EventResult::ok(object_id, "deal"));
        } else {
            warn!(event_type, "unsupported webhook event type");
            results.push(EventResult::failed(
                Some(event_type),
                "Unsupported event type",
            ));
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use growify_store::MemoryCrmStore;
    use serde_json::json;

    fn event(kind: &str, object_id: Option<u64>, properties: Value) -> WebhookEvent {
        WebhookEvent {
            subscription_type: Some(kind.to_string()),
            event_type: None,
            object_id: object_id.map(|n| n.to_string()),
            properties: Some(properties),
        }
    }

    #[tokio::test]
    async fn contact_and_deal_events_route_by_substring() {
        let store = MemoryCrmStore::new();
        let events = vec![
            event("contact.propertyChange", Some(11), json!({"firstname": "Ada"})),
            event("deal.creation", Some(22), json!({"dealname": "Annual plan"})),
        ];
        let results = process_events(&store, &events, Utc::now()).await;

        assert!(results.iter().all(|r| r.success));
        assert_eq!(store.contact_count().await, 1);
        assert_eq!(store.deal_count().await, 1);
        assert_eq!(store.contact("11").await.unwrap().first_name, "Ada");
    }

    #[tokio::test]
    async fn missing_object_id_fails_that_event_only() {
        let store = MemoryCrmStore::new();
        let events = vec![
            event("contact.creation", None, json!({})),
            event("contact.creation", Some(7), json!({"email": "x@example.com"})),
        ];
        let results = process_events(&store, &events, Utc::now()).await;

        assert!(!results[0].success);
        assert_eq!(results[0].error.as_deref(), Some("Missing objectId"));
        assert!(results[1].success, "the batch must continue past failures");
        assert_eq!(store.contact_count().await, 1);
    }

    #[tokio::test]
    async fn unsupported_type_is_an_itemized_failure() {
        let store = MemoryCrmStore::new();
        let events = vec![event("ticket.creation", Some(5), json!({}))];
        let results = process_events(&store, &events, Utc::now()).await;

        assert!(!results[0].success);
        assert_eq!(results[0].kind.as_deref(), Some("ticket.creation"));
        assert_eq!(store.contact_count().await, 0);
    }

    #[test]
    fn numeric_object_ids_deserialize_as_strings() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "subscriptionType": "contact.creation",
            "objectId": 42
        }))
        .unwrap();
        assert_eq!(event.object_id.as_deref(), Some("42"));
    }
}
