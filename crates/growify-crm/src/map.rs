//! Pure renaming of HubSpot property bags into our CRM records.
//!
//! Missing string properties become empty strings, a missing amount
//! becomes 0, missing creation/modification dates fall back to `now`,
//! and a missing close date stays `None`. The functions are idempotent
//! apart from the `synced_at` stamp.

use chrono::{DateTime, TimeZone, Utc};
use growify_core::{ContactRecord, DealRecord, SyncSource};
use serde_json::Value;

/// Map a HubSpot contact property bag into a [`ContactRecord`].
#[must_use]
pub fn map_contact(
    properties: &Value,
    object_id: &str,
    source: SyncSource,
    now: DateTime<Utc>,
) -> ContactRecord {
    ContactRecord {
        hs_object_id: object_id.to_string(),
        first_name: prop_str(properties, "firstname"),
        last_name: prop_str(properties, "lastname"),
        email: prop_str(properties, "email"),
        phone: prop_str(properties, "phone"),
        company: prop_str(properties, "company"),
        job_title: prop_str(properties, "jobtitle"),
        city: prop_str(properties, "city"),
        state: prop_str(properties, "state"),
        country: prop_str(properties, "country"),
        lifecycle_stage: prop_str(properties, "lifecyclestage"),
        created_at: prop_date(properties, "createdate").unwrap_or(now),
        last_modified_at: prop_date(properties, "lastmodifieddate").unwrap_or(now),
        synced_at: now,
        sync_source: source,
    }
}

/// Map a HubSpot deal property bag into a [`DealRecord`].
#[must_use]
pub fn map_deal(
    properties: &Value,
    object_id: &str,
    source: SyncSource,
    now: DateTime<Utc>,
) -> DealRecord {
    DealRecord {
        hs_object_id: object_id.to_string(),
        deal_name: prop_str(properties, "dealname"),
        amount: prop_amount(properties),
        deal_stage: prop_str(properties, "dealstage"),
        pipeline: prop_str(properties, "pipeline"),
        close_date: prop_date(properties, "closedate"),
        deal_type: prop_str(properties, "dealtype"),
        priority: prop_str(properties, "hs_priority"),
        description: prop_str(properties, "description"),
        created_at: prop_date(properties, "createdate").unwrap_or(now),
        last_modified_at: prop_date(properties, "hs_lastmodifieddate").unwrap_or(now),
        synced_at: now,
        sync_source: source,
    }
}

fn prop_str(properties: &Value, name: &str) -> String {
    properties
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn prop_amount(properties: &Value) -> f64 {
    match properties.get("amount") {
        Some(Value::String(s)) => s.parse().unwrap_or(0.0),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// HubSpot date properties arrive as RFC 3339 strings or epoch-millis
/// (numeric or stringified).
fn prop_date(properties: &Value, name: &str) -> Option<DateTime<Utc>> {
    match properties.get(name)? {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                s.parse::<i64>()
                    .ok()
                    .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            }),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contact_maps_all_named_properties() {
        let props = json!({
            "firstname": "Ada",
            "lastname": "Lovelace",
            "email": "ada@example.com",
            "jobtitle": "Engineer",
            "lifecyclestage": "customer",
            "createdate": "2024-03-01T09:30:00Z"
        });
        let now = Utc::now();
        let contact = map_contact(&props, "501", SyncSource::Webhook, now);

        assert_eq!(contact.hs_object_id, "501");
        assert_eq!(contact.first_name, "Ada");
        assert_eq!(contact.job_title, "Engineer");
        assert_eq!(contact.phone, "", "missing strings default to empty");
        assert_eq!(contact.created_at.to_rfc3339(), "2024-03-01T09:30:00+00:00");
        assert_eq!(contact.last_modified_at, now, "missing date falls back to now");
        assert_eq!(contact.synced_at, now);
    }

    #[test]
    fn deal_amount_defaults_to_zero() {
        let now = Utc::now();
        let deal = map_deal(&json!({}), "900", SyncSource::Webhook, now);
        assert!((deal.amount).abs() < f64::EPSILON);
        assert!(deal.close_date.is_none());
        assert_eq!(deal.deal_name, "");
    }

    #[test]
    fn deal_amount_parses_string_and_number() {
        let now = Utc::now();
        let from_string = map_deal(&json!({"amount": "1250.50"}), "1", SyncSource::Webhook, now);
        assert!((from_string.amount - 1250.50).abs() < f64::EPSILON);

        let from_number = map_deal(&json!({"amount": 900}), "2", SyncSource::Webhook, now);
        assert!((from_number.amount - 900.0).abs() < f64::EPSILON);
    }

    #[test]
    fn epoch_millis_dates_parse() {
        let props = json!({"closedate": "1717200000000"});
        let deal = map_deal(&props, "3", SyncSource::InitialBulkSync, Utc::now());
        assert_eq!(
            deal.close_date.unwrap().to_rfc3339(),
            "2024-06-01T00:00:00+00:00"
        );
    }

    #[test]
    fn mapping_is_idempotent_modulo_synced_at() {
        let props = json!({"firstname": "Ada", "createdate": "2024-03-01T09:30:00Z"});
        let now = Utc::now();
        let a = map_contact(&props, "1", SyncSource::Webhook, now);
        let b = map_contact(&props, "1", SyncSource::Webhook, now);
        assert_eq!(a, b);
    }
}
