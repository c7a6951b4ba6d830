use super::write_through::{self, Delivery};
use super::{api_path, CmdMessage, CmdResult};
use crate::error::{MindcareError, Result};
use crate::model::{SosAlert, SosRecord, StorageKey, SOS_CAP};
use crate::store::{StorageBackend, Store};
use crate::transport::{Request, Transport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};

pub const ROUTE: &str = "/sos";

const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

/// Persists a stamped alert at the head of the SOS log.
pub fn append<B: StorageBackend, T: Serialize>(store: &Store<B>, record: &T) -> Result<usize> {
    store.prepend_capped(StorageKey::Sos, record, SOS_CAP)
}

/// The payload with `date` set to `now`, keeping every other field. A
/// payload that is not an object records only the date.
pub fn stamp_payload(payload: &Value, now: DateTime<Utc>) -> Value {
    let mut record = match payload {
        Value::Object(fields) => fields.clone(),
        _ => Map::new(),
    };
    record.insert("date".to_string(), json!(now));
    Value::Object(record)
}

/// Accepts an optional leading `+` followed by 10 to 15 digits.
pub fn validate_phone(phone: &str) -> Result<String> {
    let phone = phone.trim();
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let valid = (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(MindcareError::Validation(
            "Enter a valid phone number (10-15 digits).".to_string(),
        ));
    }
    Ok(phone.to_string())
}

pub fn run<B: StorageBackend, T: Transport + ?Sized>(
    store: &Store<B>,
    transport: &T,
    prefix: &str,
    mut alert: SosAlert,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let phone = validate_phone(alert.phone.as_deref().unwrap_or_default())?;
    alert.phone = Some(phone);

    let request = Request::post_json(api_path(prefix, ROUTE), &alert)?;
    let record = SosRecord::stamp(alert, now);

    let delivery = write_through::deliver(transport, &request, || {
        append(store, &record).map(|_| ())
    })?;

    let mut result = CmdResult::default();
    let record = match &delivery {
        Delivery::Remote(response) => {
            let message = response
                .body
                .pointer("/result/message")
                .and_then(|m| m.as_str())
                .unwrap_or("SOS sent.");
            result.add_message(CmdMessage::success(message));
            // The server stamps its own copy; report that one when it is echoed.
            response
                .body
                .pointer("/result/record")
                .and_then(|r| serde_json::from_value(r.clone()).ok())
                .unwrap_or(record)
        }
        Delivery::Local { .. } => {
            result.add_message(CmdMessage::warning(
                "No backend or error: SOS recorded locally.",
            ));
            record
        }
    };
    Ok(result.with_sos_records(vec![record]).with_delivery(delivery))
}

pub fn list<B: StorageBackend>(store: &Store<B>) -> CmdResult {
    let records: Vec<SosRecord> = store.read_list(StorageKey::Sos);
    CmdResult::default().with_sos_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::transport::{ApiClient, Interceptor};

    fn alert(phone: &str) -> SosAlert {
        SosAlert {
            name: Some("Anon".into()),
            phone: Some(phone.into()),
            relation: Some("Friend".into()),
            details: Some("Triggered from CLI".into()),
        }
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+911234567890").is_ok());
        assert!(validate_phone(" 1234567890 ").is_ok());
        assert!(validate_phone("123456789").is_err());
        assert!(validate_phone("1234567890123456").is_err());
        assert!(validate_phone("+91-1234567890").is_err());
        assert!(validate_phone("++1234567890").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_sos_through_interceptor_reports_mock_message() {
        let store = Store::new(MemBackend::new());
        let client = ApiClient::offline().with_interceptor(Interceptor::new(store.clone()));

        let result = run(&store, &client, "/api", alert("+911234567890"), Utc::now()).unwrap();
        assert_eq!(result.messages[0].content, "SOS recorded (mock)");

        let records: Vec<SosRecord> = store.read_list(StorageKey::Sos);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].alert.name.as_deref(), Some("Anon"));
    }

    #[test]
    fn test_sos_fallback_keeps_full_payload() {
        let store = Store::new(MemBackend::new());
        let client: ApiClient<MemBackend> = ApiClient::offline();
        let now = Utc::now();

        let result = run(&store, &client, "/api", alert("1234567890"), now).unwrap();
        assert!(result.delivery.unwrap().is_local());

        let records: Vec<SosRecord> = store.read_list(StorageKey::Sos);
        assert_eq!(records, vec![SosRecord::stamp(alert("1234567890"), now)]);
    }

    #[test]
    fn test_both_paths_report_the_stored_record() {
        let now = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let via_api = Store::new(MemBackend::new());
        let client = ApiClient::offline().with_interceptor(Interceptor::new(via_api.clone()));
        let remote = run(&via_api, &client, "/api", alert("+911234567890"), now).unwrap();
        let stored: Vec<SosRecord> = via_api.read_list(StorageKey::Sos);
        assert_eq!(remote.sos_records, stored);

        let via_fallback = Store::new(MemBackend::new());
        let offline: ApiClient<MemBackend> = ApiClient::offline();
        let local = run(&via_fallback, &offline, "/api", alert("+911234567890"), now).unwrap();
        let stored_local: Vec<SosRecord> = via_fallback.read_list(StorageKey::Sos);
        assert_eq!(local.sos_records, stored_local);

        assert_eq!(stored[0].alert, stored_local[0].alert);
    }

    #[test]
    fn test_stamp_payload_adds_date_and_keeps_fields() {
        let now = Utc::now();
        let record = stamp_payload(&json!({"phone": "1234567890", "location": "dorm 4"}), now);
        assert_eq!(record["location"], "dorm 4");
        assert_eq!(record["date"], json!(now));

        let stamped: SosRecord = serde_json::from_value(record).unwrap();
        assert_eq!(stamped.date, now);
        assert_eq!(stamp_payload(&Value::Null, now), json!({ "date": now }));
    }

    #[test]
    fn test_invalid_phone_writes_nothing() {
        let store = Store::new(MemBackend::new());
        let client: ApiClient<MemBackend> = ApiClient::offline();
        assert!(run(&store, &client, "/api", alert("12"), Utc::now()).is_err());
        assert!(list(&store).sos_records.is_empty());
    }
}
