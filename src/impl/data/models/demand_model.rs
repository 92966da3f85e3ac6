use serde_json::{json, Map, Value};

use super::timestamp_model::{parse_due_date, TimestampModel};
use crate::entities::{ClientId, Demand, DemandPayload, DemandStatus};

pub(crate) const DEMANDS_TABLE: &str = "client_anvisa_requests";

const KEY_DUE_DATE: &str = "due_date";
const KEY_NOTES: &str = "notes";
const KEY_CREATED_BY: &str = "created_by";
const KEY_UPDATED_BY: &str = "updated_by";

/// Older rows used Portuguese keys in the payload.
const LEGACY_DUE_DATE: &str = "prazo";
const LEGACY_NOTES: &str = "observacoes";

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct DemandModel {
    /// uuid in current schema; integer ids exist in legacy rows.
    pub id: Value,
    pub client_id: i64,
    #[serde(default)]
    pub request_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payload: Option<Value>,
    #[serde(default)]
    pub created_at: Option<TimestampModel>,
    #[serde(default)]
    pub updated_at: Option<TimestampModel>,
}

fn id_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Removes `key` only when its value is a non-empty string `parse` accepts.
/// Anything else stays in the map and is written back untouched.
fn take_parsed<T>(
    map: &mut Map<String, Value>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let parsed = match map.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => parse(s)?,
        _ => return None,
    };
    map.remove(key);
    Some(parsed)
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    take_parsed(map, key, |s| Some(s.to_string()))
}

pub(crate) fn payload_from_value(value: Option<Value>) -> DemandPayload {
    let mut map = match value {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    let due_date = take_parsed(&mut map, KEY_DUE_DATE, parse_due_date)
        .or_else(|| take_parsed(&mut map, LEGACY_DUE_DATE, parse_due_date));
    let notes = take_string(&mut map, KEY_NOTES).or_else(|| take_string(&mut map, LEGACY_NOTES));
    DemandPayload {
        due_date,
        notes,
        created_by: take_string(&mut map, KEY_CREATED_BY),
        updated_by: take_string(&mut map, KEY_UPDATED_BY),
        extra: map,
    }
}

pub(crate) fn payload_to_value(payload: &DemandPayload) -> Value {
    let mut map = payload.extra.clone();
    let mut put = |key: &str, value: Option<String>| {
        if let Some(v) = value {
            map.insert(key.to_string(), Value::String(v));
        }
    };
    put(
        KEY_DUE_DATE,
        payload.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
    );
    put(KEY_NOTES, payload.notes.clone());
    put(KEY_CREATED_BY, payload.created_by.clone());
    put(KEY_UPDATED_BY, payload.updated_by.clone());
    Value::Object(map)
}

impl From<DemandModel> for Demand {
    fn from(m: DemandModel) -> Self {
        Demand {
            id: id_string(&m.id),
            client_id: m.client_id,
            request_type: m.request_type.unwrap_or_default().trim().to_string(),
            status: DemandStatus::from_alias(m.status.as_deref().unwrap_or_default()),
            payload: payload_from_value(m.payload),
            created_at: m.created_at.map(Into::into),
            updated_at: m.updated_at.map(Into::into),
        }
    }
}

pub(crate) fn demand_insert_body(
    org_id: &str,
    client_id: ClientId,
    request_type: &str,
    payload: &DemandPayload,
) -> Value {
    json!({
        "org_id": org_id,
        "client_id": client_id,
        "request_type": request_type,
        "status": DemandStatus::Draft.value(),
        "payload": payload_to_value(payload),
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn decodes_legacy_row() {
        let row = json!({
            "id": 12,
            "client_id": 3,
            "request_type": " Alteração de Endereço ",
            "status": "aberta",
            "payload": { "prazo": "15/08/2024", "observacoes": "aguardando", "protocolo": "123" },
            "created_at": "2024-08-01T10:00:00+00:00",
            "updated_at": null
        });
        let demand: Demand = serde_json::from_value::<DemandModel>(row).unwrap().into();
        assert_eq!(demand.id, "12");
        assert_eq!(demand.request_type, "Alteração de Endereço");
        assert_eq!(demand.status, DemandStatus::Draft);
        assert_eq!(demand.payload.due_date, NaiveDate::from_ymd_opt(2024, 8, 15));
        assert_eq!(demand.payload.notes.as_deref(), Some("aguardando"));
        assert_eq!(demand.payload.extra.get("protocolo"), Some(&json!("123")));
        assert!(demand.updated_at.is_none());
    }

    #[test]
    fn payload_keeps_unknown_keys() {
        let original = json!({
            "due_date": "2024-09-30",
            "notes": "n",
            "created_by": "ana",
            "audit": { "ip": "10.0.0.1" }
        });
        let payload = payload_from_value(Some(original.clone()));
        assert_eq!(payload.created_by.as_deref(), Some("ana"));
        assert_eq!(payload_to_value(&payload), original);
    }

    #[test]
    fn unreadable_known_keys_survive_round_trip() {
        let original = json!({ "prazo": "sem prazo", "created_by": 7, "notes": "" });
        let payload = payload_from_value(Some(original.clone()));
        assert!(payload.due_date.is_none());
        assert!(payload.created_by.is_none());
        assert!(payload.notes.is_none());
        assert_eq!(payload_to_value(&payload), original);
    }

    #[test]
    fn invalid_due_date_is_kept_until_replaced() {
        let mut payload = payload_from_value(Some(json!({ "due_date": "31/02/2024" })));
        assert!(payload.due_date.is_none());
        assert_eq!(payload_to_value(&payload)["due_date"], "31/02/2024");

        payload.due_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(payload_to_value(&payload)["due_date"], "2024-03-01");
    }

    #[test]
    fn non_object_payload_is_empty() {
        assert_eq!(payload_from_value(Some(json!("x"))), DemandPayload::default());
        assert_eq!(payload_from_value(None), DemandPayload::default());
    }
}
