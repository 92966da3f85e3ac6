use serde_json::{json, Value};

use super::timestamp_model::TimestampModel;
use crate::entities::{NewNotification, Notification};

pub(crate) const NOTIFICATIONS_TABLE: &str = "notifications";

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct NotificationModel {
    pub id: Value,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub actor_email: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<TimestampModel>,
}

impl From<NotificationModel> for Notification {
    fn from(m: NotificationModel) -> Self {
        Notification {
            id: match m.id {
                Value::String(s) => s,
                other => other.to_string(),
            },
            message: m.message.unwrap_or_default(),
            actor: m.actor_email.filter(|a| !a.trim().is_empty()),
            module: m.module.unwrap_or_default(),
            event: m.event.unwrap_or_default(),
            is_read: m.is_read,
            created_at: m.created_at.map(Into::into),
        }
    }
}

pub(crate) fn notification_insert_body(org_id: &str, n: &NewNotification) -> Value {
    json!({
        "org_id": org_id,
        "message": n.message,
        "actor_email": n.actor,
        "module": n.module,
        "event": n.event,
        "is_read": false,
    })
}
