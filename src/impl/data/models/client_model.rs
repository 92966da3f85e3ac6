use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use super::timestamp_model::TimestampModel;
use crate::entities::{Client, ClientDraft};

pub(crate) const CLIENTS_TABLE: &str = "clients";

/// Row of the `clients` table. Text columns are nullable in older rows.
#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct ClientModel {
    pub id: i64,
    #[serde(default)]
    pub razao_social: Option<String>,
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub obs: Option<String>,
    #[serde(default)]
    pub ultima_alteracao: Option<TimestampModel>,
    #[serde(default)]
    pub ultima_por: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<TimestampModel>,
}

impl From<ClientModel> for Client {
    fn from(m: ClientModel) -> Self {
        Client {
            id: m.id,
            razao_social: m.razao_social.unwrap_or_default(),
            cnpj: m.cnpj.unwrap_or_default(),
            nome: m.nome.unwrap_or_default(),
            numero: m.numero.unwrap_or_default(),
            obs: m.obs.unwrap_or_default(),
            ultima_alteracao: m.ultima_alteracao.map(Into::into),
            ultima_por: m.ultima_por.filter(|s| !s.trim().is_empty()),
            deleted_at: m.deleted_at.map(Into::into),
        }
    }
}

/// Body for insert/update. Audit columns are stamped by the caller.
pub(crate) fn client_write_body(
    org_id: &str,
    draft: &ClientDraft,
    actor: &str,
    now: DateTime<Utc>,
) -> Value {
    json!({
        "org_id": org_id,
        "razao_social": draft.razao_social.trim(),
        "cnpj": draft.cnpj.trim(),
        "nome": draft.nome.trim(),
        "numero": draft.numero.trim(),
        "obs": draft.obs.trim(),
        "ultima_alteracao": now.to_rfc3339(),
        "ultima_por": actor,
    })
}
