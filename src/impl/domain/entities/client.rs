use chrono::{DateTime, Utc};

pub type ClientId = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: ClientId,
    /// Legal name (razão social).
    pub razao_social: String,
    pub cnpj: String,
    /// Contact name.
    pub nome: String,
    /// Contact phone.
    pub numero: String,
    /// Free-text notes. May start with a `[STATUS]` tag, see [`ClientNotes`].
    pub obs: String,
    pub ultima_alteracao: Option<DateTime<Utc>>,
    pub ultima_por: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Editable fields of a client, used for create and update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientDraft {
    pub razao_social: String,
    pub cnpj: String,
    pub nome: String,
    pub numero: String,
    pub obs: String,
}

/// Client notes split into the optional leading `[STATUS]` tag and the
/// remaining body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientNotes {
    pub status: Option<String>,
    pub body: String,
}

// --

impl Client {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn notes(&self) -> ClientNotes {
        ClientNotes::parse(&self.obs)
    }

    pub fn to_draft(&self) -> ClientDraft {
        ClientDraft {
            razao_social: self.razao_social.clone(),
            cnpj: self.cnpj.clone(),
            nome: self.nome.clone(),
            numero: self.numero.clone(),
            obs: self.obs.clone(),
        }
    }
}
