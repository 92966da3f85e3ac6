use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};

use super::client::ClientId;

pub type DemandId = String;

/// The official request types tracked against ANVISA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemandType {
    AlteracaoResponsavelLegal,
    AlteracaoResponsavelTecnico,
    AlteracaoEndereco,
    AlteracaoRazaoSocial,
    AutorizacaoFuncionamento,
    CancelamentoAfe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemandStatus {
    Draft,
    Submitted,
    InProgress,
    Done,
    Canceled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Demand {
    pub id: DemandId,
    pub client_id: ClientId,
    /// Type as stored remotely. Legacy rows may not match a [`DemandType`]
    /// label exactly.
    pub request_type: String,
    pub status: DemandStatus,
    pub payload: DemandPayload,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Free-form JSON payload of a demand. Known keys are typed, everything else
/// is kept in `extra` so it survives a round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemandPayload {
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDemand {
    pub client_id: ClientId,
    pub request_type: DemandType,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

// --

impl DemandType {
    pub const ALL: [DemandType; 6] = [
        DemandType::AlteracaoResponsavelLegal,
        DemandType::AlteracaoResponsavelTecnico,
        DemandType::AlteracaoEndereco,
        DemandType::AlteracaoRazaoSocial,
        DemandType::AutorizacaoFuncionamento,
        DemandType::CancelamentoAfe,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DemandType::AlteracaoResponsavelLegal => "Alteração do Responsável Legal",
            DemandType::AlteracaoResponsavelTecnico => "Alteração do Responsável Técnico",
            DemandType::AlteracaoEndereco => "Alteração de Endereço",
            DemandType::AlteracaoRazaoSocial => "Alteração da Razão Social",
            DemandType::AutorizacaoFuncionamento => "Autorização de Funcionamento (AFE)",
            DemandType::CancelamentoAfe => "Cancelamento de AFE",
        }
    }
}

impl std::fmt::Display for DemandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl DemandStatus {
    pub const OPEN: [DemandStatus; 3] = [
        DemandStatus::Draft,
        DemandStatus::Submitted,
        DemandStatus::InProgress,
    ];

    pub const CLOSED: [DemandStatus; 2] = [DemandStatus::Done, DemandStatus::Canceled];

    pub fn value(&self) -> &'static str {
        match self {
            DemandStatus::Draft => "draft",
            DemandStatus::Submitted => "submitted",
            DemandStatus::InProgress => "in_progress",
            DemandStatus::Done => "done",
            DemandStatus::Canceled => "canceled",
        }
    }

    pub fn is_open(&self) -> bool {
        Self::OPEN.contains(self)
    }
}

impl Demand {
    /// Timestamp used for "most recent" ordering.
    pub fn last_touched(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }

    pub fn author(&self) -> Option<&str> {
        self.payload
            .updated_by
            .as_deref()
            .or(self.payload.created_by.as_deref())
            .filter(|a| !a.trim().is_empty())
    }
}
