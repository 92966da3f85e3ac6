use crate::{domain::logic::slug::fold_text, entities::DemandStatus};

/// Legacy and human-entered spellings mapped to canonical values. Keys are
/// folded (lowercase, no accents, single spaces).
const STATUS_ALIASES: &[(&str, DemandStatus)] = &[
    ("draft", DemandStatus::Draft),
    ("rascunho", DemandStatus::Draft),
    ("aberta", DemandStatus::Draft),
    ("aberto", DemandStatus::Draft),
    ("open", DemandStatus::Draft),
    ("pendente", DemandStatus::Draft),
    ("pending", DemandStatus::Draft),
    ("nova", DemandStatus::Draft),
    ("submitted", DemandStatus::Submitted),
    ("enviada", DemandStatus::Submitted),
    ("enviado", DemandStatus::Submitted),
    ("protocolada", DemandStatus::Submitted),
    ("protocolado", DemandStatus::Submitted),
    ("in_progress", DemandStatus::InProgress),
    ("in progress", DemandStatus::InProgress),
    ("em andamento", DemandStatus::InProgress),
    ("em_andamento", DemandStatus::InProgress),
    ("andamento", DemandStatus::InProgress),
    ("em analise", DemandStatus::InProgress),
    ("done", DemandStatus::Done),
    ("finalizada", DemandStatus::Done),
    ("finalizado", DemandStatus::Done),
    ("concluida", DemandStatus::Done),
    ("concluido", DemandStatus::Done),
    ("closed", DemandStatus::Done),
    ("canceled", DemandStatus::Canceled),
    ("cancelled", DemandStatus::Canceled),
    ("cancelada", DemandStatus::Canceled),
    ("cancelado", DemandStatus::Canceled),
];

impl DemandStatus {
    /// Resolves any known spelling. Unknown values resolve to `Draft`, so a
    /// demand with an unrecognized status still counts as open.
    pub fn from_alias(raw: &str) -> DemandStatus {
        let folded = fold_text(raw)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        STATUS_ALIASES
            .iter()
            .find(|(alias, _)| *alias == folded)
            .map(|(_, status)| *status)
            .unwrap_or(DemandStatus::Draft)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DemandStatus::Draft => "Rascunho",
            DemandStatus::Submitted => "Enviada",
            DemandStatus::InProgress => "Em andamento",
            DemandStatus::Done => "Finalizada",
            DemandStatus::Canceled => "Cancelada",
        }
    }

    /// Closed statuses are terminal; open ones may move forward or close.
    pub fn can_transition_to(&self, next: DemandStatus) -> bool {
        use DemandStatus::*;
        match (self, next) {
            (a, b) if *a == b => false,
            (Draft, _) => true,
            (Submitted, InProgress | Done | Canceled) => true,
            (InProgress, Done | Canceled) => true,
            _ => false,
        }
    }
}

pub fn normalize_status(raw: &str) -> String {
    DemandStatus::from_alias(raw).value().to_string()
}

pub fn is_open_status(raw: &str) -> bool {
    DemandStatus::from_alias(raw).is_open()
}

pub fn is_closed_status(raw: &str) -> bool {
    !is_open_status(raw)
}

pub fn status_label(raw: &str) -> &'static str {
    DemandStatus::from_alias(raw).label()
}
