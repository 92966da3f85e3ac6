use std::str::FromStr;

use fractic_server_error::ServerError;

use crate::{domain::logic::slug::fold_text, entities::DemandType, errors::UnknownDemandType};

/// Canonical comparison form of a request type: folded, single-spaced.
pub(crate) fn normalize_request_type(raw: &str) -> String {
    fold_text(raw).split_whitespace().collect::<Vec<_>>().join(" ")
}

impl DemandType {
    /// Case-, accent- and whitespace-insensitive match against the official
    /// labels.
    pub fn parse(raw: &str) -> Option<DemandType> {
        let wanted = normalize_request_type(raw);
        DemandType::ALL
            .into_iter()
            .find(|t| normalize_request_type(t.label()) == wanted)
    }
}

impl FromStr for DemandType {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DemandType::parse(s).ok_or_else(|| UnknownDemandType::new(s.trim()))
    }
}
