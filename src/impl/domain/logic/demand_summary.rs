use chrono::{DateTime, Utc};

use crate::entities::Demand;

#[derive(Debug, Clone, PartialEq)]
pub struct DemandSummary {
    pub label: String,
    pub total: usize,
    pub open: usize,
    pub last_update: Option<DateTime<Utc>>,
    pub last_author_initial: Option<char>,
}

pub(crate) fn author_initial(author: &str) -> Option<char> {
    author
        .chars()
        .find(|c| c.is_alphanumeric())
        .and_then(|c| c.to_uppercase().next())
}

/// One-line label for a client's demands:
/// - none: empty
/// - one: its type
/// - several: "N demandas (k em aberto)", or "N demandas (finalizadas)".
pub fn summary_label(demands: &[&Demand]) -> String {
    match demands {
        [] => String::new(),
        [only] => only.request_type.trim().to_string(),
        _ => {
            let open = demands.iter().filter(|d| d.status.is_open()).count();
            if open == 0 {
                format!("{} demandas (finalizadas)", demands.len())
            } else {
                format!("{} demandas ({} em aberto)", demands.len(), open)
            }
        }
    }
}

/// Most recently touched demand; ties on the update timestamp go to the one
/// created later.
pub fn most_recent<'a>(demands: &[&'a Demand]) -> Option<&'a Demand> {
    demands
        .iter()
        .copied()
        .max_by_key(|d| (d.last_touched(), d.created_at))
}

pub fn summarize(demands: &[&Demand]) -> DemandSummary {
    let latest = most_recent(demands);
    DemandSummary {
        label: summary_label(demands),
        total: demands.len(),
        open: demands.iter().filter(|d| d.status.is_open()).count(),
        last_update: latest.and_then(|d| d.last_touched()),
        last_author_initial: latest.and_then(|d| d.author()).and_then(author_initial),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;
    use crate::entities::{DemandPayload, DemandStatus};

    fn at(h: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 5, 10, h, 0, 0).unwrap())
    }

    fn demand(
        id: &str,
        status: DemandStatus,
        created: Option<DateTime<Utc>>,
        updated: Option<DateTime<Utc>>,
        by: Option<&str>,
    ) -> Demand {
        Demand {
            id: id.into(),
            client_id: 1,
            request_type: "Alteração de Endereço".into(),
            status,
            payload: DemandPayload {
                updated_by: by.map(String::from),
                ..Default::default()
            },
            created_at: created,
            updated_at: updated,
        }
    }

    #[test]
    fn label_rules() {
        let a = demand("a", DemandStatus::Draft, at(1), None, None);
        let b = demand("b", DemandStatus::Done, at(2), None, None);
        let c = demand("c", DemandStatus::Canceled, at(3), None, None);

        assert_eq!(summary_label(&[]), "");
        assert_eq!(summary_label(&[&a]), "Alteração de Endereço");
        assert_eq!(summary_label(&[&a, &b, &c]), "3 demandas (1 em aberto)");
        assert_eq!(summary_label(&[&b, &c]), "2 demandas (finalizadas)");
    }

    #[test]
    fn picks_latest_update_with_created_tie_break() {
        let a = demand("a", DemandStatus::Draft, at(1), at(9), Some("maria"));
        let b = demand("b", DemandStatus::Draft, at(2), at(9), Some("joão"));
        let c = demand("c", DemandStatus::Draft, at(8), None, Some("zé"));

        let summary = summarize(&[&a, &b, &c]);
        assert_eq!(summary.last_update, at(9));
        assert_eq!(summary.last_author_initial, Some('J'));
        assert_eq!(summary.open, 3);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn falls_back_to_created_and_creator() {
        let mut a = demand("a", DemandStatus::Done, at(3), None, None);
        a.payload.created_by = Some("  carla@empresa.com".into());
        let summary = summarize(&[&a]);
        assert_eq!(summary.last_update, at(3));
        assert_eq!(summary.last_author_initial, Some('C'));
    }

    #[test]
    fn empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.label, "");
        assert_eq!(summary.last_update, None);
        assert_eq!(summary.last_author_initial, None);
    }
}
