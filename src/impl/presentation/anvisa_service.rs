use std::collections::BTreeMap;

use chrono::NaiveDate;
use fractic_server_error::ServerError;

use super::utils::{format_date, format_timestamp, today_local};
use crate::{
    domain::logic::{
        demand_summary::{summarize, DemandSummary},
        duplicate_guard::{ensure_no_open_duplicate, find_open_duplicate},
    },
    entities::{ClientId, Demand, DemandId},
};

/// One line of the per-client demands overview.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDemandsRow {
    pub client_id: ClientId,
    pub label: String,
    pub open: usize,
    pub last_update: String,
    pub last_author_initial: String,
}

/// A demand shaped for the client's demand table.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandRow {
    pub id: DemandId,
    pub request_type: String,
    pub status: String,
    pub due_date: String,
    pub overdue: bool,
    pub updated: String,
    pub notes: String,
}

/// In-memory view over the loaded demands.
#[derive(Default)]
pub struct AnvisaService {
    demands: Vec<Demand>,
}

impl AnvisaService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, demands: Vec<Demand>) {
        self.demands = demands;
    }

    /// Inserts the demand, or replaces the loaded one with the same id.
    pub fn upsert(&mut self, demand: Demand) {
        match self.demands.iter_mut().find(|d| d.id == demand.id) {
            Some(existing) => *existing = demand,
            None => self.demands.push(demand),
        }
    }

    pub fn remove(&mut self, id: &DemandId) -> Option<Demand> {
        let pos = self.demands.iter().position(|d| &d.id == id)?;
        Some(self.demands.remove(pos))
    }

    pub fn get(&self, id: &DemandId) -> Option<&Demand> {
        self.demands.iter().find(|d| &d.id == id)
    }

    /// Most recently touched first; demands never touched go last.
    pub fn demands_for_client(&self, client_id: ClientId) -> Vec<&Demand> {
        let mut demands: Vec<&Demand> = self
            .demands
            .iter()
            .filter(|d| d.client_id == client_id)
            .collect();
        demands.sort_by(|a, b| {
            (b.last_touched(), b.created_at)
                .cmp(&(a.last_touched(), a.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        demands
    }

    pub fn summary_for_client(&self, client_id: ClientId) -> DemandSummary {
        summarize(&self.demands_for_client(client_id))
    }

    /// One overview row per client with at least one demand, ordered by
    /// client id.
    pub fn client_rows(&self) -> Vec<ClientDemandsRow> {
        let mut by_client: BTreeMap<ClientId, Vec<&Demand>> = BTreeMap::new();
        for d in &self.demands {
            by_client.entry(d.client_id).or_default().push(d);
        }
        by_client
            .into_iter()
            .map(|(client_id, demands)| {
                let summary = summarize(&demands);
                ClientDemandsRow {
                    client_id,
                    label: summary.label,
                    open: summary.open,
                    last_update: format_timestamp(summary.last_update),
                    last_author_initial: summary
                        .last_author_initial
                        .map(String::from)
                        .unwrap_or_default(),
                }
            })
            .collect()
    }

    pub fn open_duplicate(&self, client_id: ClientId, request_type: &str) -> Option<&Demand> {
        find_open_duplicate(&self.demands, client_id, request_type)
    }

    /// Local pre-check before asking the remote to create a demand.
    pub fn check_duplicate(
        &self,
        client_id: ClientId,
        request_type: &str,
    ) -> Result<(), ServerError> {
        ensure_no_open_duplicate(&self.demands, client_id, request_type)
    }

    /// Display rows for a client. A demand is overdue when it is still open
    /// and its due date is before `today`.
    pub fn rows_for_client(&self, client_id: ClientId, today: NaiveDate) -> Vec<DemandRow> {
        self.demands_for_client(client_id)
            .into_iter()
            .map(|d| DemandRow {
                id: d.id.clone(),
                request_type: d.request_type.trim().to_string(),
                status: d.status.label().to_string(),
                due_date: format_date(d.payload.due_date),
                overdue: d.status.is_open() && d.payload.due_date.map_or(false, |due| due < today),
                updated: format_timestamp(d.last_touched()),
                notes: d.payload.notes.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// [`Self::rows_for_client`] against today's date in Brasília.
    pub fn current_rows_for_client(&self, client_id: ClientId) -> Vec<DemandRow> {
        self.rows_for_client(client_id, today_local())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone as _, Utc};

    use super::*;
    use crate::entities::{DemandPayload, DemandStatus};

    fn at(day: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 5, day, 15, 0, 0).unwrap())
    }

    fn demand(id: &str, client_id: ClientId, status: DemandStatus, updated: u32) -> Demand {
        Demand {
            id: id.into(),
            client_id,
            request_type: "Alteração de Endereço".into(),
            status,
            payload: DemandPayload {
                updated_by: Some("bruno".into()),
                ..Default::default()
            },
            created_at: at(1),
            updated_at: at(updated),
        }
    }

    fn service() -> AnvisaService {
        let mut s = AnvisaService::new();
        s.load(vec![
            demand("a", 1, DemandStatus::Done, 3),
            demand("b", 1, DemandStatus::InProgress, 9),
            demand("c", 2, DemandStatus::Canceled, 4),
        ]);
        s
    }

    #[test]
    fn lists_client_demands_newest_first() {
        let s = service();
        let ids: Vec<&str> = s
            .demands_for_client(1)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(s.demands_for_client(3).is_empty());
    }

    #[test]
    fn builds_overview_rows() {
        let rows = service().client_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "2 demandas (1 em aberto)");
        assert_eq!(rows[0].last_update, "09/05/2024 12:00");
        assert_eq!(rows[0].last_author_initial, "B");
        assert_eq!(rows[1].label, "Alteração de Endereço");
        assert_eq!(rows[1].open, 0);
    }

    #[test]
    fn duplicate_check_only_considers_open_demands() {
        let s = service();
        assert!(s.check_duplicate(1, "alteração de endereço ").is_err());
        assert!(s.check_duplicate(2, "Alteração de Endereço").is_ok());
        assert_eq!(
            s.open_duplicate(1, "Alteração de Endereço").map(|d| d.id.as_str()),
            Some("b")
        );
    }

    #[test]
    fn upsert_and_remove() {
        let mut s = service();
        s.upsert(demand("b", 1, DemandStatus::Done, 10));
        assert_eq!(s.summary_for_client(1).open, 0);
        s.upsert(demand("d", 3, DemandStatus::Draft, 11));
        assert_eq!(s.demands_for_client(3).len(), 1);
        assert!(s.remove(&"d".to_string()).is_some());
        assert!(s.remove(&"d".to_string()).is_none());
    }

    #[test]
    fn flags_overdue_open_demands() {
        let mut s = service();
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let mut late = demand("e", 4, DemandStatus::Submitted, 5);
        late.payload.due_date = NaiveDate::from_ymd_opt(2024, 5, 19);
        late.payload.notes = Some("aguardando protocolo".into());
        let mut closed = demand("f", 4, DemandStatus::Done, 6);
        closed.payload.due_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        s.upsert(late);
        s.upsert(closed);

        let rows = s.rows_for_client(4, today);
        assert_eq!(rows[0].id, "f");
        assert!(!rows[0].overdue);
        assert_eq!(rows[1].status, "Enviada");
        assert_eq!(rows[1].due_date, "19/05/2024");
        assert!(rows[1].overdue);
        assert_eq!(rows[1].notes, "aguardando protocolo");
    }
}
