use std::{cmp::Ordering, collections::BTreeSet};

use fractic_server_error::ServerError;

use super::utils::{format_cnpj, format_phone, format_timestamp};
use crate::{
    domain::logic::{client_impl::digits_only, slug::fold_text},
    entities::{Client, ClientId, ColumnVisibility},
    errors::CsvExportFailed,
};

/// Status filter value meaning "no filter".
pub const ALL_STATUSES: &str = "Todos";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientColumn {
    Id,
    RazaoSocial,
    Cnpj,
    Nome,
    Numero,
    Status,
    Obs,
    UltimaAlteracao,
}

/// A client shaped for the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRow {
    pub id: ClientId,
    pub razao_social: String,
    pub cnpj: String,
    pub nome: String,
    pub numero: String,
    pub status: String,
    pub obs: String,
    pub ultima_alteracao: String,
    pub ultima_por: String,
}

pub struct ClientesViewModel {
    clients: Vec<Client>,
    search: String,
    status_filter: Option<String>,
    order_by: ClientColumn,
    ascending: bool,
}

// --

impl ClientColumn {
    pub const ALL: [ClientColumn; 8] = [
        ClientColumn::Id,
        ClientColumn::RazaoSocial,
        ClientColumn::Cnpj,
        ClientColumn::Nome,
        ClientColumn::Numero,
        ClientColumn::Status,
        ClientColumn::Obs,
        ClientColumn::UltimaAlteracao,
    ];

    /// Stable key, used for column visibility preferences.
    pub fn key(&self) -> &'static str {
        match self {
            ClientColumn::Id => "id",
            ClientColumn::RazaoSocial => "razao_social",
            ClientColumn::Cnpj => "cnpj",
            ClientColumn::Nome => "nome",
            ClientColumn::Numero => "numero",
            ClientColumn::Status => "status",
            ClientColumn::Obs => "obs",
            ClientColumn::UltimaAlteracao => "ultima_alteracao",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ClientColumn::Id => "ID",
            ClientColumn::RazaoSocial => "Razão Social",
            ClientColumn::Cnpj => "CNPJ",
            ClientColumn::Nome => "Nome",
            ClientColumn::Numero => "WhatsApp",
            ClientColumn::Status => "Status",
            ClientColumn::Obs => "Observações",
            ClientColumn::UltimaAlteracao => "Última Alteração",
        }
    }
}

impl ClientRow {
    fn cell(&self, column: ClientColumn) -> String {
        match column {
            ClientColumn::Id => self.id.to_string(),
            ClientColumn::RazaoSocial => self.razao_social.clone(),
            ClientColumn::Cnpj => self.cnpj.clone(),
            ClientColumn::Nome => self.nome.clone(),
            ClientColumn::Numero => self.numero.clone(),
            ClientColumn::Status => self.status.clone(),
            ClientColumn::Obs => self.obs.clone(),
            ClientColumn::UltimaAlteracao => {
                if self.ultima_por.is_empty() {
                    self.ultima_alteracao.clone()
                } else {
                    format!("{} ({})", self.ultima_alteracao, self.ultima_por)
                }
            }
        }
    }
}

fn to_row(c: &Client) -> ClientRow {
    let notes = c.notes();
    ClientRow {
        id: c.id,
        razao_social: c.razao_social.trim().to_string(),
        cnpj: format_cnpj(&c.cnpj),
        nome: c.nome.trim().to_string(),
        numero: format_phone(&c.numero),
        status: notes.status.unwrap_or_default(),
        obs: notes.body,
        ultima_alteracao: format_timestamp(c.ultima_alteracao),
        ultima_por: c.ultima_por.clone().unwrap_or_default(),
    }
}

/// Every whitespace-separated term must match. Terms made only of digits
/// and punctuation also match against CNPJ, phone and id digits.
fn matches(c: &Client, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }
    let text = fold_text(&format!(
        "{} {} {} {}",
        c.razao_social, c.nome, c.obs, c.cnpj
    ));
    let digits = format!(
        "{} {} {}",
        digits_only(&c.cnpj),
        digits_only(&c.numero),
        c.id
    );
    terms.iter().all(|term| {
        if text.contains(term.as_str()) {
            return true;
        }
        let term_digits = digits_only(term);
        !term_digits.is_empty()
            && term.chars().all(|ch| !ch.is_alphabetic())
            && digits.contains(&term_digits)
    })
}

/// Missing values sort last in both directions; ties fall back to id.
fn compare_optional<T: Ord>(a: Option<T>, b: Option<T>, ascending: bool) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) if ascending => a.cmp(&b),
        (Some(a), Some(b)) => b.cmp(&a),
    }
}

fn non_empty_folded(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| fold_text(s))
}

impl ClientesViewModel {
    pub fn new() -> Self {
        Self {
            clients: Vec::new(),
            search: String::new(),
            status_filter: None,
            order_by: ClientColumn::RazaoSocial,
            ascending: true,
        }
    }

    pub fn load(&mut self, clients: Vec<Client>) {
        self.clients = clients;
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn find(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
    }

    /// `"Todos"` or an empty value clears the filter.
    pub fn set_status_filter(&mut self, status: &str) {
        let status = status.trim();
        self.status_filter = if status.is_empty() || status == ALL_STATUSES {
            None
        } else {
            Some(status.to_string())
        };
    }

    pub fn set_order(&mut self, column: ClientColumn, ascending: bool) {
        self.order_by = column;
        self.ascending = ascending;
    }

    /// Header click: same column flips direction, a new column starts
    /// ascending.
    pub fn toggle_order(&mut self, column: ClientColumn) {
        if self.order_by == column {
            self.ascending = !self.ascending;
        } else {
            self.order_by = column;
            self.ascending = true;
        }
    }

    pub fn order(&self) -> (ClientColumn, bool) {
        (self.order_by, self.ascending)
    }

    /// "Todos" followed by the distinct status tags present, sorted.
    pub fn status_choices(&self) -> Vec<String> {
        let tags: BTreeSet<String> = self
            .clients
            .iter()
            .filter_map(|c| c.notes().status)
            .collect();
        std::iter::once(ALL_STATUSES.to_string())
            .chain(tags)
            .collect()
    }

    fn compare(&self, a: &Client, b: &Client) -> Ordering {
        let asc = self.ascending;
        let ord = match self.order_by {
            ClientColumn::Id => compare_optional(Some(a.id), Some(b.id), asc),
            ClientColumn::RazaoSocial => compare_optional(
                non_empty_folded(&a.razao_social),
                non_empty_folded(&b.razao_social),
                asc,
            ),
            ClientColumn::Cnpj => compare_optional(
                Some(digits_only(&a.cnpj)).filter(|d| !d.is_empty()),
                Some(digits_only(&b.cnpj)).filter(|d| !d.is_empty()),
                asc,
            ),
            ClientColumn::Nome => {
                compare_optional(non_empty_folded(&a.nome), non_empty_folded(&b.nome), asc)
            }
            ClientColumn::Numero => compare_optional(
                Some(digits_only(&a.numero)).filter(|d| !d.is_empty()),
                Some(digits_only(&b.numero)).filter(|d| !d.is_empty()),
                asc,
            ),
            ClientColumn::Status => compare_optional(
                a.notes().status.map(|s| fold_text(&s)),
                b.notes().status.map(|s| fold_text(&s)),
                asc,
            ),
            ClientColumn::Obs => compare_optional(
                non_empty_folded(&a.notes().body),
                non_empty_folded(&b.notes().body),
                asc,
            ),
            ClientColumn::UltimaAlteracao => {
                compare_optional(a.ultima_alteracao, b.ultima_alteracao, asc)
            }
        };
        ord.then_with(|| a.id.cmp(&b.id))
    }

    /// Filtered and ordered rows for the current search, status filter and
    /// order.
    pub fn rows(&self) -> Vec<ClientRow> {
        let terms: Vec<String> = fold_text(&self.search)
            .split_whitespace()
            .map(String::from)
            .collect();
        let wanted_status = self.status_filter.as_deref().map(fold_text);

        let mut visible: Vec<&Client> = self
            .clients
            .iter()
            .filter(|c| match &wanted_status {
                Some(wanted) => c
                    .notes()
                    .status
                    .map_or(false, |s| fold_text(&s) == *wanted),
                None => true,
            })
            .filter(|c| matches(c, &terms))
            .collect();
        visible.sort_by(|a, b| self.compare(a, b));
        visible.into_iter().map(to_row).collect()
    }

    /// CSV of the current rows, visible columns only.
    pub fn export_csv(&self, visibility: &ColumnVisibility) -> Result<String, ServerError> {
        let columns: Vec<ClientColumn> = ClientColumn::ALL
            .into_iter()
            .filter(|c| visibility.is_visible(c.key()))
            .collect();
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(columns.iter().map(|c| c.title()))
            .map_err(|e| CsvExportFailed::with_debug(&e))?;
        for row in self.rows() {
            writer
                .write_record(columns.iter().map(|c| row.cell(*c)))
                .map_err(|e| CsvExportFailed::with_debug(&e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| CsvExportFailed::with_debug(&e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| CsvExportFailed::with_debug(&e))
    }
}

impl Default for ClientesViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};

    use super::*;

    fn client(id: ClientId, razao_social: &str, cnpj: &str, numero: &str, obs: &str) -> Client {
        Client {
            id,
            razao_social: razao_social.into(),
            cnpj: cnpj.into(),
            nome: String::new(),
            numero: numero.into(),
            obs: obs.into(),
            ultima_alteracao: None,
            ultima_por: None,
            deleted_at: None,
        }
    }

    fn view_model() -> ClientesViewModel {
        let mut vm = ClientesViewModel::new();
        let mut c3 = client(3, "Ótica Visão", "", "", "[PENDENTE] enviar alvará");
        c3.ultima_alteracao = Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        c3.ultima_por = Some("ana".into());
        vm.load(vec![
            client(1, "farmácia Central", "11222333000181", "11987654321", "[ATIVO] ok"),
            client(2, "Drogaria Avenida", "", "2133334444", ""),
            c3,
        ]);
        vm
    }

    fn ids(rows: &[ClientRow]) -> Vec<ClientId> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn default_order_is_folded_legal_name() {
        assert_eq!(ids(&view_model().rows()), vec![2, 1, 3]);
    }

    #[test]
    fn search_ignores_case_and_accents() {
        let mut vm = view_model();
        vm.set_search("FARMACIA");
        assert_eq!(ids(&vm.rows()), vec![1]);
        vm.set_search("otica alvara");
        assert_eq!(ids(&vm.rows()), vec![3]);
        vm.set_search("otica central");
        assert!(vm.rows().is_empty());
    }

    #[test]
    fn digit_queries_match_documents_and_phones() {
        let mut vm = view_model();
        vm.set_search("11.222.333");
        assert_eq!(ids(&vm.rows()), vec![1]);
        vm.set_search("3333-4444");
        assert_eq!(ids(&vm.rows()), vec![2]);
    }

    #[test]
    fn status_filter_uses_notes_tag() {
        let mut vm = view_model();
        assert_eq!(vm.status_choices(), vec!["Todos", "ATIVO", "PENDENTE"]);
        vm.set_status_filter("pendente");
        assert_eq!(ids(&vm.rows()), vec![3]);
        vm.set_status_filter(ALL_STATUSES);
        assert_eq!(vm.rows().len(), 3);
    }

    #[test]
    fn missing_values_sort_last_both_ways() {
        let mut vm = view_model();
        vm.set_order(ClientColumn::Cnpj, true);
        assert_eq!(ids(&vm.rows()), vec![1, 2, 3]);
        vm.toggle_order(ClientColumn::Cnpj);
        assert_eq!(vm.order(), (ClientColumn::Cnpj, false));
        assert_eq!(ids(&vm.rows()), vec![1, 2, 3]);

        vm.toggle_order(ClientColumn::UltimaAlteracao);
        assert_eq!(ids(&vm.rows())[0], 3);
    }

    #[test]
    fn shapes_rows() {
        let vm = view_model();
        let row = vm.rows().into_iter().find(|r| r.id == 1).unwrap();
        assert_eq!(row.cnpj, "11.222.333/0001-81");
        assert_eq!(row.numero, "(11) 98765-4321");
        assert_eq!(row.status, "ATIVO");
        assert_eq!(row.obs, "ok");
        let row = vm.rows().into_iter().find(|r| r.id == 3).unwrap();
        assert_eq!(row.ultima_alteracao, "01/06/2024 09:00");
    }

    #[test]
    fn exports_visible_columns() {
        let mut vm = view_model();
        vm.set_search("drogaria");
        let mut visibility = ColumnVisibility::default();
        for column in ClientColumn::ALL {
            visibility.set_visible(column.key(), false);
        }
        visibility.set_visible("id", true);
        visibility.set_visible("razao_social", true);
        let csv = vm.export_csv(&visibility).unwrap();
        assert_eq!(csv, "ID,Razão Social\n2,Drogaria Avenida\n");
    }
}
