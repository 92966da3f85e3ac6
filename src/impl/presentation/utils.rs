use chrono::{DateTime, FixedOffset, NaiveDate, Offset as _, Utc};
use fractic_server_error::ServerError;

use crate::domain::logic::client_impl::digits_only;

/// Display timezone: Brasília, which has had no DST since 2019.
const DISPLAY_OFFSET_SECS: i32 = -3 * 3600;

fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// `dd/mm/yyyy HH:MM` in Brasília time; empty for missing values.
pub(crate) fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| {
        t.with_timezone(&display_offset())
            .format("%d/%m/%Y %H:%M")
            .to_string()
    })
    .unwrap_or_default()
}

pub(crate) fn format_date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

pub(crate) fn today_local() -> NaiveDate {
    Utc::now().with_timezone(&display_offset()).date_naive()
}

/// `00.000.000/0000-00` for 14-digit values; anything else is shown as
/// typed.
pub(crate) fn format_cnpj(raw: &str) -> String {
    let d = digits_only(raw);
    if d.len() != 14 {
        return raw.trim().to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &d[0..2],
        &d[2..5],
        &d[5..8],
        &d[8..12],
        &d[12..14]
    )
}

/// `(00) 00000-0000` / `(00) 0000-0000`; a leading country code 55 is
/// dropped. Other shapes are shown as typed.
pub(crate) fn format_phone(raw: &str) -> String {
    let mut d = digits_only(raw);
    if (d.len() == 12 || d.len() == 13) && d.starts_with("55") {
        d = d[2..].to_string();
    }
    match d.len() {
        11 => format!("({}) {}-{}", &d[0..2], &d[2..7], &d[7..11]),
        10 => format!("({}) {}-{}", &d[0..2], &d[2..6], &d[6..10]),
        _ => raw.trim().to_string(),
    }
}

/// Text shown to the user for a failed action.
pub(crate) fn user_message(e: &ServerError) -> String {
    e.to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn formats_documents() {
        assert_eq!(format_cnpj("11222333000181"), "11.222.333/0001-81");
        assert_eq!(format_cnpj(" 123 "), "123");
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("+55 (21) 3333-4444"), "(21) 3333-4444");
        assert_eq!(format_phone("ramal 12"), "ramal 12");
    }

    #[test]
    fn formats_dates_in_brasilia_time() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 2, 30, 0).unwrap();
        assert_eq!(format_timestamp(Some(ts)), "01/01/2024 23:30");
        assert_eq!(format_timestamp(None), "");
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 3, 9)),
            "09/03/2024"
        );
    }
}
