use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use fractic_server_error::ServerError;
use serde::Deserialize;

use crate::errors::InvalidTimestamp;

/// Timestamp as PostgREST renders it. Accepts RFC 3339, Postgres text output
/// (`2024-05-10 12:00:00.123+00`) and zone-less values, which are taken as
/// UTC.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimestampModel(DateTime<Utc>);

impl FromStr for TimestampModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(d) = DateTime::parse_from_rfc3339(s) {
            return Ok(TimestampModel(d.with_timezone(&Utc)));
        }
        for fmt in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
            if let Ok(d) = DateTime::parse_from_str(s, fmt) {
                return Ok(TimestampModel(d.with_timezone(&Utc)));
            }
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(d) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(TimestampModel(d.and_utc()));
            }
        }
        Err(InvalidTimestamp::new(s))
    }
}

impl<'de> Deserialize<'de> for TimestampModel {
    fn deserialize<D>(deserializer: D) -> Result<TimestampModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TimestampModel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<TimestampModel> for DateTime<Utc> {
    fn from(value: TimestampModel) -> Self {
        value.0
    }
}

/// Due dates are stored as ISO dates, but older rows carry `dd/mm/yyyy`.
pub(crate) fn parse_due_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
        .or_else(|| TimestampModel::from_str(s).ok().map(|t| t.0.date_naive()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn parse(s: &str) -> DateTime<Utc> {
        TimestampModel::from_str(s).unwrap().into()
    }

    #[test]
    fn parses_postgrest_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 10, 12, 30, 0).unwrap();
        assert_eq!(parse("2024-05-10T12:30:00+00:00"), expected);
        assert_eq!(parse("2024-05-10T09:30:00-03:00"), expected);
        assert_eq!(parse("2024-05-10 12:30:00+00"), expected);
        assert_eq!(parse("2024-05-10T12:30:00"), expected);
        assert_eq!(
            parse("2024-05-10T12:30:00.250+00:00").timestamp_millis(),
            expected.timestamp_millis() + 250
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(TimestampModel::from_str("ontem").is_err());
    }

    #[test]
    fn parses_due_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 7, 1);
        assert_eq!(parse_due_date("2024-07-01"), expected);
        assert_eq!(parse_due_date("01/07/2024"), expected);
        assert_eq!(parse_due_date("2024-07-01T10:00:00Z"), expected);
        assert_eq!(parse_due_date("sem prazo"), None);
    }
}
