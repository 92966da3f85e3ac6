use std::sync::OnceLock;

use regex::Regex;

use crate::entities::ClientNotes;

fn status_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^\s*\[([^\]\n]*)\]\s*(.*)$").expect("hardcoded regex should be valid")
    })
}

impl ClientNotes {
    /// Split `"[STATUS] body"`. An empty tag (`"[] body"`) counts as no status.
    pub fn parse(raw: &str) -> Self {
        match status_tag_regex().captures(raw) {
            Some(caps) => {
                let status = caps[1].trim();
                ClientNotes {
                    status: (!status.is_empty()).then(|| status.to_string()),
                    body: caps[2].trim_end().to_string(),
                }
            }
            None => ClientNotes {
                status: None,
                body: raw.trim().to_string(),
            },
        }
    }

    pub fn compose(&self) -> String {
        match self.status.as_deref().map(str::trim) {
            Some(status) if !status.is_empty() => {
                if self.body.trim().is_empty() {
                    format!("[{}]", status)
                } else {
                    format!("[{}] {}", status, self.body.trim())
                }
            }
            _ => self.body.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_tag() {
        let notes = ClientNotes::parse("[AGUARDANDO DOCS] enviar contrato social");
        assert_eq!(notes.status.as_deref(), Some("AGUARDANDO DOCS"));
        assert_eq!(notes.body, "enviar contrato social");
    }

    #[test]
    fn notes_without_tag_have_no_status() {
        let notes = ClientNotes::parse("  ligar amanhã ");
        assert_eq!(notes.status, None);
        assert_eq!(notes.body, "ligar amanhã");
        assert_eq!(ClientNotes::parse("texto [NAO] no meio").status, None);
    }

    #[test]
    fn keeps_multiline_body() {
        let notes = ClientNotes::parse("[OK] linha 1\nlinha 2");
        assert_eq!(notes.status.as_deref(), Some("OK"));
        assert_eq!(notes.body, "linha 1\nlinha 2");
    }

    #[test]
    fn compose_rebuilds_convention() {
        let notes = ClientNotes {
            status: Some("PENDENTE".into()),
            body: "ver alvará".into(),
        };
        assert_eq!(notes.compose(), "[PENDENTE] ver alvará");
        assert_eq!(ClientNotes::parse(&notes.compose()), notes);
        assert_eq!(
            ClientNotes {
                status: Some("  ".into()),
                body: "só texto".into()
            }
            .compose(),
            "só texto"
        );
    }
}
