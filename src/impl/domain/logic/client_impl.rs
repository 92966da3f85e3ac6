use fractic_server_error::ServerError;

use crate::{
    entities::ClientDraft,
    errors::{InvalidCnpj, MissingLegalName},
};

pub(crate) const CNPJ_DIGITS: usize = 14;

pub(crate) fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

impl ClientDraft {
    /// Legal name is required; CNPJ is optional but must carry 14 digits when
    /// present (punctuation is ignored).
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.razao_social.trim().is_empty() {
            return Err(MissingLegalName::new());
        }
        let cnpj = self.cnpj.trim();
        if !cnpj.is_empty() && digits_only(cnpj).len() != CNPJ_DIGITS {
            return Err(InvalidCnpj::new(cnpj));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(razao_social: &str, cnpj: &str) -> ClientDraft {
        ClientDraft {
            razao_social: razao_social.into(),
            cnpj: cnpj.into(),
            ..Default::default()
        }
    }

    #[test]
    fn validates_required_fields() {
        assert!(draft("Drogaria Sul", "12.345.678/0001-90").validate().is_ok());
        assert!(draft("Drogaria Sul", "").validate().is_ok());
        assert!(draft("   ", "").validate().is_err());
        assert!(draft("Drogaria Sul", "123").validate().is_err());
    }

    #[test]
    fn extracts_digits() {
        assert_eq!(digits_only("(11) 98765-4321"), "11987654321");
    }
}
