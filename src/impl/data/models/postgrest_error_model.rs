use fractic_server_error::ServerError;

use crate::errors::RemoteRequestRejected;

pub(crate) const MSG_INVALID_DATA: &str = "Dados inválidos.";
pub(crate) const MSG_PERMISSION_DENIED: &str = "Sem permissão para esta operação.";
pub(crate) const MSG_DUPLICATE: &str = "Registro duplicado.";
pub(crate) const MSG_FOREIGN_KEY: &str = "Registro vinculado a outros dados.";
pub(crate) const MSG_NOT_NULL: &str = "Campo obrigatório ausente.";
pub(crate) const MSG_NOT_FOUND: &str = "Registro não encontrado.";
pub(crate) const MSG_SESSION_EXPIRED: &str = "Sessão expirada. Faça login novamente.";
pub(crate) const MSG_GENERIC: &str = "Erro ao comunicar com o servidor.";

/// Error body returned by PostgREST.
#[derive(Debug, Default, serde_derive::Deserialize)]
pub(crate) struct PostgrestErrorModel {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// Static user message for a SQLSTATE / PostgREST error code.
pub fn user_message_for_code(code: &str) -> &'static str {
    match code.trim() {
        "23514" => MSG_INVALID_DATA,
        "22P02" | "22001" | "22007" => MSG_INVALID_DATA,
        "42501" => MSG_PERMISSION_DENIED,
        "23505" => MSG_DUPLICATE,
        "23503" => MSG_FOREIGN_KEY,
        "23502" => MSG_NOT_NULL,
        "PGRST116" => MSG_NOT_FOUND,
        "PGRST301" | "PGRST302" => MSG_SESSION_EXPIRED,
        _ => MSG_GENERIC,
    }
}

impl PostgrestErrorModel {
    pub(crate) fn user_message(&self, http_status: u16) -> &'static str {
        match self.code.as_deref() {
            Some(code) if !code.trim().is_empty() => user_message_for_code(code),
            _ => match http_status {
                401 => MSG_SESSION_EXPIRED,
                403 => MSG_PERMISSION_DENIED,
                404 => MSG_NOT_FOUND,
                _ => MSG_GENERIC,
            },
        }
    }

    pub(crate) fn into_server_error(self, http_status: u16) -> ServerError {
        let message = self.user_message(http_status);
        RemoteRequestRejected::with_debug(message, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_codes() {
        assert_eq!(user_message_for_code("23514"), "Dados inválidos.");
        assert_eq!(
            user_message_for_code("42501"),
            "Sem permissão para esta operação."
        );
        assert_eq!(user_message_for_code("23505"), MSG_DUPLICATE);
        assert_eq!(user_message_for_code("99999"), MSG_GENERIC);
    }

    #[test]
    fn falls_back_to_http_status_without_code() {
        let e = PostgrestErrorModel::default();
        assert_eq!(e.user_message(403), MSG_PERMISSION_DENIED);
        assert_eq!(e.user_message(401), MSG_SESSION_EXPIRED);
        assert_eq!(e.user_message(500), MSG_GENERIC);

        let e: PostgrestErrorModel =
            serde_json::from_str(r#"{"code":"23503","message":"fk","details":null,"hint":null}"#)
                .unwrap();
        assert_eq!(e.user_message(409), MSG_FOREIGN_KEY);
    }
}
