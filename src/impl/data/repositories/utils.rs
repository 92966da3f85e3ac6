use fractic_server_error::ServerError;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{InvalidRemoteResponse, RemoteRecordNotFound};

pub(crate) fn decode_rows<M, E>(table: &str, rows: Vec<Value>) -> Result<Vec<E>, ServerError>
where
    M: DeserializeOwned,
    E: From<M>,
{
    rows.into_iter()
        .map(|row| {
            serde_json::from_value::<M>(row)
                .map(E::from)
                .map_err(|e| InvalidRemoteResponse::with_debug(table, "row", &e))
        })
        .collect()
}

/// Single row of a write returning `representation`. No row means the filter
/// matched nothing visible to this user.
pub(crate) fn decode_single<M, E>(table: &str, id: &str, rows: Vec<Value>) -> Result<E, ServerError>
where
    M: DeserializeOwned,
    E: From<M>,
{
    decode_rows::<M, E>(table, rows)?
        .into_iter()
        .next()
        .ok_or_else(|| RemoteRecordNotFound::new(table, id))
}

pub(crate) fn ensure_affected(table: &str, id: &str, rows: &[Value]) -> Result<(), ServerError> {
    if rows.is_empty() {
        Err(RemoteRecordNotFound::new(table, id))
    } else {
        Ok(())
    }
}
