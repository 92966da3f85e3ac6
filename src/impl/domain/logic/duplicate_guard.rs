use fractic_server_error::ServerError;

use crate::{
    domain::logic::demand_impl::normalize_request_type,
    entities::{ClientId, Demand},
    errors::DuplicateOpenDemand,
};

/// First open demand of `client_id` with the same (normalized) type.
pub fn find_open_duplicate<'a>(
    demands: &'a [Demand],
    client_id: ClientId,
    request_type: &str,
) -> Option<&'a Demand> {
    let wanted = normalize_request_type(request_type);
    demands.iter().find(|d| {
        d.client_id == client_id
            && d.status.is_open()
            && normalize_request_type(&d.request_type) == wanted
    })
}

pub fn ensure_no_open_duplicate(
    demands: &[Demand],
    client_id: ClientId,
    request_type: &str,
) -> Result<(), ServerError> {
    match find_open_duplicate(demands, client_id, request_type) {
        Some(existing) => Err(DuplicateOpenDemand::new(&existing.request_type)),
        None => Ok(()),
    }
}
