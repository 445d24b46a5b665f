// Handler for the UpdateObservations RPC
use std::sync::Arc;
use tonic::{Response, Status};

use super::helpers::to_update_response;
use crate::budget::LedgerUpdater;
use crate::services::{UpdateObservationsRequest, UpdateObservationsResponse};

pub async fn handle_update_observations(
    req_payload: UpdateObservationsRequest,
    updater: Arc<LedgerUpdater>,
    expose_details: bool,
) -> Result<Response<UpdateObservationsResponse>, Status> {
    match updater.update_observations(&req_payload.project_id, req_payload.amount_to_add).await {
        Ok(update) => Ok(Response::new(to_update_response(&update))),
        Err(e) => {
            tracing::warn!(
                project_id = %req_payload.project_id,
                amount_to_add = req_payload.amount_to_add,
                kind = ?e.kind(),
                "UpdateObservations failed (handler)"
            );
            Err(e.to_status(expose_details))
        }
    }
}
