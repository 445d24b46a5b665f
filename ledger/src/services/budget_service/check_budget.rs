// Handler for the CheckBudget RPC
use std::sync::Arc;
use tonic::{Response, Status};

use super::helpers::to_check_response;
use crate::budget::ProjectCatalog;
use crate::services::{CheckBudgetRequest, CheckBudgetResponse};

pub async fn handle_check_budget(
    req_payload: CheckBudgetRequest,
    catalog: Arc<ProjectCatalog>,
    expose_details: bool,
) -> Result<Response<CheckBudgetResponse>, Status> {
    let (project, check) = catalog
        .check_budget(&req_payload.project_id, req_payload.requested_amount)
        .await
        .map_err(|e| e.to_status(expose_details))?;

    Ok(Response::new(to_check_response(&project, &check)))
}
