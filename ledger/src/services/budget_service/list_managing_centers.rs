// Handler for the ListManagingCenters RPC
use std::sync::Arc;
use tonic::{Response, Status};

use super::helpers::to_proto_managing_center;
use crate::budget::ProjectCatalog;
use crate::services::ListManagingCentersResponse;

pub async fn handle_list_managing_centers(
    catalog: Arc<ProjectCatalog>,
    expose_details: bool,
) -> Result<Response<ListManagingCentersResponse>, Status> {
    let centers = catalog
        .list_managing_centers()
        .await
        .map_err(|e| e.to_status(expose_details))?;

    Ok(Response::new(ListManagingCentersResponse {
        total: centers.len() as u32,
        centros_gestores: centers.iter().map(to_proto_managing_center).collect(),
    }))
}
