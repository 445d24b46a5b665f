// Handler for the ListProjects RPC
use std::sync::Arc;
use tonic::{Response, Status};

use super::helpers::to_proto_project;
use crate::budget::ProjectCatalog;
use crate::services::{ListProjectsRequest, ListProjectsResponse};

pub async fn handle_list_projects(
    req_payload: ListProjectsRequest,
    catalog: Arc<ProjectCatalog>,
    expose_details: bool,
) -> Result<Response<ListProjectsResponse>, Status> {
    let projects = catalog
        .list_projects(req_payload.codigo_centro_gestor.as_deref())
        .await
        .map_err(|e| e.to_status(expose_details))?;

    Ok(Response::new(ListProjectsResponse {
        projects: projects.iter().map(to_proto_project).collect(),
    }))
}
