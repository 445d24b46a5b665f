// BudgetLedger gRPC service: logs each request and dispatches to the
// handler modules below.
use std::sync::Arc;

use tonic::{Request, Response, Status};

use super::{
    BudgetLedger, CheckBudgetRequest, CheckBudgetResponse, ListManagingCentersRequest,
    ListManagingCentersResponse, ListProjectsRequest, ListProjectsResponse, UpdateObservationsRequest,
    UpdateObservationsResponse,
};
use crate::budget::{LedgerUpdater, ProjectCatalog};
use crate::data::SheetStore;

pub mod check_budget;
pub mod helpers;
pub mod list_managing_centers;
pub mod list_projects;
pub mod update_observations;

pub struct MyBudgetLedger {
    catalog: Arc<ProjectCatalog>,
    updater: Arc<LedgerUpdater>,
    expose_details: bool,
}

impl MyBudgetLedger {
    /// `expose_details` adds store diagnostics to internal error messages;
    /// only set it outside production.
    pub fn new(store: Arc<dyn SheetStore>, expose_details: bool) -> Self {
        MyBudgetLedger {
            catalog: Arc::new(ProjectCatalog::new(store.clone())),
            updater: Arc::new(LedgerUpdater::new(store)),
            expose_details,
        }
    }
}

#[tonic::async_trait]
impl BudgetLedger for MyBudgetLedger {
    async fn list_projects(&self, request: Request<ListProjectsRequest>) -> Result<Response<ListProjectsResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            codigo_centro_gestor = ?req_payload.codigo_centro_gestor,
            "Received ListProjectsRequest"
        );
        list_projects::handle_list_projects(req_payload, self.catalog.clone(), self.expose_details).await
    }

    async fn list_managing_centers(
        &self,
        _request: Request<ListManagingCentersRequest>,
    ) -> Result<Response<ListManagingCentersResponse>, Status> {
        tracing::info!("Received ListManagingCentersRequest");
        list_managing_centers::handle_list_managing_centers(self.catalog.clone(), self.expose_details).await
    }

    async fn update_observations(
        &self,
        request: Request<UpdateObservationsRequest>,
    ) -> Result<Response<UpdateObservationsResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            project_id = %req_payload.project_id,
            amount_to_add = req_payload.amount_to_add,
            "Received UpdateObservationsRequest"
        );
        update_observations::handle_update_observations(req_payload, self.updater.clone(), self.expose_details).await
    }

    async fn check_budget(&self, request: Request<CheckBudgetRequest>) -> Result<Response<CheckBudgetResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            project_id = %req_payload.project_id,
            requested_amount = req_payload.requested_amount,
            "Received CheckBudgetRequest"
        );
        check_budget::handle_check_budget(req_payload, self.catalog.clone(), self.expose_details).await
    }
}
