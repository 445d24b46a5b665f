// gRPC surface of the ledger. Message and service types are generated from
// proto/ledger.proto by build.rs.
pub mod budget_service;

pub mod generated {
    tonic::include_proto!("ledger");
}

pub use generated::budget_ledger_client::BudgetLedgerClient;
pub use generated::budget_ledger_server::{BudgetLedger, BudgetLedgerServer};
pub use generated::{
    CheckBudgetRequest, CheckBudgetResponse, ListManagingCentersRequest, ListManagingCentersResponse,
    ListProjectsRequest, ListProjectsResponse, ManagingCenter as ProtoManagingCenter, Project as ProtoProject,
    UpdateObservationsRequest, UpdateObservationsResponse,
};
