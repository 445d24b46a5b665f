// Conversions between domain models and generated protobuf messages.
use crate::services::{CheckBudgetResponse, ProtoManagingCenter, ProtoProject, UpdateObservationsResponse};
use shared::models::{BudgetCheck, LedgerUpdate, ManagingCenter, ProjectRecord};

pub fn to_proto_project(project: &ProjectRecord) -> ProtoProject {
    ProtoProject {
        id: project.project_id.clone(),
        nombre_del_proyecto: project.name.clone(),
        objeto: project.purpose.clone(),
        valor: project.authorized_value,
        observaciones: project.committed_value,
        codigo_del_centro_de_costos: project.cost_center_code.clone(),
        nombre_del_centro_de_costos: project.cost_center_name.clone(),
        elemento_pep_proyecto: project.pep_element.clone(),
        codigo_pospre: project.pospre_code.clone(),
        nombre_pospre: project.pospre_name.clone(),
        codigo_dane: project.dane_code.clone(),
        nombre_codigo_dane: project.dane_name.clone(),
        rubro_atlas: project.atlas_line.clone(),
        codigo_del_fondo: project.fund_code.clone(),
        nombre_del_fondo: project.fund_name.clone(),
        codigo_actividad_mga: project.mga_activity_code.clone(),
        nombre_actividad_mga: project.mga_activity_name.clone(),
        codigo_centro_gestor: project.managing_center_code.clone(),
        nombre_centro_gestor: project.managing_center_name.clone(),
    }
}

pub fn to_proto_managing_center(center: &ManagingCenter) -> ProtoManagingCenter {
    ProtoManagingCenter { codigo: center.code.clone(), nombre: center.name.clone() }
}

pub fn to_update_response(update: &LedgerUpdate) -> UpdateObservationsResponse {
    UpdateObservationsResponse {
        success: true,
        previous_value: update.previous_value,
        new_value: update.new_value,
        cell_address: update.cell_address.clone(),
        entry_id: update.entry_id.clone(),
        exceeds_authorized: update.exceeds_authorized,
    }
}

pub fn to_check_response(project: &ProjectRecord, check: &BudgetCheck) -> CheckBudgetResponse {
    CheckBudgetResponse {
        project_id: project.project_id.clone(),
        authorized_value: project.authorized_value,
        committed_value: project.committed_value,
        available: check.available,
        requested: check.requested,
        within_budget: check.within_budget,
        excess: check.excess,
    }
}
