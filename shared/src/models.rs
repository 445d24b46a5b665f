use serde::{Deserialize, Serialize};

/// One budget line of the institution's investment plan.
///
/// Serialized with the spreadsheet's column names so JSON clients see the
/// same keys as the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "id")]
    pub project_id: String,
    #[serde(rename = "nombre_del_proyecto")]
    pub name: String,
    #[serde(rename = "objeto")]
    pub purpose: String,
    /// Total authorized value.
    #[serde(rename = "valor")]
    pub authorized_value: f64,
    /// Cumulative amount already committed against `authorized_value`.
    #[serde(rename = "observaciones")]
    pub committed_value: f64,
    #[serde(rename = "codigo_del_centro_de_costos")]
    pub cost_center_code: String,
    #[serde(rename = "nombre_del_centro_de_costos")]
    pub cost_center_name: String,
    #[serde(rename = "elemento_pep_proyecto")]
    pub pep_element: String,
    #[serde(rename = "codigo_pospre")]
    pub pospre_code: String,
    #[serde(rename = "nombre_pospre")]
    pub pospre_name: String,
    #[serde(rename = "codigo_dane")]
    pub dane_code: String,
    #[serde(rename = "nombre_codigo_dane")]
    pub dane_name: String,
    #[serde(rename = "rubro_atlas")]
    pub atlas_line: Option<String>,
    #[serde(rename = "codigo_del_fondo")]
    pub fund_code: Option<String>,
    #[serde(rename = "nombre_del_fondo")]
    pub fund_name: Option<String>,
    #[serde(rename = "codigo_actividad_mga")]
    pub mga_activity_code: Option<String>,
    #[serde(rename = "nombre_actividad_mga")]
    pub mga_activity_name: Option<String>,
    #[serde(rename = "codigo_centro_gestor")]
    pub managing_center_code: String,
    #[serde(rename = "nombre_centro_gestor")]
    pub managing_center_name: String,
}

impl ProjectRecord {
    /// Budget still free to commit. Negative once the project is overdrawn.
    pub fn available(&self) -> f64 {
        self.authorized_value - self.committed_value
    }

    pub fn is_overcommitted(&self) -> bool {
        self.committed_value > self.authorized_value
    }
}

/// A "centro gestor": the organizational unit that owns a group of projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagingCenter {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Outcome of committing an amount against a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerUpdate {
    pub entry_id: String,
    pub project_id: String,
    pub previous_value: f64,
    pub new_value: f64,
    /// A1 address of the cell that was written, e.g. `Sheet1!F12`.
    pub cell_address: String,
    pub authorized_value: Option<f64>,
    pub exceeds_authorized: bool,
}

/// Pre-submit check of a requested amount against a project's free budget.
/// Advisory only: nothing refuses a write because of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetCheck {
    pub requested: f64,
    pub available: f64,
    pub within_budget: bool,
    pub excess: f64,
}

impl BudgetCheck {
    pub fn evaluate(project: &ProjectRecord, requested: f64) -> Self {
        let available = project.available();
        BudgetCheck {
            requested,
            available,
            within_budget: requested <= available,
            excess: (requested - available).max(0.0),
        }
    }
}
