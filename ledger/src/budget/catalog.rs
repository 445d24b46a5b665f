// Read side of the ledger: project listing, managing centers, budget checks.
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data::schema::{ColumnMap, ProjectField};
use crate::data::{SheetGrid, SheetStore};
use crate::error::LedgerError;
use shared::models::{BudgetCheck, ManagingCenter, ProjectRecord};
use shared::spanish_format;

pub struct ProjectCatalog {
    store: Arc<dyn SheetStore>,
}

impl ProjectCatalog {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        ProjectCatalog { store }
    }

    async fn fetch_non_empty(&self) -> Result<SheetGrid, LedgerError> {
        let grid = self.store.fetch_grid().await?;
        if grid.is_empty() {
            tracing::warn!(store = self.store.name(), "Spreadsheet returned no rows");
            return Err(LedgerError::NotFound("No data found in the spreadsheet".to_string()));
        }
        Ok(grid)
    }

    /// All projects, optionally restricted to one managing center code.
    /// A blank filter means no filter; otherwise codes must match exactly
    /// after trimming.
    pub async fn list_projects(&self, managing_center: Option<&str>) -> Result<Vec<ProjectRecord>, LedgerError> {
        let grid = self.fetch_non_empty().await?;
        let projects = projects_from_grid(&grid)?;

        let filter = managing_center.map(str::trim).filter(|f| !f.is_empty());
        let projects: Vec<ProjectRecord> = match filter {
            Some(code) => projects
                .into_iter()
                .filter(|p| p.managing_center_code.trim() == code)
                .collect(),
            None => projects,
        };

        tracing::info!(
            store = self.store.name(),
            filter = ?filter,
            count = projects.len(),
            "Listed projects"
        );
        Ok(projects)
    }

    /// Looks up a single project by its identifier cell, first match wins.
    /// Rows with a blank identifier are never matched, so lookups agree with
    /// the updater.
    pub async fn find_project(&self, project_id: &str) -> Result<ProjectRecord, LedgerError> {
        let wanted = project_id.trim();
        if wanted.is_empty() {
            return Err(LedgerError::Validation("project_id is required".to_string()));
        }
        let grid = self.fetch_non_empty().await?;
        let columns = ColumnMap::resolve(grid.headers(), &[ProjectField::ProjectId])?;
        grid.data_rows()
            .iter()
            .enumerate()
            .find(|(_, row)| columns.text(row, ProjectField::ProjectId) == wanted)
            .map(|(idx, row)| project_from_row(&columns, idx, row))
            .ok_or_else(|| LedgerError::NotFound(format!("Project not found: {}", wanted)))
    }

    /// Distinct managing centers sorted by code. Rows missing either the
    /// code or the name are skipped; the last name seen for a code wins.
    pub async fn list_managing_centers(&self) -> Result<Vec<ManagingCenter>, LedgerError> {
        let grid = self.fetch_non_empty().await?;
        let columns = ColumnMap::resolve(
            grid.headers(),
            &[ProjectField::ManagingCenterCode, ProjectField::ManagingCenterName],
        )?;

        let mut centers = BTreeMap::new();
        for row in grid.data_rows() {
            let code = columns.text(row, ProjectField::ManagingCenterCode);
            let name = columns.text(row, ProjectField::ManagingCenterName);
            if !code.is_empty() && !name.is_empty() {
                centers.insert(code, name);
            }
        }

        tracing::info!(count = centers.len(), "Listed managing centers");
        Ok(centers.into_iter().map(|(code, name)| ManagingCenter { code, name }).collect())
    }

    pub async fn check_budget(&self, project_id: &str, requested: f64) -> Result<(ProjectRecord, BudgetCheck), LedgerError> {
        if !requested.is_finite() || requested < 0.0 {
            return Err(LedgerError::Validation(format!(
                "requested_amount must be a non-negative number, got {}",
                requested
            )));
        }
        let project = self.find_project(project_id).await?;
        let check = BudgetCheck::evaluate(&project, requested);
        if !check.within_budget {
            tracing::warn!(
                project_id = %project.project_id,
                requested,
                available = check.available,
                excess = check.excess,
                "Requested amount exceeds available budget"
            );
        }
        Ok((project, check))
    }
}

/// Maps every data row to a project record. Only the identifier column is
/// mandatory; other missing columns read as blank.
pub fn projects_from_grid(grid: &SheetGrid) -> Result<Vec<ProjectRecord>, LedgerError> {
    let columns = ColumnMap::resolve(grid.headers(), &[ProjectField::ProjectId])?;
    Ok(grid
        .data_rows()
        .iter()
        .enumerate()
        .map(|(idx, row)| project_from_row(&columns, idx, row))
        .collect())
}

fn project_from_row(columns: &ColumnMap, index: usize, row: &[String]) -> ProjectRecord {
    use ProjectField as F;

    let mut project_id = columns.text(row, F::ProjectId);
    if project_id.is_empty() {
        project_id = (index + 1).to_string();
    }

    ProjectRecord {
        project_id,
        name: columns.text(row, F::Name),
        purpose: columns.text(row, F::Purpose),
        authorized_value: spanish_format::parse_amount(&columns.text(row, F::AuthorizedValue)),
        committed_value: spanish_format::parse_amount(&columns.text(row, F::Observations)),
        cost_center_code: columns.text(row, F::CostCenterCode),
        cost_center_name: columns.text(row, F::CostCenterName),
        pep_element: columns.text(row, F::PepElement),
        pospre_code: columns.text(row, F::PospreCode),
        pospre_name: columns.text(row, F::PospreName),
        dane_code: columns.text(row, F::DaneCode),
        dane_name: columns.text(row, F::DaneName),
        atlas_line: columns.optional_text(row, F::AtlasLine),
        fund_code: columns.optional_text(row, F::FundCode),
        fund_name: columns.optional_text(row, F::FundName),
        mga_activity_code: columns.optional_text(row, F::MgaActivityCode),
        mga_activity_name: columns.optional_text(row, F::MgaActivityName),
        managing_center_code: columns.text(row, F::ManagingCenterCode),
        managing_center_name: columns.text(row, F::ManagingCenterName),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InMemorySheetStore;

    const HEADERS: &[&str] = &[
        "codigo_bpin_proyecto",
        "nombre_del_proyecto",
        "valor",
        "Observaciones",
        "rubro_atlas",
        "codigo_centro_gestor",
        "nombre_centro_gestor",
    ];

    fn catalog(rows: &[&[&str]]) -> ProjectCatalog {
        let mut all: Vec<&[&str]> = vec![HEADERS];
        all.extend_from_slice(rows);
        ProjectCatalog::new(Arc::new(InMemorySheetStore::from_rows("Sheet1", &all)))
    }

    fn sample() -> ProjectCatalog {
        catalog(&[
            &["2024001", "Laboratorio", "25.000.000", "1.000", "A-12", "41", "Ingeniería"],
            &["2024002", "Biblioteca", "3.500,50", "", "", "410", "Humanidades"],
            &["", "Sin código", "100", "0", "", "41", "Ingeniería Civil"],
        ])
    }

    #[tokio::test]
    async fn test_list_projects_parses_amounts_and_optionals() {
        let projects = sample().list_projects(None).await.unwrap();
        assert_eq!(projects.len(), 3);

        assert_eq!(projects[0].authorized_value, 25_000_000.0);
        assert_eq!(projects[0].committed_value, 1000.0);
        assert_eq!(projects[0].atlas_line.as_deref(), Some("A-12"));

        assert_eq!(projects[1].authorized_value, 3500.5);
        assert_eq!(projects[1].committed_value, 0.0);
        assert_eq!(projects[1].atlas_line, None);
        assert_eq!(projects[1].fund_code, None);
    }

    #[tokio::test]
    async fn test_blank_identifier_falls_back_to_row_number() {
        let projects = sample().list_projects(None).await.unwrap();
        assert_eq!(projects[2].project_id, "3");
    }

    #[tokio::test]
    async fn test_filter_is_exact_not_substring() {
        let projects = sample().list_projects(Some("41")).await.unwrap();
        let ids: Vec<&str> = projects.iter().map(|p| p.project_id.as_str()).collect();
        assert_eq!(ids, vec!["2024001", "3"]);

        let projects = sample().list_projects(Some(" 410 ")).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].project_id, "2024002");

        assert!(sample().list_projects(Some("4")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_filter_returns_everything() {
        assert_eq!(sample().list_projects(Some("  ")).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_store_is_not_found() {
        let catalog = ProjectCatalog::new(Arc::new(InMemorySheetStore::from_rows("Sheet1", &[])));
        let err = catalog.list_projects(None).await.unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_identifier_column_is_not_found() {
        let catalog = ProjectCatalog::new(Arc::new(InMemorySheetStore::from_rows(
            "Sheet1",
            &[&["nombre_del_proyecto", "valor"], &["Laboratorio", "1.000"]],
        )));
        let err = catalog.list_projects(None).await.unwrap_err();
        assert!(err.to_string().contains("codigo_bpin_proyecto"));
    }

    #[tokio::test]
    async fn test_managing_centers_are_distinct_and_sorted() {
        let centers = sample().list_managing_centers().await.unwrap();
        assert_eq!(
            centers,
            vec![
                ManagingCenter { code: "41".into(), name: "Ingeniería Civil".into() },
                ManagingCenter { code: "410".into(), name: "Humanidades".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_managing_centers_require_both_columns() {
        let catalog = ProjectCatalog::new(Arc::new(InMemorySheetStore::from_rows(
            "Sheet1",
            &[&["codigo_bpin_proyecto", "codigo_centro_gestor"], &["1", "41"]],
        )));
        let err = catalog.list_managing_centers().await.unwrap_err();
        assert!(err.to_string().contains("nombre_centro_gestor"));
    }

    #[tokio::test]
    async fn test_check_budget() {
        let (project, check) = sample().check_budget("2024001", 30_000_000.0).await.unwrap();
        assert_eq!(project.name, "Laboratorio");
        assert!(!check.within_budget);
        assert_eq!(check.available, 24_999_000.0);
        assert_eq!(check.excess, 5_001_000.0);
    }

    #[tokio::test]
    async fn test_check_budget_rejects_negative_amount() {
        let err = sample().check_budget("2024001", -1.0).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[tokio::test]
    async fn test_find_unknown_project() {
        let err = sample().find_project("999").await.unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_row_number_fallback_is_not_a_lookup_key() {
        let catalog = sample();
        // Listed as "3", but the row has no identifier cell.
        let listed = catalog.list_projects(None).await.unwrap();
        assert_eq!(listed[2].project_id, "3");

        let err = catalog.find_project("3").await.unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
        let err = catalog.check_budget("3", 10.0).await.unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_find_project_trims_identifier_cells() {
        let catalog = catalog(&[&[" 2024009 ", "Auditorio", "10", "2", "", "41", "Ingeniería"]]);
        let project = catalog.find_project("2024009").await.unwrap();
        assert_eq!(project.project_id, "2024009");
        assert_eq!(project.committed_value, 2.0);
    }
}
