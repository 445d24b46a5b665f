// Write side of the ledger: commit an amount against a project's
// cumulative "observaciones" total.
use std::sync::Arc;

use uuid::Uuid;

use super::locks::ProjectLocks;
use crate::data::schema::{ColumnMap, ProjectField};
use crate::data::{CellAddress, SheetStore};
use crate::error::LedgerError;
use shared::models::LedgerUpdate;
use shared::spanish_format;

pub struct LedgerUpdater {
    store: Arc<dyn SheetStore>,
    locks: ProjectLocks,
}

impl LedgerUpdater {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        LedgerUpdater { store, locks: ProjectLocks::new() }
    }

    /// Adds `amount_to_add` to the project's committed total and writes the
    /// new total back as a number.
    ///
    /// Parameters are checked before the store is touched; a zero amount is
    /// treated as missing. The single-cell write is the last step, so any
    /// earlier failure leaves the sheet unchanged. A failed write is reported
    /// as-is and never retried.
    pub async fn update_observations(&self, project_id: &str, amount_to_add: f64) -> Result<LedgerUpdate, LedgerError> {
        let project_id = project_id.trim();
        validate(project_id, amount_to_add)?;

        let _guard = self.locks.acquire(project_id).await;
        let entry_id = Uuid::new_v4().to_string();
        tracing::info!(entry_id = %entry_id, project_id = %project_id, amount_to_add, "Updating observations");

        let grid = self.store.fetch_grid().await?;
        if grid.is_empty() {
            return Err(LedgerError::NotFound("No data found in the spreadsheet".to_string()));
        }

        let columns = ColumnMap::resolve(grid.headers(), &[ProjectField::ProjectId, ProjectField::Observations])?;
        let id_col = columns.required(ProjectField::ProjectId)?;
        let obs_col = columns.required(ProjectField::Observations)?;

        let data_index = grid
            .data_rows()
            .iter()
            .position(|row| row.get(id_col).map(|c| c.trim()) == Some(project_id))
            .ok_or_else(|| LedgerError::NotFound(format!("Project not found: {}", project_id)))?;
        let row = &grid.data_rows()[data_index];

        let previous_value = spanish_format::parse_amount_opt(row.get(obs_col).map(String::as_str));
        let new_value = previous_value + amount_to_add;
        if !new_value.is_finite() {
            return Err(LedgerError::Validation(format!(
                "amount_to_add {} would take the total of project {} out of range",
                amount_to_add, project_id
            )));
        }

        let authorized_value = columns
            .index(ProjectField::AuthorizedValue)
            .map(|col| spanish_format::parse_amount_opt(row.get(col).map(String::as_str)));
        let exceeds_authorized = authorized_value.map_or(false, |authorized| new_value > authorized);

        let address = CellAddress::for_data_row(&grid.sheet_name, data_index, obs_col);
        tracing::debug!(
            entry_id = %entry_id,
            cell = %address,
            previous_value,
            new_value,
            "Writing new observations total"
        );
        self.store.write_number(&address, new_value).await?;

        if exceeds_authorized {
            tracing::warn!(
                entry_id = %entry_id,
                project_id = %project_id,
                new_value,
                authorized_value = ?authorized_value,
                "Committed value now exceeds the authorized value"
            );
        }
        tracing::info!(entry_id = %entry_id, project_id = %project_id, cell = %address, previous_value, new_value, "Observations updated");

        Ok(LedgerUpdate {
            entry_id,
            project_id: project_id.to_string(),
            previous_value,
            new_value,
            cell_address: address.to_string(),
            authorized_value,
            exceeds_authorized,
        })
    }
}

fn validate(project_id: &str, amount_to_add: f64) -> Result<(), LedgerError> {
    let mut missing = Vec::new();
    if project_id.is_empty() {
        missing.push("project_id");
    }
    if amount_to_add == 0.0 {
        missing.push("amount_to_add");
    }
    if !missing.is_empty() {
        return Err(LedgerError::Validation(format!("{} required", missing.join(" and "))));
    }
    if !amount_to_add.is_finite() {
        return Err(LedgerError::Validation(format!(
            "amount_to_add must be a finite number, got {}",
            amount_to_add
        )));
    }
    Ok(())
}
