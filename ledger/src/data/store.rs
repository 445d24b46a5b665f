// Repository seam between the ledger logic and the spreadsheet acting as
// system of record.
use tokio::sync::RwLock;

use super::sheet::{CellAddress, SheetGrid};
use crate::error::LedgerError;
use shared::spanish_format;

#[tonic::async_trait]
pub trait SheetStore: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &str;

    /// Full current contents of the project sheet, headers included.
    async fn fetch_grid(&self) -> Result<SheetGrid, LedgerError>;

    /// Writes `value` into one cell so the store keeps it as a number,
    /// not as literal text.
    async fn write_number(&self, address: &CellAddress, value: f64) -> Result<(), LedgerError>;
}

/// Grid held in memory. Every write is recorded, which tests use to check
/// that failed updates never touched the store.
pub struct InMemorySheetStore {
    grid: RwLock<SheetGrid>,
    writes: RwLock<Vec<(CellAddress, f64)>>,
}

impl InMemorySheetStore {
    pub fn new(grid: SheetGrid) -> Self {
        InMemorySheetStore { grid: RwLock::new(grid), writes: RwLock::new(Vec::new()) }
    }

    /// Builds a grid from string literals, first row being the headers.
    pub fn from_rows(sheet_name: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        Self::new(SheetGrid::new(sheet_name, rows))
    }

    pub async fn writes(&self) -> Vec<(CellAddress, f64)> {
        self.writes.read().await.clone()
    }

    pub async fn snapshot(&self) -> SheetGrid {
        self.grid.read().await.clone()
    }
}

#[tonic::async_trait]
impl SheetStore for InMemorySheetStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_grid(&self) -> Result<SheetGrid, LedgerError> {
        Ok(self.grid.read().await.clone())
    }

    async fn write_number(&self, address: &CellAddress, value: f64) -> Result<(), LedgerError> {
        let mut grid = self.grid.write().await;
        grid.set_cell(address, spanish_format::format_number(value));
        self.writes.write().await.push((address.clone(), value));
        Ok(())
    }
}
