// Access to the spreadsheet that holds the project budget lines.
pub mod auth;
pub mod csv_store;
pub mod google_sheets;
pub mod schema;
pub mod sheet;
pub mod store;

use std::sync::Arc;

use crate::config::StoreSettings;
use crate::error::LedgerError;

pub use csv_store::CsvSheetStore;
pub use google_sheets::GoogleSheetsStore;
pub use sheet::{CellAddress, SheetGrid};
pub use store::{InMemorySheetStore, SheetStore};

/// Builds the configured store back end.
pub fn build_store(settings: &StoreSettings) -> Result<Arc<dyn SheetStore>, LedgerError> {
    let store: Arc<dyn SheetStore> = match settings {
        StoreSettings::GoogleSheets(sheets) => Arc::new(GoogleSheetsStore::new(sheets.clone())?),
        StoreSettings::Csv(csv) => Arc::new(CsvSheetStore::new(csv)?),
    };
    tracing::info!(store = store.name(), "Sheet store initialized");
    Ok(store)
}
