// Sheet store backed by a CSV export of the budget spreadsheet.
use std::path::PathBuf;

use csv::{ReaderBuilder, WriterBuilder};
use tokio::sync::Mutex;

use super::sheet::{CellAddress, SheetGrid};
use super::store::SheetStore;
use crate::config::settings::CsvStoreSettings;
use crate::error::LedgerError;
use shared::spanish_format;

pub struct CsvSheetStore {
    path: PathBuf,
    delimiter: u8,
    sheet_name: String,
    // Serializes rewrites of the file.
    file_lock: Mutex<()>,
}

impl CsvSheetStore {
    pub fn new(settings: &CsvStoreSettings) -> Result<Self, LedgerError> {
        if !settings.delimiter.is_ascii() {
            return Err(LedgerError::ConfigError(format!(
                "CSV delimiter must be a single ASCII character, got '{}'",
                settings.delimiter
            )));
        }
        Ok(CsvSheetStore {
            path: settings.path.clone(),
            delimiter: settings.delimiter as u8,
            sheet_name: settings.sheet_name.clone(),
            file_lock: Mutex::new(()),
        })
    }

    fn read_grid(&self) -> Result<SheetGrid, LedgerError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false) // header row is kept as row 1 of the grid
            .flexible(true)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| {
                LedgerError::AnyhowError(anyhow::anyhow!(
                    "Error reading CSV record at line {} of '{}': {}",
                    idx + 1,
                    self.path.display(),
                    e
                ))
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(SheetGrid::new(self.sheet_name.clone(), rows))
    }

    fn write_grid(&self, grid: &SheetGrid) -> Result<(), LedgerError> {
        let tmp_path = self.path.with_extension("csv.tmp");
        {
            let mut wtr = WriterBuilder::new()
                .delimiter(self.delimiter)
                .flexible(true)
                .from_path(&tmp_path)?;
            for row in &grid.rows {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[tonic::async_trait]
impl SheetStore for CsvSheetStore {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch_grid(&self) -> Result<SheetGrid, LedgerError> {
        let _guard = self.file_lock.lock().await;
        self.read_grid()
    }

    async fn write_number(&self, address: &CellAddress, value: f64) -> Result<(), LedgerError> {
        let _guard = self.file_lock.lock().await;
        let mut grid = self.read_grid()?;
        grid.set_cell(address, spanish_format::format_number(value));
        self.write_grid(&grid)?;
        tracing::debug!(path = %self.path.display(), cell = %address, value, "Rewrote CSV store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    fn store_for(file: &NamedTempFile, delimiter: char) -> CsvSheetStore {
        CsvSheetStore::new(&CsvStoreSettings {
            path: file.path().to_path_buf(),
            delimiter,
            sheet_name: "Hoja1".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_grid_keeps_header_row() {
        let file = create_test_csv(
            "\
codigo_bpin_proyecto;valor;observaciones
2024001;25.000.000;1.000
2024002;3.500,50",
        );
        let store = store_for(&file, ';');
        let grid = store.fetch_grid().await.unwrap();

        assert_eq!(grid.sheet_name, "Hoja1");
        assert_eq!(grid.headers()[2], "observaciones");
        assert_eq!(grid.data_rows().len(), 2);
        assert_eq!(grid.cell(0, 2), Some("1.000"));
        // Short rows survive thanks to the flexible reader.
        assert_eq!(grid.cell(1, 2), None);
    }

    #[tokio::test]
    async fn test_write_number_persists_to_file() {
        let file = create_test_csv(
            "\
codigo_bpin_proyecto,valor,observaciones
2024001,\"25.000.000\",\"1.000\"",
        );
        let store = store_for(&file, ',');
        let addr = CellAddress::for_data_row("Hoja1", 0, 2);
        store.write_number(&addr, 1500.0).await.unwrap();

        let reloaded = store_for(&file, ',').fetch_grid().await.unwrap();
        assert_eq!(reloaded.cell(0, 2), Some("1500"));
        assert_eq!(reloaded.cell(0, 1), Some("25.000.000"));
    }

    #[tokio::test]
    async fn test_fractional_write_reads_back_unchanged() {
        let file = create_test_csv(
            "\
codigo_bpin_proyecto;valor;observaciones
2024001;25.000.000;1.000",
        );
        let store = store_for(&file, ';');
        let addr = CellAddress::for_data_row("Hoja1", 0, 2);
        store.write_number(&addr, 1500.125).await.unwrap();

        let reloaded = store_for(&file, ';').fetch_grid().await.unwrap();
        assert_eq!(reloaded.cell(0, 2), Some("1500,125"));
        assert_eq!(spanish_format::parse_amount_opt(reloaded.cell(0, 2)), 1500.125);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_infrastructure_error() {
        let store = CsvSheetStore::new(&CsvStoreSettings {
            path: PathBuf::from("/nonexistent/presupuesto.csv"),
            delimiter: ',',
            sheet_name: "Sheet1".to_string(),
        })
        .unwrap();
        let err = store.fetch_grid().await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Infrastructure);
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let result = CsvSheetStore::new(&CsvStoreSettings {
            path: PathBuf::from("x.csv"),
            delimiter: '¦',
            sheet_name: "Sheet1".to_string(),
        });
        assert!(result.is_err());
    }
}
