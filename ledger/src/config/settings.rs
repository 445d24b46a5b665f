// Ledger settings: defaults, then an optional JSON file, then environment.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::LedgerError;

pub const ENV_SERVICE_ACCOUNT_EMAIL: &str = "GOOGLE_SERVICE_ACCOUNT_EMAIL";
pub const ENV_SERVICE_ACCOUNT_PRIVATE_KEY: &str = "GOOGLE_SERVICE_ACCOUNT_PRIVATE_KEY";
pub const ENV_SPREADSHEET_ID: &str = "LEDGER_SPREADSHEET_ID";
pub const ENV_SHEET_NAME: &str = "LEDGER_SHEET_NAME";
pub const ENV_ENVIRONMENT: &str = "LEDGER_ENV";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn exposes_error_details(self) -> bool {
        self == Environment::Development
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LedgerSettings {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub store: StoreSettings,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        LedgerSettings {
            host: "127.0.0.1".to_string(),
            port: 50051,
            environment: Environment::default(),
            store: StoreSettings::GoogleSheets(GoogleSheetsSettings::default()),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreSettings {
    GoogleSheets(GoogleSheetsSettings),
    Csv(CsvStoreSettings),
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GoogleSheetsSettings {
    pub spreadsheet_id: String,
    /// Sheet to read. The first sheet of the spreadsheet when unset.
    pub sheet_name: Option<String>,
    pub api_base_url: String,
    pub token_url: String,
    pub service_account_email: Option<String>,
    pub service_account_private_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for GoogleSheetsSettings {
    fn default() -> Self {
        GoogleSheetsSettings {
            spreadsheet_id: String::new(),
            sheet_name: None,
            api_base_url: "https://sheets.googleapis.com/v4/".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            service_account_email: None,
            service_account_private_key: None,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CsvStoreSettings {
    pub path: PathBuf,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_csv_sheet_name")]
    pub sheet_name: String,
}

fn default_delimiter() -> char {
    ','
}

fn default_csv_sheet_name() -> String {
    "Sheet1".to_string()
}

impl LedgerSettings {
    /// Loads settings from `path` (if any) and applies process environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, LedgerError> {
        let mut settings = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)?;
                serde_json::from_str::<LedgerSettings>(&raw)?
            }
            None => LedgerSettings::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Applies overrides from `lookup`. Empty values count as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), LedgerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(env) = get(ENV_ENVIRONMENT) {
            self.environment = match env.trim().to_lowercase().as_str() {
                "development" | "dev" => Environment::Development,
                "production" | "prod" => Environment::Production,
                other => {
                    return Err(LedgerError::ConfigError(format!(
                        "{} must be 'development' or 'production', got '{}'",
                        ENV_ENVIRONMENT, other
                    )))
                }
            };
        }

        if let StoreSettings::GoogleSheets(sheets) = &mut self.store {
            if let Some(email) = get(ENV_SERVICE_ACCOUNT_EMAIL) {
                sheets.service_account_email = Some(email);
            }
            if let Some(key) = get(ENV_SERVICE_ACCOUNT_PRIVATE_KEY) {
                sheets.service_account_private_key = Some(key);
            }
            if let Some(id) = get(ENV_SPREADSHEET_ID) {
                sheets.spreadsheet_id = id;
            }
            if let Some(name) = get(ENV_SHEET_NAME) {
                sheets.sheet_name = Some(name);
            }
        }
        Ok(())
    }
}
