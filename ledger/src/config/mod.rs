pub mod settings;

pub use settings::{Environment, LedgerSettings, StoreSettings};
