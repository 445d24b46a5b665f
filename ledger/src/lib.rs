// Budget ledger library: configuration, spreadsheet access, ledger logic
// and the gRPC service built on top of them.

pub mod budget;
pub mod config;
pub mod data;
pub mod error;
pub mod services;

pub use error::{ErrorKind, LedgerError};
