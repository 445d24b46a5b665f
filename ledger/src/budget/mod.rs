// Budget ledger logic, independent of the transport and the store back end.
pub mod catalog;
pub mod locks;
pub mod updater;

pub use catalog::ProjectCatalog;
pub use locks::ProjectLocks;
pub use updater::LedgerUpdater;
