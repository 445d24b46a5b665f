pub mod models;
pub mod utils;

pub use utils::spanish_format;
