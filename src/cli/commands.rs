pub mod import_reference;
pub mod initdb;
pub mod serve;

pub use import_reference::import_reference;
pub use initdb::{init_database, run_migrations};
pub use serve::serve;
