mod config;
mod storage;

pub use config::ConfigError;
pub use storage::StorageError;
pub(crate) use storage::describe;
