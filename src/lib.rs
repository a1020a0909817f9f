mod bootstrap;
mod configs;
mod error;
pub mod host;
mod routes;
mod storage;
mod utils;
pub mod views;


pub use crate::bootstrap::{ App, FOCUS_STYLES, LOADED_CLASS, LOADING_CLASS, LOADING_STYLES };
pub use crate::configs::{ Config, ResponsiveConfig, RevealConfig };
pub use crate::error::{ ConfigError, StorageError };
pub use crate::routes::Routes;
pub use crate::storage::{ LocalStorage, PreferenceStore, Storage, THEME_KEY };
pub use crate::utils::*;
