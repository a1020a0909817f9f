mod local;

pub use local::LocalStorage;

use crate::error::StorageError;
use crate::utils::Theme;

/// The only key this crate ever writes.
pub const THEME_KEY: &str = "theme";

/// A string key-value store that may refuse to work at all.
pub trait Storage: Clone + 'static {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Clone, Debug)]
pub struct PreferenceStore<S: Storage> {
    storage: S,
}

impl<S: Storage> PreferenceStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn save(&self, theme: Theme) -> Result<(), StorageError> {
        self.storage.set_item(THEME_KEY, theme.as_str())
    }

    /// Stored theme; a value that is neither `light` nor `dark` counts as absent.
    pub fn try_load(&self) -> Result<Option<Theme>, StorageError> {
        let stored = self.storage.get_item(THEME_KEY)?;
        Ok(stored.and_then(|value| match value.parse::<Theme>() {
            Ok(theme) => Some(theme),
            Err(unknown) => {
                log::debug!("Ignoring stored theme {:?}", unknown.0);
                None
            }
        }))
    }

    pub fn load(&self) -> Option<Theme> {
        match self.try_load() {
            Ok(theme) => theme,
            Err(e) => {
                log::warn!("Theme preference not readable, using default theme: {}", e);
                None
            }
        }
    }
}
