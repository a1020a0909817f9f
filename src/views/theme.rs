use crate::host::{ Element, Page };
use crate::storage::{ PreferenceStore, Storage };
use crate::utils::{ Theme, ThemeState };

pub const LIGHT_THEME_CLASS: &str = "light-theme";
pub const THEME_TOGGLE: &str = ".theme-toggle";

pub const SUN_ICON: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="5"/><line x1="12" y1="1" x2="12" y2="3"/><line x1="12" y1="21" x2="12" y2="23"/><line x1="4.22" y1="4.22" x2="5.64" y2="5.64"/><line x1="18.36" y1="18.36" x2="19.78" y2="19.78"/><line x1="1" y1="12" x2="3" y2="12"/><line x1="21" y1="12" x2="23" y2="12"/><line x1="4.22" y1="19.78" x2="5.64" y2="18.36"/><line x1="18.36" y1="5.64" x2="19.78" y2="4.22"/></svg>"#;
pub const MOON_ICON: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z"></path></svg>"#;

pub fn icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => SUN_ICON,
        Theme::Dark => MOON_ICON,
    }
}

/// Owns the light/dark switch: the body class, the stored preference and the
/// toggle button icon all follow [`ThemeState`].
#[derive(Clone)]
pub struct ThemeController<P: Page, S: Storage> {
    page: P,
    store: PreferenceStore<S>,
    state: ThemeState,
}

impl<P: Page, S: Storage> ThemeController<P, S> {
    pub fn new(page: P, store: PreferenceStore<S>, state: ThemeState) -> Self {
        Self { page, store, state }
    }

    pub fn current(&self) -> Theme {
        self.state.get()
    }

    /// Applies the stored theme. Has to run before the first paint to avoid a flash.
    pub fn initialize(&self) -> Theme {
        let theme = self.store.load().unwrap_or_default();
        self.state.set(theme);
        self.apply(theme);
        self.render_icon();
        log::debug!("Theme initialized as {}", theme);
        theme
    }

    pub fn toggle(&self) -> Theme {
        let theme = self.state.get().toggled();
        self.state.set(theme);
        self.apply(theme);

        if let Err(e) = self.store.save(theme) {
            log::warn!("Theme preference not saved: {}", e);
        }

        self.render_icon();
        log::info!("Switched to {} theme", theme);
        theme
    }

    pub fn render_icon(&self) {
        if let Some(toggle) = self.page.find(THEME_TOGGLE) {
            toggle.set_inner_html(icon(self.state.get()));
        }
    }

    fn apply(&self, theme: Theme) {
        let Some(body) = self.page.body() else {
            return;
        };
        if theme.is_light() {
            body.add_class(LIGHT_THEME_CLASS);
        } else {
            body.remove_class(LIGHT_THEME_CLASS);
        }
    }
}
