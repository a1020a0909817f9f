use std::cell::{ Cell, RefCell };
use std::rc::Rc;

use crate::configs::Config;
use crate::host::{ Element, Listener, Page, ReadyState };
use crate::storage::{ PreferenceStore, Storage };
use crate::utils::{ Theme, ThemeState };
use crate::views::{
    init_card_effects,
    init_keyboard_navigation,
    init_responsive_handling,
    init_scroll_animations,
    NavHighlighter,
    ThemeController,
};

pub const LOADING_CLASS: &str = "loading";
pub const LOADED_CLASS: &str = "loaded";

pub const LOADING_STYLES: &str = r#"
        .loading * {
            transition: none !important;
        }

        .loaded {
            transition: all 0.3s ease;
        }

        .project-link,
        .read-more {
            transition: transform 0.3s ease, color 0.3s ease;
        }
    "#;

pub const FOCUS_STYLES: &str = r#"
        .nav-item:focus {
            outline: 2px solid #61dafb;
            outline-offset: 2px;
        }

        .theme-toggle:focus {
            outline: 2px solid #61dafb;
            outline-offset: 2px;
        }

        .project-link:focus,
        .read-more:focus {
            outline: 1px solid #61dafb;
            outline-offset: 2px;
        }
    "#;

/// Everything the page effects share, alive for as long as the page is.
///
/// Listeners registered during [`init`](App::init) are held here; dropping the
/// app unregisters all of them.
pub struct App<P: Page, S: Storage> {
    page: P,
    config: Config,
    theme: ThemeController<P, S>,
    nav: NavHighlighter<P>,
    started: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
}

impl<P: Page, S: Storage> App<P, S> {
    pub fn new(page: P, storage: S, config: Config) -> Rc<Self> {
        let theme = ThemeController::new(page.clone(), PreferenceStore::new(storage), ThemeState::default());
        let nav = NavHighlighter::new(page.clone(), config.home_page.clone(), config.index_page.clone());

        Rc::new(Self {
            page,
            config,
            theme,
            nav,
            started: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Runs [`init`](App::init) now, or once the document is parsed if it is
    /// still loading.
    pub fn boot(self: &Rc<Self>) {
        if self.page.ready_state() != ReadyState::Loading {
            self.init();
            return;
        }

        log::debug!("Document still loading, deferring init");
        let app = Rc::downgrade(self);
        let ready = self.page.on_ready(
            Box::new(move || {
                if let Some(app) = app.upgrade() {
                    app.init();
                }
            })
        );
        self.keep(ready);
    }

    pub fn init(&self) {
        if self.started.replace(true) {
            log::debug!("Already initialized");
            return;
        }

        self.theme.initialize();
        self.nav.update();
        self.init_smooth_scrolling();

        let effects = init_card_effects(&self.page);
        self.listeners.borrow_mut().extend(effects);

        self.init_scroll_animations();
        self.keep(init_keyboard_navigation(&self.page, self.theme.clone()));
        self.keep(init_responsive_handling(&self.page, &self.config.responsive));
        self.init_loading_states();

        self.page.inject_style(LOADING_STYLES);
        self.page.inject_style(FOCUS_STYLES);

        log::info!("Portfolio effects ready ({} listeners)", self.listener_count());
    }

    pub fn toggle_theme(&self) -> Theme {
        self.theme.toggle()
    }

    pub fn update_navigation(&self) -> Option<usize> {
        self.nav.update()
    }

    pub fn init_scroll_animations(&self) {
        self.keep(init_scroll_animations(&self.page, &self.config.reveal));
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_started(&self) -> bool {
        self.started.get()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn keep(&self, listener: Listener) {
        self.listeners.borrow_mut().push(listener);
    }

    fn init_smooth_scrolling(&self) {
        if let Some(body) = self.page.body() {
            body.set_style("scroll-behavior", "smooth");
        }
    }

    /// `loading` until shortly after the window load event, then `loaded`.
    fn init_loading_states(&self) {
        let Some(body) = self.page.body() else {
            return;
        };
        body.add_class(LOADING_CLASS);

        let page = self.page.clone();
        let delay_ms = self.config.loaded_delay_ms;
        let mark_loaded = move || {
            let scheduled = page.set_timeout(
                delay_ms,
                Box::new(move || {
                    body.remove_class(LOADING_CLASS);
                    body.add_class(LOADED_CLASS);
                })
            );
            if scheduled.is_none() {
                log::warn!("Could not schedule the loaded state");
            }
        };

        // load has already fired on a complete document
        if self.page.ready_state() == ReadyState::Complete {
            mark_loaded();
        } else {
            self.keep(self.page.on_load(Box::new(mark_loaded)));
        }
    }
}
