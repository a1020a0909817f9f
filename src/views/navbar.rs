use crate::host::{ Element, Page };
use crate::routes::Routes;

pub const NAV_ITEM: &str = ".nav-item";
pub const NAV_ITEM_CLASS: &str = "nav-item";
pub const ACTIVE_CLASS: &str = "active";

#[derive(Clone)]
pub struct NavHighlighter<P: Page> {
    page: P,
    home: String,
    index: String,
}

impl<P: Page> NavHighlighter<P> {
    pub fn new(page: P, home: impl Into<String>, index: impl Into<String>) -> Self {
        Self { page, home: home.into(), index: index.into() }
    }

    /// Marks the navigation entry for the current location. Returns its
    /// position, or `None` when no entry targets this page.
    pub fn update(&self) -> Option<usize> {
        let routes = Routes { home: &self.home, index: &self.index };
        let pathname = self.page.pathname();
        let current = routes.current_page(&pathname);

        let items = self.page.find_all(NAV_ITEM);
        for item in &items {
            item.remove_class(ACTIVE_CLASS);
        }

        let active = items.iter().position(|item| {
            item.attribute("href").is_some_and(|href| routes.targets(&href, current))
        });

        match active {
            Some(idx) => {
                items[idx].add_class(ACTIVE_CLASS);
                log::debug!("Navigation entry {} is active for {}", idx, current);
            }
            None => log::debug!("No navigation entry targets {}", current),
        }
        active
    }
}
