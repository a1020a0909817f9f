use crate::configs::ResponsiveConfig;
use crate::host::{ Element, Listener, Page };
use crate::utils::debounce;

pub const NAV_CONTAINER: &str = ".nav-container";

/// `max-width` for the navigation container at a given viewport width.
pub fn nav_max_width(viewport_width: f64, config: &ResponsiveConfig) -> String {
    if viewport_width < config.breakpoint_px {
        format!("{}px", viewport_width - config.gutter_px)
    } else {
        format!("{}px", config.max_width_px)
    }
}

pub fn fit_nav_container<P: Page>(page: &P, config: &ResponsiveConfig) {
    if let Some(container) = page.find(NAV_CONTAINER) {
        let width = nav_max_width(page.viewport_width(), config);
        log::debug!("Navigation container max-width set to {}", width);
        container.set_style("max-width", &width);
    }
}

pub fn init_responsive_handling<P: Page>(page: &P, config: &ResponsiveConfig) -> Listener {
    let host = page.clone();
    let config = config.clone();
    let wait_ms = config.debounce_ms;
    let handle_resize = debounce(page.clone(), wait_ms, move |()| fit_nav_container(&host, &config));

    page.on_resize(Box::new(move || handle_resize.call(())))
}
