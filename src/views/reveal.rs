use crate::configs::RevealConfig;
use crate::host::{ Element, Intersection, Listener, Page };

/// Everything that fades in the first time it scrolls into view.
pub const REVEALED: &str = ".tech-card, .project-card, .blog-post, .experience-item, .education-item";

/// Hides every revealable element and starts observing it.
///
/// Elements stay observed after they are shown; a repeat intersection writes
/// the values that are already there.
pub fn init_scroll_animations<P: Page>(page: &P, config: &RevealConfig) -> Listener {
    let targets = page.find_all(REVEALED);
    if targets.is_empty() {
        return Listener::inert();
    }

    let hidden = format!("translateY({}px)", config.offset_px);
    let transition = format!(
        "opacity {d}s ease, transform {d}s ease",
        d = config.duration_s
    );
    for el in &targets {
        el.set_style("opacity", "0");
        el.set_style("transform", &hidden);
        el.set_style("transition", &transition);
    }

    log::debug!("Observing {} elements for scroll reveal", targets.len());
    page.observe_intersections(
        &config.observer_options(),
        &targets,
        Box::new(|entries: Vec<Intersection<P::Element>>| {
            for entry in entries.into_iter().filter(|entry| entry.is_intersecting) {
                entry.target.set_style("opacity", "1");
                entry.target.set_style("transform", "translateY(0)");
            }
        })
    )
}
