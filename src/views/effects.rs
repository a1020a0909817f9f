use crate::host::{ Element, Hover, Listener, Page };

/// Which element a card's hover transform lands on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoverTarget {
    Card,
    /// Every descendant matching the selector.
    Each(&'static str),
    /// The first descendant matching the selector, if there is one.
    First(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverEffect {
    pub cards: &'static str,
    pub target: HoverTarget,
    pub enter: &'static str,
    pub leave: &'static str,
}

pub const TECH_CARD_EFFECT: HoverEffect = HoverEffect {
    cards: ".tech-card",
    target: HoverTarget::Card,
    enter: "translateY(-10px) scale(1.05)",
    leave: "translateY(0) scale(1)",
};

pub const PROJECT_CARD_EFFECT: HoverEffect = HoverEffect {
    cards: ".project-card",
    target: HoverTarget::Each(".project-link"),
    enter: "translateX(5px)",
    leave: "translateX(0)",
};

pub const BLOG_POST_EFFECT: HoverEffect = HoverEffect {
    cards: ".blog-post",
    target: HoverTarget::First(".read-more"),
    enter: "translateX(5px)",
    leave: "translateX(0)",
};

pub const HOVER_EFFECTS: [HoverEffect; 3] = [TECH_CARD_EFFECT, PROJECT_CARD_EFFECT, BLOG_POST_EFFECT];

impl HoverEffect {
    fn apply<E: Element>(&self, card: &E, transform: &str) {
        match self.target {
            HoverTarget::Card => card.set_style("transform", transform),
            HoverTarget::Each(selector) => {
                for el in card.find_all(selector) {
                    el.set_style("transform", transform);
                }
            }
            HoverTarget::First(selector) => {
                if let Some(el) = card.find(selector) {
                    el.set_style("transform", transform);
                }
            }
        }
    }

    /// Binds enter and leave handlers on every matching card.
    pub fn bind<P: Page>(self, page: &P) -> Vec<Listener> {
        let cards = page.find_all(self.cards);
        let mut listeners = Vec::with_capacity(cards.len() * 2);

        for card in cards {
            for phase in [Hover::Enter, Hover::Leave] {
                let transform = match phase {
                    Hover::Enter => self.enter,
                    Hover::Leave => self.leave,
                };
                let target = card.clone();
                listeners.push(
                    page.on_hover(&card, phase, Box::new(move || self.apply(&target, transform)))
                );
            }
        }

        log::debug!("Bound {} hover handlers for {}", listeners.len(), self.cards);
        listeners
    }
}

pub fn bind_all<P: Page>(page: &P) -> Vec<Listener> {
    HOVER_EFFECTS.iter().flat_map(|effect| effect.bind(page)).collect()
}
