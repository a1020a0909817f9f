use crate::host::{ DefaultAction, Element, KeyInput, Listener, Page };
use crate::storage::Storage;
use crate::views::navbar::{ NAV_ITEM, NAV_ITEM_CLASS };
use crate::views::theme::ThemeController;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Move focus to the navigation entry at this position.
    FocusNav(usize),
    ToggleTheme,
    Ignore,
}

impl KeyAction {
    pub fn default_action(self) -> DefaultAction {
        match self {
            KeyAction::Ignore => DefaultAction::Allow,
            _ => DefaultAction::Prevent,
        }
    }
}

/// Arrow keys walk the navigation while one of its entries has focus;
/// Ctrl/Cmd+T flips the theme from anywhere.
pub fn route_key(input: &KeyInput, focused_nav: Option<usize>, nav_len: usize) -> KeyAction {
    if let Some(idx) = focused_nav {
        match input.key.as_str() {
            "ArrowLeft" if idx > 0 => return KeyAction::FocusNav(idx - 1),
            "ArrowRight" if idx + 1 < nav_len => return KeyAction::FocusNav(idx + 1),
            _ => {}
        }
    }

    if (input.ctrl || input.meta) && input.key.eq_ignore_ascii_case("t") {
        return KeyAction::ToggleTheme;
    }

    KeyAction::Ignore
}

pub fn init_keyboard_navigation<P: Page, S: Storage>(page: &P, theme: ThemeController<P, S>) -> Listener {
    let host = page.clone();
    page.on_key_down(
        Box::new(move |input: &KeyInput| {
            let items = host.find_all(NAV_ITEM);
            let focused = host
                .active_element()
                .filter(|el| el.has_class(NAV_ITEM_CLASS))
                .and_then(|el| items.iter().position(|item| *item == el));

            let action = route_key(input, focused, items.len());
            match action {
                KeyAction::FocusNav(idx) => items[idx].focus(),
                KeyAction::ToggleTheme => {
                    theme.toggle();
                }
                KeyAction::Ignore => {}
            }
            action.default_action()
        })
    )
}
