pub mod effects;
pub mod keyboard;
pub mod navbar;
pub mod responsive;
pub mod reveal;
pub mod theme;

pub use effects::{ bind_all as init_card_effects, HoverEffect, HoverTarget };
pub use keyboard::{ init_keyboard_navigation, route_key, KeyAction };
pub use navbar::NavHighlighter;
pub use responsive::{ init_responsive_handling, nav_max_width };
pub use reveal::init_scroll_animations;
pub use theme::ThemeController;
