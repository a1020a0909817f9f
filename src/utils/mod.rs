mod debounce;
mod theme_state;

pub use debounce::{ debounce, Debounced };
pub use theme_state::{ Theme, ThemeState, UnknownTheme };
