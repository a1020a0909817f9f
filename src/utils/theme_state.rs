use std::cell::Cell;
use std::fmt::{ Display, Formatter };
use std::rc::Rc;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_light(self) -> bool {
        self == Theme::Light
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// The one piece of state shared between components. Cloning shares the flag.
#[derive(Clone, Debug, Default)]
pub struct ThemeState {
    current: Rc<Cell<Theme>>,
}

impl ThemeState {
    pub fn new(theme: Theme) -> Self {
        Self { current: Rc::new(Cell::new(theme)) }
    }

    pub fn get(&self) -> Theme {
        self.current.get()
    }

    pub fn set(&self, theme: Theme) {
        self.current.set(theme);
    }

    pub fn is_dark(&self) -> bool {
        !self.get().is_light()
    }
}
