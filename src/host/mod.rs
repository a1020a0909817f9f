//! The seam between the effects and whatever is hosting them.
//!
//! Components only talk to the page through [`Page`] and [`Element`], so the
//! same wiring runs against the browser ([`web`]) and against the in-memory
//! page the tests drive.

pub mod web;

use std::fmt::{ Debug, Formatter };

/// Handle of a scheduled callback, as returned by [`Scheduler::set_timeout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub i32);

pub trait Scheduler: Clone + 'static {
    /// Runs `callback` after `delay_ms`; `None` when the host refused the timer.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Option<TimerId>;
    fn clear_timeout(&self, id: TimerId);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub fn parse(state: &str) -> Self {
        match state {
            "loading" => ReadyState::Loading,
            "interactive" => ReadyState::Interactive,
            _ => ReadyState::Complete,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hover {
    Enter,
    Leave,
}

impl Hover {
    pub fn event_name(self) -> &'static str {
        match self {
            Hover::Enter => "mouseenter",
            Hover::Leave => "mouseleave",
        }
    }
}

/// What the host should do with the browser's default action for a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultAction {
    Allow,
    Prevent,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Self::default() }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

#[derive(Clone, Debug)]
pub struct Intersection<E> {
    pub target: E,
    pub is_intersecting: bool,
}

pub type KeyHandler = Box<dyn FnMut(&KeyInput) -> DefaultAction>;
pub type IntersectionHandler<E> = Box<dyn FnMut(Vec<Intersection<E>>)>;

/// Disposer for a registered handler. Dropping it unregisters the handler.
#[must_use = "dropping a Listener unregisters its handler"]
pub struct Listener {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Listener {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self { dispose: Some(Box::new(dispose)) }
    }

    /// A listener with nothing to undo, for registrations the host skipped.
    pub fn inert() -> Self {
        Self { dispose: None }
    }

    pub fn dispose(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.run();
    }
}

impl Debug for Listener {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener").field("armed", &self.dispose.is_some()).finish()
    }
}

pub trait Element: Clone + PartialEq + 'static {
    fn has_class(&self, name: &str) -> bool;
    fn add_class(&self, name: &str);
    fn remove_class(&self, name: &str);
    fn attribute(&self, name: &str) -> Option<String>;
    fn text(&self) -> Option<String>;
    /// Inline style value, `None` when the property is not set.
    fn style(&self, property: &str) -> Option<String>;
    fn set_style(&self, property: &str, value: &str);
    fn set_inner_html(&self, html: &str);
    fn find(&self, selector: &str) -> Option<Self>;
    fn find_all(&self, selector: &str) -> Vec<Self>;
    fn focus(&self);
}

pub trait Page: Scheduler {
    type Element: Element;

    fn ready_state(&self) -> ReadyState;
    fn body(&self) -> Option<Self::Element>;
    fn find(&self, selector: &str) -> Option<Self::Element>;
    fn find_all(&self, selector: &str) -> Vec<Self::Element>;
    fn active_element(&self) -> Option<Self::Element>;
    fn pathname(&self) -> String;
    fn viewport_width(&self) -> f64;
    /// Appends a `<style>` block to the document head.
    fn inject_style(&self, css: &str);

    fn on_ready(&self, handler: Box<dyn FnOnce()>) -> Listener;
    fn on_load(&self, handler: Box<dyn FnOnce()>) -> Listener;
    fn on_resize(&self, handler: Box<dyn FnMut()>) -> Listener;
    fn on_key_down(&self, handler: KeyHandler) -> Listener;
    fn on_hover(&self, element: &Self::Element, phase: Hover, handler: Box<dyn FnMut()>) -> Listener;
    fn observe_intersections(
        &self,
        options: &ObserverOptions,
        targets: &[Self::Element],
        handler: IntersectionHandler<Self::Element>,
    ) -> Listener;
}
