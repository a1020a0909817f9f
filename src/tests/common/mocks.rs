use std::cell::{ Cell, RefCell };
use std::collections::HashMap;
use std::fmt::{ Debug, Formatter };
use std::rc::{ Rc, Weak };

use crate::error::StorageError;
use crate::host::{
    DefaultAction,
    Element,
    Hover,
    Intersection,
    IntersectionHandler,
    KeyHandler,
    KeyInput,
    Listener,
    ObserverOptions,
    Page,
    ReadyState,
    Scheduler,
    TimerId,
};
use crate::storage::Storage;

/// Key-value store kept in memory; can be switched off to behave like a
/// sandboxed `localStorage`.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    disabled: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
}

#[allow(dead_code)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.items.borrow_mut().insert(key.to_string(), value.to_string());
        storage
    }

    pub fn disabled() -> Self {
        let storage = Self::new();
        storage.set_disabled(true);
        storage
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.items.borrow().keys().cloned().collect()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.disabled.get() {
            Err(StorageError::Unavailable("SecurityError: access denied".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.get(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.writes.set(self.writes.get() + 1);
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

type HoverEntry = (u64, Hover, Box<dyn FnMut()>);

pub struct Node {
    page: Weak<PageState>,
    classes: RefCell<Vec<String>>,
    attributes: RefCell<HashMap<String, String>>,
    styles: RefCell<HashMap<String, String>>,
    inner_html: RefCell<String>,
    text: RefCell<Option<String>>,
    children: RefCell<Vec<FakeElement>>,
    hover: RefCell<Vec<HoverEntry>>,
}

/// An element of the in-memory page. Clones are the same element.
#[derive(Clone)]
pub struct FakeElement(Rc<Node>);

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for FakeElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeElement")
            .field("classes", &self.0.classes.borrow())
            .field("attributes", &self.0.attributes.borrow())
            .finish()
    }
}

#[allow(dead_code)]
impl FakeElement {
    fn new(page: Weak<PageState>, classes: &str) -> Self {
        FakeElement(
            Rc::new(Node {
                page,
                classes: RefCell::new(classes.split_whitespace().map(str::to_string).collect()),
                attributes: RefCell::new(HashMap::new()),
                styles: RefCell::new(HashMap::new()),
                inner_html: RefCell::new(String::new()),
                text: RefCell::new(None),
                children: RefCell::new(Vec::new()),
                hover: RefCell::new(Vec::new()),
            })
        )
    }

    pub fn append(&self, child: &FakeElement) -> &Self {
        self.0.children.borrow_mut().push(child.clone());
        self
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.0.attributes.borrow_mut().insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        *self.0.text.borrow_mut() = Some(text.to_string());
        self
    }

    pub fn inner_html(&self) -> String {
        self.0.inner_html.borrow().clone()
    }

    pub fn hover_listeners(&self) -> usize {
        self.0.hover.borrow().len()
    }

    fn matches_one(&self, selector: &str) -> bool {
        if let Some(class) = selector.strip_prefix('.') {
            self.has_class(class)
        } else if let Some(id) = selector.strip_prefix('#') {
            self.attribute("id").as_deref() == Some(id)
        } else {
            false
        }
    }

    fn matches(&self, selector: &str) -> bool {
        selector.split(',').map(str::trim).any(|one| self.matches_one(one))
    }

    fn collect(&self, selector: &str, out: &mut Vec<FakeElement>) {
        for child in self.0.children.borrow().iter() {
            if child.matches(selector) {
                out.push(child.clone());
            }
            child.collect(selector, out);
        }
    }

    fn fire_hover(&self, phase: Hover) -> usize {
        let mut hover = self.0.hover.borrow_mut();
        let mut fired = 0;
        for (_, registered, handler) in hover.iter_mut() {
            if *registered == phase {
                handler();
                fired += 1;
            }
        }
        fired
    }
}

impl Element for FakeElement {
    fn has_class(&self, name: &str) -> bool {
        self.0.classes.borrow().iter().any(|class| class == name)
    }

    fn add_class(&self, name: &str) {
        if !self.has_class(name) {
            self.0.classes.borrow_mut().push(name.to_string());
        }
    }

    fn remove_class(&self, name: &str) {
        self.0.classes.borrow_mut().retain(|class| class != name);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.attributes.borrow().get(name).cloned()
    }

    fn text(&self) -> Option<String> {
        self.0.text.borrow().clone()
    }

    fn style(&self, property: &str) -> Option<String> {
        self.0.styles.borrow().get(property).cloned()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0.styles.borrow_mut().insert(property.to_string(), value.to_string());
    }

    fn set_inner_html(&self, html: &str) {
        *self.0.inner_html.borrow_mut() = html.to_string();
    }

    fn find(&self, selector: &str) -> Option<Self> {
        self.find_all(selector).into_iter().next()
    }

    fn find_all(&self, selector: &str) -> Vec<Self> {
        let mut found = Vec::new();
        self.collect(selector, &mut found);
        found
    }

    fn focus(&self) {
        if let Some(page) = self.0.page.upgrade() {
            *page.focused.borrow_mut() = Some(self.clone());
        }
    }
}

struct Timer {
    id: i32,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

struct Observer {
    id: u64,
    options: ObserverOptions,
    targets: Vec<FakeElement>,
    handler: IntersectionHandler<FakeElement>,
}

pub struct PageState {
    body: FakeElement,
    head: RefCell<Vec<String>>,
    pathname: RefCell<String>,
    width: Cell<f64>,
    ready: Cell<ReadyState>,
    focused: RefCell<Option<FakeElement>>,
    now: Cell<u64>,
    next_id: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    refuse_timers: Cell<bool>,
    ready_handlers: RefCell<Vec<(u64, Box<dyn FnOnce()>)>>,
    load_handlers: RefCell<Vec<(u64, Box<dyn FnOnce()>)>>,
    resize_handlers: RefCell<Vec<(u64, Box<dyn FnMut()>)>>,
    key_handlers: RefCell<Vec<(u64, KeyHandler)>>,
    observers: RefCell<Vec<Observer>>,
}

impl PageState {
    fn next_id(&self) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

/// In-memory page with a virtual clock. Events only happen when a test fires
/// them, and timers only run on [`advance`](FakePage::advance).
#[derive(Clone)]
pub struct FakePage(Rc<PageState>);

#[allow(dead_code)]
impl FakePage {
    pub fn new() -> Self {
        FakePage(
            Rc::new_cyclic(|page: &Weak<PageState>| PageState {
                body: FakeElement::new(page.clone(), ""),
                head: RefCell::new(Vec::new()),
                pathname: RefCell::new("/home.html".to_string()),
                width: Cell::new(1024.0),
                ready: Cell::new(ReadyState::Complete),
                focused: RefCell::new(None),
                now: Cell::new(0),
                next_id: Cell::new(0),
                timers: RefCell::new(Vec::new()),
                refuse_timers: Cell::new(false),
                ready_handlers: RefCell::new(Vec::new()),
                load_handlers: RefCell::new(Vec::new()),
                resize_handlers: RefCell::new(Vec::new()),
                key_handlers: RefCell::new(Vec::new()),
                observers: RefCell::new(Vec::new()),
            })
        )
    }

    /// New detached element with the given space-separated classes.
    pub fn element(&self, classes: &str) -> FakeElement {
        FakeElement::new(Rc::downgrade(&self.0), classes)
    }

    /// New element appended directly to `<body>`.
    pub fn add(&self, classes: &str) -> FakeElement {
        let el = self.element(classes);
        self.0.body.append(&el);
        el
    }

    pub fn body_element(&self) -> FakeElement {
        self.0.body.clone()
    }

    pub fn set_pathname(&self, pathname: &str) {
        *self.0.pathname.borrow_mut() = pathname.to_string();
    }

    pub fn set_ready_state(&self, state: ReadyState) {
        self.0.ready.set(state);
    }

    pub fn injected_styles(&self) -> Vec<String> {
        self.0.head.borrow().clone()
    }

    pub fn now(&self) -> u64 {
        self.0.now.get()
    }

    /// Makes every later `set_timeout` fail, like a host that throws.
    pub fn refuse_timers(&self, refuse: bool) {
        self.0.refuse_timers.set(refuse);
    }

    pub fn pending_timers(&self) -> usize {
        self.0.timers.borrow().len()
    }

    pub fn key_listeners(&self) -> usize {
        self.0.key_handlers.borrow().len()
    }

    pub fn resize_listeners(&self) -> usize {
        self.0.resize_handlers.borrow().len()
    }

    pub fn observers(&self) -> usize {
        self.0.observers.borrow().len()
    }

    pub fn observer_options(&self) -> Vec<ObserverOptions> {
        self.0.observers.borrow().iter().map(|o| o.options.clone()).collect()
    }

    /// Runs every timer due within the next `ms`, in due order.
    pub fn advance(&self, ms: u64) {
        let target = self.0.now.get() + ms;
        loop {
            let next = {
                let mut timers = self.0.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.id))
                    .map(|(idx, _)| idx);
                due.map(|idx| timers.remove(idx))
            };
            let Some(timer) = next else {
                break;
            };
            self.0.now.set(timer.due);
            (timer.callback)();
        }
        self.0.now.set(target);
    }

    pub fn fire_ready(&self) {
        self.0.ready.set(ReadyState::Interactive);
        let handlers = std::mem::take(&mut *self.0.ready_handlers.borrow_mut());
        for (_, handler) in handlers {
            handler();
        }
    }

    pub fn fire_load(&self) {
        self.0.ready.set(ReadyState::Complete);
        let handlers = std::mem::take(&mut *self.0.load_handlers.borrow_mut());
        for (_, handler) in handlers {
            handler();
        }
    }

    pub fn resize(&self, width: f64) {
        self.0.width.set(width);
        for (_, handler) in self.0.resize_handlers.borrow_mut().iter_mut() {
            handler();
        }
    }

    /// Dispatches a key-down to every handler; `Prevent` if any handler asked for it.
    pub fn key_down(&self, input: KeyInput) -> DefaultAction {
        let mut action = DefaultAction::Allow;
        for (_, handler) in self.0.key_handlers.borrow_mut().iter_mut() {
            if handler(&input) == DefaultAction::Prevent {
                action = DefaultAction::Prevent;
            }
        }
        action
    }

    pub fn focused(&self) -> Option<FakeElement> {
        self.0.focused.borrow().clone()
    }

    pub fn hover(&self, element: &FakeElement, phase: Hover) -> usize {
        element.fire_hover(phase)
    }

    /// Reports `element` to every observer watching it; returns how many saw it.
    pub fn intersect(&self, element: &FakeElement, is_intersecting: bool) -> usize {
        let mut delivered = 0;
        for observer in self.0.observers.borrow_mut().iter_mut() {
            if observer.targets.contains(element) {
                (observer.handler)(vec![Intersection { target: element.clone(), is_intersecting }]);
                delivered += 1;
            }
        }
        delivered
    }
}

impl Scheduler for FakePage {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Option<TimerId> {
        if self.0.refuse_timers.get() {
            return None;
        }
        let id = self.0.next_id() as i32;
        let due = self.0.now.get() + u64::from(delay_ms);
        self.0.timers.borrow_mut().push(Timer { id, due, callback });
        Some(TimerId(id))
    }

    fn clear_timeout(&self, id: TimerId) {
        self.0.timers.borrow_mut().retain(|timer| timer.id != id.0);
    }
}

fn on_dispose(page: &Rc<PageState>, remove: impl Fn(&PageState) + 'static) -> Listener {
    let page = Rc::downgrade(page);
    Listener::new(move || {
        if let Some(page) = page.upgrade() {
            remove(&page);
        }
    })
}

impl Page for FakePage {
    type Element = FakeElement;

    fn ready_state(&self) -> ReadyState {
        self.0.ready.get()
    }

    fn body(&self) -> Option<FakeElement> {
        Some(self.0.body.clone())
    }

    fn find(&self, selector: &str) -> Option<FakeElement> {
        self.0.body.find(selector)
    }

    fn find_all(&self, selector: &str) -> Vec<FakeElement> {
        self.0.body.find_all(selector)
    }

    fn active_element(&self) -> Option<FakeElement> {
        self.focused().or_else(|| Some(self.0.body.clone()))
    }

    fn pathname(&self) -> String {
        self.0.pathname.borrow().clone()
    }

    fn viewport_width(&self) -> f64 {
        self.0.width.get()
    }

    fn inject_style(&self, css: &str) {
        self.0.head.borrow_mut().push(css.to_string());
    }

    fn on_ready(&self, handler: Box<dyn FnOnce()>) -> Listener {
        let id = self.0.next_id();
        self.0.ready_handlers.borrow_mut().push((id, handler));
        on_dispose(&self.0, move |page| page.ready_handlers.borrow_mut().retain(|(registered, _)| *registered != id))
    }

    fn on_load(&self, handler: Box<dyn FnOnce()>) -> Listener {
        let id = self.0.next_id();
        self.0.load_handlers.borrow_mut().push((id, handler));
        on_dispose(&self.0, move |page| page.load_handlers.borrow_mut().retain(|(registered, _)| *registered != id))
    }

    fn on_resize(&self, handler: Box<dyn FnMut()>) -> Listener {
        let id = self.0.next_id();
        self.0.resize_handlers.borrow_mut().push((id, handler));
        on_dispose(&self.0, move |page| page.resize_handlers.borrow_mut().retain(|(registered, _)| *registered != id))
    }

    fn on_key_down(&self, handler: KeyHandler) -> Listener {
        let id = self.0.next_id();
        self.0.key_handlers.borrow_mut().push((id, handler));
        on_dispose(&self.0, move |page| page.key_handlers.borrow_mut().retain(|(registered, _)| *registered != id))
    }

    fn on_hover(&self, element: &FakeElement, phase: Hover, handler: Box<dyn FnMut()>) -> Listener {
        let id = self.0.next_id();
        element.0.hover.borrow_mut().push((id, phase, handler));
        let node = Rc::downgrade(&element.0);
        Listener::new(move || {
            if let Some(node) = node.upgrade() {
                node.hover.borrow_mut().retain(|(registered, _, _)| *registered != id);
            }
        })
    }

    fn observe_intersections(
        &self,
        options: &ObserverOptions,
        targets: &[FakeElement],
        handler: IntersectionHandler<FakeElement>
    ) -> Listener {
        let id = self.0.next_id();
        self.0.observers.borrow_mut().push(Observer {
            id,
            options: options.clone(),
            targets: targets.to_vec(),
            handler,
        });
        on_dispose(&self.0, move |page| page.observers.borrow_mut().retain(|observer| observer.id != id))
    }
}
