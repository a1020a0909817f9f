//! Browser implementation of the host traits, on top of `web-sys`.
//!
//! Failed DOM calls are logged at debug level and otherwise ignored: a
//! cosmetic effect that cannot be applied is simply skipped.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{ Array, Object, Reflect };
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document,
    EventTarget,
    HtmlElement,
    IntersectionObserver,
    IntersectionObserverEntry,
    IntersectionObserverInit,
    KeyboardEvent,
    NodeList,
    Window,
};

use crate::bootstrap::App;
use crate::configs::Config;
use crate::error::describe;
use crate::storage::LocalStorage;
use super::{
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

fn ignore<T>(what: &str, result: Result<T, JsValue>) {
    if let Err(e) = result {
        log::debug!("{} failed: {}", what, describe(&e));
    }
}

fn html_elements(nodes: Result<NodeList, JsValue>) -> Vec<WebElement> {
    let Ok(nodes) = nodes else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(WebElement)
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct WebElement(pub HtmlElement);

impl Element for WebElement {
    fn has_class(&self, name: &str) -> bool {
        self.0.class_list().contains(name)
    }

    fn add_class(&self, name: &str) {
        ignore("classList.add", self.0.class_list().add_1(name));
    }

    fn remove_class(&self, name: &str) {
        ignore("classList.remove", self.0.class_list().remove_1(name));
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn text(&self) -> Option<String> {
        self.0.text_content()
    }

    fn style(&self, property: &str) -> Option<String> {
        self.0
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&self, property: &str, value: &str) {
        ignore("style.setProperty", self.0.style().set_property(property, value));
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn find(&self, selector: &str) -> Option<Self> {
        self.0
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(WebElement)
    }

    fn find_all(&self, selector: &str) -> Vec<Self> {
        html_elements(self.0.query_selector_all(selector))
    }

    fn focus(&self) {
        ignore("focus", self.0.focus());
    }
}

/// Registers `closure` on `target`; the returned listener removes it again and
/// frees the closure.
fn listen<T>(target: EventTarget, event: &'static str, closure: Closure<T>) -> Listener
    where T: ?Sized + WasmClosure + 'static
{
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::debug!("addEventListener({}) failed: {}", event, describe(&e));
        return Listener::inert();
    }
    Listener::new(move || {
        ignore(
            "removeEventListener",
            target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        );
    })
}

fn once_listener(target: EventTarget, event: &'static str, handler: Box<dyn FnOnce()>) -> Listener {
    let mut handler = Some(handler);
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        if let Some(handler) = handler.take() {
            handler();
        }
    });
    listen(target, event, closure)
}

#[derive(Clone, Debug)]
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Scheduler for WebPage {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Option<TimerId> {
        // a cleared timer leaks its (small) callback
        let callback = Closure::once_into_js(move || callback());
        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout) {
            Ok(handle) => Some(TimerId(handle)),
            Err(e) => {
                log::debug!("setTimeout failed: {}", describe(&e));
                None
            }
        }
    }

    fn clear_timeout(&self, id: TimerId) {
        self.window.clear_timeout_with_handle(id.0);
    }
}

impl Page for WebPage {
    type Element = WebElement;

    fn ready_state(&self) -> ReadyState {
        ReadyState::parse(&self.document.ready_state())
    }

    fn body(&self) -> Option<WebElement> {
        self.document.body().map(WebElement)
    }

    fn find(&self, selector: &str) -> Option<WebElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(WebElement)
    }

    fn find_all(&self, selector: &str) -> Vec<WebElement> {
        html_elements(self.document.query_selector_all(selector))
    }

    fn active_element(&self) -> Option<WebElement> {
        self.document
            .active_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(WebElement)
    }

    fn pathname(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or_default()
    }

    fn inject_style(&self, css: &str) {
        let Some(head) = self.document.head() else {
            log::debug!("No <head>, style block skipped");
            return;
        };
        match self.document.create_element("style") {
            Ok(style) => {
                style.set_text_content(Some(css));
                ignore("appendChild", head.append_child(&style));
            }
            Err(e) => log::debug!("createElement(style) failed: {}", describe(&e)),
        }
    }

    fn on_ready(&self, handler: Box<dyn FnOnce()>) -> Listener {
        once_listener(self.document.clone().unchecked_into(), "DOMContentLoaded", handler)
    }

    fn on_load(&self, handler: Box<dyn FnOnce()>) -> Listener {
        once_listener(self.window.clone().unchecked_into(), "load", handler)
    }

    fn on_resize(&self, mut handler: Box<dyn FnMut()>) -> Listener {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| handler());
        listen(self.window.clone().unchecked_into(), "resize", closure)
    }

    fn on_key_down(&self, mut handler: KeyHandler) -> Listener {
        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let input = KeyInput {
                key: event.key(),
                ctrl: event.ctrl_key(),
                meta: event.meta_key(),
            };
            if handler(&input) == DefaultAction::Prevent {
                event.prevent_default();
            }
        });
        listen(self.document.clone().unchecked_into(), "keydown", closure)
    }

    fn on_hover(&self, element: &WebElement, phase: Hover, mut handler: Box<dyn FnMut()>) -> Listener {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| handler());
        listen(element.0.clone().unchecked_into(), phase.event_name(), closure)
    }

    fn observe_intersections(
        &self,
        options: &ObserverOptions,
        targets: &[WebElement],
        mut handler: IntersectionHandler<WebElement>
    ) -> Listener {
        let closure = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let batch = entries
                    .iter()
                    .filter_map(|entry| {
                        let entry: IntersectionObserverEntry = entry.unchecked_into();
                        let target = entry.target().dyn_into::<HtmlElement>().ok()?;
                        Some(Intersection {
                            target: WebElement(target),
                            is_intersecting: entry.is_intersecting(),
                        })
                    })
                    .collect();
                handler(batch);
            }
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let observer = match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("IntersectionObserver unavailable, scroll reveal disabled: {}", describe(&e));
                return Listener::inert();
            }
        };
        for target in targets {
            observer.observe(&target.0);
        }

        Listener::new(move || {
            observer.disconnect();
            drop(closure);
        })
    }
}

type WebApp = App<WebPage, LocalStorage>;

thread_local! {
    static APP: RefCell<Option<Rc<WebApp>>> = const { RefCell::new(None) };
}

fn with_app<R>(f: impl FnOnce(&WebApp) -> R) -> Option<R> {
    let app = APP.with(|slot| slot.borrow().clone());
    match app {
        Some(app) => Some(f(&app)),
        None => {
            log::warn!("Portfolio effects are not started");
            None
        }
    }
}

fn export(target: &Object, name: &str, f: fn()) -> Result<(), JsValue> {
    let function = Closure::<dyn Fn()>::new(f).into_js_value();
    Reflect::set(target, &JsValue::from_str(name), &function).map(|_| ())
}

/// Publishes `window.<namespace>.{toggleTheme, updateActiveNavigation, initScrollAnimations}`.
fn publish_globals(window: &Window, namespace: &str) -> Result<(), JsValue> {
    let utils = Object::new();
    export(&utils, "toggleTheme", || {
        with_app(|app| app.toggle_theme());
    })?;
    export(&utils, "updateActiveNavigation", || {
        with_app(|app| app.update_navigation());
    })?;
    export(&utils, "initScrollAnimations", || {
        with_app(|app| app.init_scroll_animations());
    })?;
    Reflect::set(window, &JsValue::from_str(namespace), &utils)?;
    Ok(())
}

/// Boots the effects on the current page. Calling it again is a no-op.
pub fn start() -> Result<(), JsValue> {
    if APP.with(|slot| slot.borrow().is_some()) {
        return Ok(());
    }

    let page = WebPage::new().ok_or_else(|| JsValue::from_str("no browser window"))?;
    let config = Config::from_page(&page);
    if let Ok(level) = config.level_filter() {
        log::set_max_level(level);
    }

    let app = App::new(page.clone(), LocalStorage, config);
    APP.with(|slot| slot.replace(Some(app.clone())));
    app.boot();

    publish_globals(page.window(), &app.config().global_namespace)?;
    log::info!("Portfolio effects started on {}", page.pathname());
    Ok(())
}
