//! Browser bindings.
//!
//! [`WebDocument`] runs the binder against the live DOM through `web-sys`.
//! JavaScript calls [`init`] once to bind on page load, or [`shareon`] to
//! (re)bind on demand, e.g. after inserting new buttons.

use std::cell::RefCell;
use std::sync::Once;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCollection, HtmlElement, Window};

use crate::binder::{BindOptions, bind};
use crate::document::{HandlerSlots, LINK_REL, LINK_TARGET, ShareDocument, WINDOW_FEATURES};
use crate::metadata::PageDefaults;

thread_local! {
    /// Closures currently installed as `onclick`, one per bound element.
    static CLICK_HANDLERS: RefCell<HandlerSlots<Element, Closure<dyn FnMut()>>> =
        RefCell::new(HandlerSlots::new());
}

/// The live browser document.
pub struct WebDocument {
    window: Window,
    document: Document,
}

impl WebDocument {
    /// The current window's document, if running in a page.
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }
}

fn collect(collection: HtmlCollection) -> Vec<Element> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

impl ShareDocument for WebDocument {
    type Element = Element;

    fn elements_with_class(&self, class: &str) -> Vec<Element> {
        collect(self.document.get_elements_by_class_name(class))
    }

    fn children(&self, parent: &Element) -> Vec<Element> {
        collect(parent.children())
    }

    fn classes(&self, element: &Element) -> Vec<String> {
        let list = element.class_list();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn is_link(&self, element: &Element) -> bool {
        element.tag_name().eq_ignore_ascii_case("a")
    }

    fn page_defaults(&self) -> PageDefaults {
        let url = self.window.location().href().unwrap_or_default();
        PageDefaults::new(url, self.document.title())
    }

    fn set_link(&mut self, element: &Element, url: &str) {
        for (name, value) in [("href", url), ("rel", LINK_REL), ("target", LINK_TARGET)] {
            if let Err(err) = element.set_attribute(name, value) {
                tracing::warn!(?err, attribute = name, "could not set attribute");
            }
        }
    }

    fn set_click_handler(&mut self, element: &Element, url: &str) {
        let window = self.window.clone();
        let url = url.to_string();
        let handler = Closure::<dyn FnMut()>::new(move || {
            if let Err(err) =
                window.open_with_url_and_target_and_features(&url, LINK_TARGET, WINDOW_FEATURES)
            {
                tracing::warn!(?err, "window.open failed");
            }
        });

        let callback: &js_sys::Function = handler.as_ref().unchecked_ref();
        match element.dyn_ref::<HtmlElement>() {
            Some(html) => html.set_onclick(Some(callback)),
            None => {
                // SVG and other non-HTML elements still expose `onclick`.
                if let Err(err) = js_sys::Reflect::set(element, &"onclick".into(), callback) {
                    tracing::warn!(?err, "could not set onclick");
                }
            }
        }
        // The previous closure is no longer referenced once `onclick` is replaced.
        let previous =
            CLICK_HANDLERS.with_borrow_mut(|slots| slots.replace(element.clone(), handler));
        if previous.is_some() {
            tracing::trace!("replaced click handler");
        }
    }
}

/// Bind every share button in the current page.
#[wasm_bindgen]
pub fn shareon() {
    if let Some(mut doc) = WebDocument::current() {
        let report = bind(&mut doc, &BindOptions::default());
        tracing::debug!(
            containers = report.containers,
            bound = report.bindings.len(),
            "shareon pass finished"
        );
    }
}

static INIT: Once = Once::new();

/// Install the panic hook and logging, and bind once the page has loaded.
///
/// Calling this more than once has no further effect.
#[wasm_bindgen]
pub fn init() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        // A host bundle may already have installed a subscriber.
        let _ = tracing_wasm::try_set_as_global_default();

        let Some(window) = web_sys::window() else {
            return;
        };
        let on_load = Closure::<dyn FnMut()>::new(move || shareon());
        if let Err(err) =
            window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, "could not register load listener");
        }
        on_load.forget();
    });
}
