//! Thin helpers over `web_sys` shared by the page components.
//!
//! Components never touch `web_sys::Element` directly for class changes;
//! they go through [`ClassTarget`] so the same logic runs against the real
//! DOM in the browser and against in-memory fakes in tests.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, Window};

use crate::error::DomError;

pub trait ClassTarget {
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);

    fn toggle_class(&self, class: &str) {
        if self.has_class(class) {
            self.remove_class(class);
        } else {
            self.add_class(class);
        }
    }
}

impl ClassTarget for Element {
    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(e) = self.class_list().add_1(class) {
            log::warn!("Failed to add class {}: {:?}", class, e);
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(e) = self.class_list().remove_1(class) {
            log::warn!("Failed to remove class {}: {:?}", class, e);
        }
    }
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

/// Every element under `root` matching `selector`, in document order.
pub fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, DomError> {
    let list = root.query_selector_all(selector)?;
    Ok(collect_elements(&list))
}

pub fn query_all_in_document(document: &Document, selector: &str) -> Result<Vec<Element>, DomError> {
    let list = document.query_selector_all(selector)?;
    Ok(collect_elements(&list))
}

fn collect_elements(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attaches `handler` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), DomError>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    // Page scripts never detach their listeners.
    callback.forget();
    Ok(())
}



#[cfg(test)]
mod tests {
    use super::testing::FakeElement;
    use super::ClassTarget;

    #[test]
    fn toggle_flips_presence() {
        let el = FakeElement::default();
        el.toggle_class("is-active");
        assert!(el.has_class("is-active"));
        el.toggle_class("is-active");
        assert!(!el.has_class("is-active"));
    }

    #[test]
    fn adding_twice_is_a_no_op() {
        let el = FakeElement::with_classes(&["is-active"]);
        el.add_class("is-active");
        assert_eq!(el.classes(), vec!["is-active".to_string()]);
        el.remove_class("is-active");
        assert!(!el.has_class("is-active"));
    }
}
