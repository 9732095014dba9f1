//! Bulma-style modal dialog bound to an existing element.
//!
//! The open/closed state lives in the DOM: the modal element carries
//! `is-active` while open and the root `<html>` element carries `is-clipped`
//! to stop the page behind it from scrolling.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent};

use crate::config::{
    ACTIVE_CLASS, CLIPPED_CLASS, MODAL_BACKGROUND_SELECTOR, MODAL_CLOSE_SELECTOR,
};
use crate::dom::{self, ClassTarget};
use crate::error::DomError;

pub type ModalCallback<E> = Rc<dyn Fn(&Modal<E>)>;

pub struct ModalOptions<E> {
    pub close_on_overlay_click: bool,
    pub close_on_escape: bool,
    pub on_open: Option<ModalCallback<E>>,
    pub on_close: Option<ModalCallback<E>>,
}

impl<E> Default for ModalOptions<E> {
    fn default() -> Self {
        Self {
            close_on_overlay_click: true,
            close_on_escape: true,
            on_open: None,
            on_close: None,
        }
    }
}

pub struct Modal<E> {
    id: String,
    element: Option<E>,
    root: Option<E>,
    options: ModalOptions<E>,
}

impl<E: ClassTarget> Modal<E> {
    /// A modal whose element is missing is inert: every operation is a no-op.
    pub fn new(id: &str, element: Option<E>, root: Option<E>, options: ModalOptions<E>) -> Self {
        if element.is_none() {
            log::error!("Modal with id \"{}\" not found", id);
        }
        Self {
            id: id.to_string(),
            element,
            root,
            options,
        }
    }

    pub fn open(&self) {
        let Some(element) = &self.element else {
            return;
        };
        element.add_class(ACTIVE_CLASS);
        if let Some(root) = &self.root {
            root.add_class(CLIPPED_CLASS);
        }
        log::debug!("Opened modal {}", self.id);

        if let Some(on_open) = &self.options.on_open {
            on_open(self);
        }
    }

    pub fn close(&self) {
        let Some(element) = &self.element else {
            return;
        };
        element.remove_class(ACTIVE_CLASS);
        if let Some(root) = &self.root {
            root.remove_class(CLIPPED_CLASS);
        }
        log::debug!("Closed modal {}", self.id);

        if let Some(on_close) = &self.options.on_close {
            on_close(self);
        }
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn is_open(&self) -> bool {
        self.element
            .as_ref()
            .map(|element| element.has_class(ACTIVE_CLASS))
            .unwrap_or(false)
    }

    pub fn destroy(&self) {
        self.close();
    }

    /// Global keydown handling. Returns whether the key closed the modal.
    pub fn handle_key(&self, key: &str) -> bool {
        if self.options.close_on_escape && key == "Escape" && self.is_open() {
            self.close();
            true
        } else {
            false
        }
    }

    pub fn handle_overlay_click(&self) {
        if self.options.close_on_overlay_click {
            self.close();
        }
    }
}

impl Modal<Element> {
    /// Looks the element up by id and wires close buttons, overlay and
    /// Escape key as configured. The listeners keep the modal alive.
    pub fn bind(id: &str, options: ModalOptions<Element>) -> Rc<Self> {
        let document = match dom::document() {
            Ok(document) => Some(document),
            Err(e) => {
                log::error!("Cannot bind modal {}: {}", id, e);
                None
            }
        };
        let element = document.as_ref().and_then(|d| d.get_element_by_id(id));
        let root = document.as_ref().and_then(|d| d.document_element());

        let modal = Rc::new(Modal::new(id, element, root, options));
        if let Err(e) = Self::attach_listeners(&modal) {
            log::error!("Failed to wire modal {}: {}", id, e);
        }
        modal
    }

    fn attach_listeners(modal: &Rc<Self>) -> Result<(), DomError> {
        let Some(element) = &modal.element else {
            return Ok(());
        };

        for button in dom::query_all(element, MODAL_CLOSE_SELECTOR)? {
            let modal = modal.clone();
            dom::listen(&button, "click", move |_| modal.close())?;
        }

        if modal.options.close_on_overlay_click {
            if let Some(background) = element.query_selector(MODAL_BACKGROUND_SELECTOR)? {
                let modal = modal.clone();
                dom::listen(&background, "click", move |_| modal.handle_overlay_click())?;
            }
        }

        if modal.options.close_on_escape {
            let document = dom::document()?;
            let modal = modal.clone();
            dom::listen(&document, "keydown", move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    modal.handle_key(&event.key());
                }
            })?;
        }

        Ok(())
    }
}
