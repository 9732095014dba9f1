use web_sys::{Document, Window};

use crate::config::{
    ACTIVE_CLASS, NAVBAR_BURGER_SELECTOR, NAVBAR_SELECTOR, SCROLLED_CLASS, SCROLLED_THRESHOLD,
};
use crate::dom::{self, ClassTarget};
use crate::error::DomError;

pub fn toggle_burger<E: ClassTarget>(burger: &E, menu: Option<&E>) {
    burger.toggle_class(ACTIVE_CLASS);
    if let Some(menu) = menu {
        menu.toggle_class(ACTIVE_CLASS);
    }
}

/// Collapses the mobile menu if it is showing.
pub fn close_mobile_menu<E: ClassTarget>(menu: Option<&E>, burger: Option<&E>) {
    let Some(menu) = menu else {
        return;
    };
    if menu.has_class(ACTIVE_CLASS) {
        menu.remove_class(ACTIVE_CLASS);
        if let Some(burger) = burger {
            burger.remove_class(ACTIVE_CLASS);
        }
    }
}

pub fn update_scrolled<E: ClassTarget>(nav: &E, scroll_y: f64) {
    if scroll_y > SCROLLED_THRESHOLD {
        nav.add_class(SCROLLED_CLASS);
    } else {
        nav.remove_class(SCROLLED_CLASS);
    }
}

pub fn init(document: &Document, window: &Window) -> Result<(), DomError> {
    for burger in dom::query_all_in_document(document, NAVBAR_BURGER_SELECTOR)? {
        let document = document.clone();
        let target = burger.clone();
        dom::listen(&burger, "click", move |_| {
            let menu = target
                .get_attribute("data-target")
                .and_then(|id| document.get_element_by_id(&id));
            toggle_burger(&target, menu.as_ref());
        })?;
    }

    if let Some(nav) = document.query_selector(NAVBAR_SELECTOR)? {
        let scrolled_window = window.clone();
        dom::listen(window, "scroll", move |_| {
            update_scrolled(&nav, scrolled_window.scroll_y().unwrap_or(0.0));
        })?;
    }

    Ok(())
}
