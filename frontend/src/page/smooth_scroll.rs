use web_sys::{Document, ScrollBehavior, ScrollToOptions, Window};

use crate::config::{ANCHOR_LINK_SELECTOR, HEADER_OFFSET, NAVBAR_BURGER_SELECTOR, NAVBAR_MENU_ID};
use crate::dom;
use crate::error::DomError;
use crate::page::navbar::close_mobile_menu;

/// Document offset to scroll to so the target clears the fixed header.
pub fn scroll_target(element_top: f64, scroll_y: f64) -> f64 {
    element_top + scroll_y - HEADER_OFFSET
}

/// Selector for an in-page link, ignoring the bare `#` placeholder.
pub fn anchor_selector(href: Option<String>) -> Option<String> {
    href.filter(|href| !href.is_empty() && href != "#")
}

pub fn init(document: &Document, window: &Window) -> Result<(), DomError> {
    for anchor in dom::query_all_in_document(document, ANCHOR_LINK_SELECTOR)? {
        let document = document.clone();
        let window = window.clone();
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |event| {
            let Some(selector) = anchor_selector(link.get_attribute("href")) else {
                return;
            };
            let Ok(Some(target)) = document.query_selector(&selector) else {
                return;
            };
            event.prevent_default();

            let menu = document.get_element_by_id(NAVBAR_MENU_ID);
            let burger = document.query_selector(NAVBAR_BURGER_SELECTOR).ok().flatten();
            close_mobile_menu(menu.as_ref(), burger.as_ref());

            let top = scroll_target(
                target.get_bounding_client_rect().top(),
                window.scroll_y().unwrap_or(0.0),
            );
            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        })?;
    }
    Ok(())
}
