//! FAQ accordion. Exclusive: opening one item collapses the others.

use std::rc::Rc;

use web_sys::{Document, Element};

use crate::config::{
    ACCORDION_CONTENT_SELECTOR, ACCORDION_HEADER_SELECTOR, ACCORDION_ICON_SELECTOR,
    ACCORDION_ITEM_SELECTOR, HIDDEN_CLASS, ICON_CLOSED_CLASS, ICON_OPEN_CLASS,
};
use crate::dom::{self, ClassTarget};
use crate::error::DomError;

pub struct AccordionItem<E> {
    pub content: E,
    pub icon: Option<E>,
}

impl<E: ClassTarget> AccordionItem<E> {
    pub fn is_open(&self) -> bool {
        !self.content.has_class(HIDDEN_CLASS)
    }

    fn set_open(&self, open: bool) {
        let (remove, add) = if open {
            self.content.remove_class(HIDDEN_CLASS);
            (ICON_CLOSED_CLASS, ICON_OPEN_CLASS)
        } else {
            self.content.add_class(HIDDEN_CLASS);
            (ICON_OPEN_CLASS, ICON_CLOSED_CLASS)
        };
        if let Some(icon) = &self.icon {
            icon.remove_class(remove);
            icon.add_class(add);
        }
    }
}

pub struct Accordion<E> {
    items: Vec<AccordionItem<E>>,
}

impl<E: ClassTarget> Accordion<E> {
    pub fn new(items: Vec<AccordionItem<E>>) -> Self {
        Self { items }
    }

    /// Header click on item `index`.
    pub fn activate(&self, index: usize) {
        let Some(clicked) = self.items.get(index) else {
            return;
        };
        let was_open = clicked.is_open();
        for (i, item) in self.items.iter().enumerate() {
            if i != index {
                item.set_open(false);
            }
        }
        clicked.set_open(!was_open);
    }

    #[cfg(test)]
    fn open_items(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_open())
            .map(|(i, _)| i)
            .collect()
    }
}

pub fn init(document: &Document) -> Result<(), DomError> {
    let mut headers: Vec<Element> = Vec::new();
    let mut items = Vec::new();
    for item in dom::query_all_in_document(document, ACCORDION_ITEM_SELECTOR)? {
        let header = item.query_selector(ACCORDION_HEADER_SELECTOR)?;
        let content = item.query_selector(ACCORDION_CONTENT_SELECTOR)?;
        let (Some(header), Some(content)) = (header, content) else {
            continue;
        };
        let icon = item.query_selector(ACCORDION_ICON_SELECTOR)?;
        headers.push(header);
        items.push(AccordionItem { content, icon });
    }
    if items.is_empty() {
        return Ok(());
    }

    let count = items.len();
    let accordion = Rc::new(Accordion::new(items));
    for (index, header) in headers.iter().enumerate() {
        let accordion = accordion.clone();
        dom::listen(header, "click", move |_| accordion.activate(index))?;
    }
    log::debug!("Accordion ready with {} items", count);
    Ok(())
}
