//! Page scripts for the marketing site: consent banner, modal dialogs,
//! campaign link attribution and navigation niceties.

use log::{debug, error, info};

pub mod config;
pub mod consent;
pub mod cookies;
pub mod dom;
pub mod error;

pub mod components {
    pub mod cookie_banner;
    pub mod modal;
}

pub mod page {
    pub mod accordion;
    pub mod navbar;
    pub mod smooth_scroll;
    pub mod utm;
}

use components::cookie_banner::CookieBanner;
use consent::{ConsentHook, GtagHook};
use error::DomError;

/// Wires every component present in the document. A component that fails
/// to bind is logged and skipped; the rest still run. Event listeners own
/// the components they drive, so nothing here has to outlive the call.
pub fn init_page() -> Result<(), DomError> {
    let window = dom::window()?;
    let document = dom::document()?;

    let hook = GtagHook::detect().map(|hook| Box::new(hook) as Box<dyn ConsentHook>);
    if hook.is_none() {
        debug!("gtag not loaded, consent decisions stay local");
    }
    report("cookie banner", CookieBanner::mount(hook).map(|_| ()));
    report("UTM propagation", page::utm::init(&document, &window.location()));
    report("navbar", page::navbar::init(&document, &window));
    report("accordion", page::accordion::init(&document));
    report("smooth scroll", page::smooth_scroll::init(&document, &window));

    info!("Page scripts ready");
    Ok(())
}

fn report(component: &str, result: Result<(), DomError>) {
    if let Err(e) = result {
        error!("{}: {}", component, e);
    }
}
