use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

// Cookie banner
pub const CONSENT_COOKIE: &str = "cookiesConsent";
pub const CONSENT_COOKIE_DAYS: i64 = 365;
pub const BANNER_ID: &str = "md-cookies";
pub const ACCEPT_BUTTON_ID: &str = "bt-cookies-accept";
pub const REJECT_BUTTON_ID: &str = "bt-cookies-reject";
pub const UPDATE_BUTTON_ID: &str = "bt-cookies-update";

// Modal markup (Bulma)
pub const ACTIVE_CLASS: &str = "is-active";
pub const CLIPPED_CLASS: &str = "is-clipped";
pub const MODAL_BACKGROUND_SELECTOR: &str = ".modal-background";
pub const MODAL_CLOSE_SELECTOR: &str = ".modal-close, .delete, [data-modal-close]";

// Navbar
pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const NAVBAR_BURGER_SELECTOR: &str = ".navbar-burger";
pub const NAVBAR_MENU_ID: &str = "navbarMenu";
pub const SCROLLED_CLASS: &str = "is-scrolled";
pub const SCROLLED_THRESHOLD: f64 = 50.0;

// FAQ accordion
pub const ACCORDION_ITEM_SELECTOR: &str = ".accordion-item";
pub const ACCORDION_HEADER_SELECTOR: &str = ".accordion-header";
pub const ACCORDION_CONTENT_SELECTOR: &str = ".accordion-content";
pub const ACCORDION_ICON_SELECTOR: &str = ".icon i";
pub const HIDDEN_CLASS: &str = "is-hidden";
pub const ICON_CLOSED_CLASS: &str = "fa-plus";
pub const ICON_OPEN_CLASS: &str = "fa-minus";

// Smooth scroll
pub const ANCHOR_LINK_SELECTOR: &str = "a[href^=\"#\"]";
pub const HEADER_OFFSET: f64 = 80.0;

pub const UTM_PREFIX: &str = "utm_";
