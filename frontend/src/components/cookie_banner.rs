use std::cell::Cell;
use std::rc::Rc;

use web_sys::Element;

use crate::components::modal::{Modal, ModalOptions};
use crate::config::{
    ACCEPT_BUTTON_ID, BANNER_ID, CONSENT_COOKIE, CONSENT_COOKIE_DAYS, REJECT_BUTTON_ID,
    UPDATE_BUTTON_ID,
};
use crate::consent::{ConsentHook, ConsentState, CONSENT_CHANNELS};
use crate::cookies::{CookieStore, DocumentCookies};
use crate::dom::{self, ClassTarget};
use crate::error::DomError;

/// Consent banner shown in a modal until the visitor accepts or rejects.
pub struct CookieBanner<E, C> {
    modal: Rc<Modal<E>>,
    cookies: C,
    hook: Option<Box<dyn ConsentHook>>,
    state: Cell<ConsentState>,
}

impl<E: ClassTarget, C: CookieStore> CookieBanner<E, C> {
    pub fn new(modal: Rc<Modal<E>>, cookies: C, hook: Option<Box<dyn ConsentHook>>) -> Self {
        Self {
            modal,
            cookies,
            hook,
            state: Cell::new(ConsentState::Unset),
        }
    }

    /// Reads the stored decision and shows the banner when there is none.
    pub fn init(&self) {
        match self.refresh() {
            ConsentState::Unset => self.modal.open(),
            ConsentState::Granted => self.broadcast(ConsentState::Granted),
            ConsentState::Denied => {}
        }
    }

    pub fn grant_consent(&self) {
        self.decide(ConsentState::Granted);
    }

    pub fn deny_consent(&self) {
        self.decide(ConsentState::Denied);
    }

    /// Forgets the decision and asks again.
    pub fn clear_consent(&self) {
        self.cookies.set(CONSENT_COOKIE, "", -1);
        self.refresh();
        log::info!("Cookie consent cleared");
        self.modal.open();
    }

    pub fn state(&self) -> ConsentState {
        self.state.get()
    }

    pub fn modal(&self) -> &Modal<E> {
        &self.modal
    }

    fn decide(&self, decision: ConsentState) {
        self.cookies.set(
            CONSENT_COOKIE,
            decision.as_cookie_value(),
            CONSENT_COOKIE_DAYS,
        );
        self.refresh();
        log::info!("Cookie consent {}", decision);
        self.broadcast(decision);
        self.modal.close();
    }

    fn refresh(&self) -> ConsentState {
        let state = ConsentState::from_cookie(&self.cookies.get(CONSENT_COOKIE));
        self.state.set(state);
        state
    }

    fn broadcast(&self, status: ConsentState) {
        if let Some(hook) = &self.hook {
            hook.update(status.as_cookie_value(), &CONSENT_CHANNELS);
        }
    }
}

impl CookieBanner<Element, DocumentCookies> {
    /// Binds the `#md-cookies` banner and its buttons, then runs [`init`].
    /// Returns `None` when the page has no banner.
    ///
    /// [`init`]: CookieBanner::init
    pub fn mount(hook: Option<Box<dyn ConsentHook>>) -> Result<Option<Rc<Self>>, DomError> {
        let document = dom::document()?;
        let Some(banner_element) = document.get_element_by_id(BANNER_ID) else {
            log::warn!("Cookie banner element not found");
            return Ok(None);
        };

        let cookies = DocumentCookies::new(&document)?;
        let modal = Modal::bind(
            BANNER_ID,
            ModalOptions {
                close_on_overlay_click: false,
                close_on_escape: false,
                ..ModalOptions::default()
            },
        );
        let banner = Rc::new(Self::new(modal, cookies, hook));

        let accept = banner_element.query_selector(&format!("#{}", ACCEPT_BUTTON_ID))?;
        let reject = banner_element.query_selector(&format!("#{}", REJECT_BUTTON_ID))?;
        let update = document.get_element_by_id(UPDATE_BUTTON_ID);
        bind_button(accept, &banner, Self::grant_consent)?;
        bind_button(reject, &banner, Self::deny_consent)?;
        bind_button(update, &banner, Self::clear_consent)?;

        banner.init();
        Ok(Some(banner))
    }
}

fn bind_button<E, C>(
    button: Option<Element>,
    banner: &Rc<CookieBanner<E, C>>,
    action: fn(&CookieBanner<E, C>),
) -> Result<(), DomError>
where
    E: ClassTarget + 'static,
    C: CookieStore + 'static,
{
    let Some(button) = button else {
        return Ok(());
    };
    let banner = banner.clone();
    dom::listen(&button, "click", move |event| {
        event.prevent_default();
        action(&banner);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consent::testing::RecordingHook;
    use crate::cookies::testing::MemoryCookies;
    use crate::dom::testing::FakeElement;

    struct Fixture {
        banner: CookieBanner<FakeElement, MemoryCookies>,
        hook: RecordingHook,
    }

    fn fixture(stored: Option<&str>) -> Fixture {
        let cookies = MemoryCookies::new();
        if let Some(value) = stored {
            cookies.set(CONSENT_COOKIE, value, CONSENT_COOKIE_DAYS);
        }
        let modal = Rc::new(Modal::new(
            BANNER_ID,
            Some(FakeElement::with_classes(&["modal"])),
            Some(FakeElement::default()),
            ModalOptions {
                close_on_overlay_click: false,
                close_on_escape: false,
                ..ModalOptions::default()
            },
        ));
        let hook = RecordingHook::default();
        let banner = CookieBanner::new(modal, cookies, Some(Box::new(hook.clone())));
        Fixture { banner, hook }
    }

    fn all_channels(status: &str) -> (String, Vec<String>) {
        (
            status.to_string(),
            CONSENT_CHANNELS.iter().map(|c| c.to_string()).collect(),
        )
    }

    #[test]
    fn no_cookie_opens_banner() {
        let f = fixture(None);
        f.banner.init();
        assert!(f.banner.modal().is_open());
        assert_eq!(f.banner.state(), ConsentState::Unset);
        assert!(f.hook.calls.borrow().is_empty());
    }

    #[test]
    fn unknown_cookie_value_counts_as_unset() {
        let f = fixture(Some("maybe"));
        f.banner.init();
        assert!(f.banner.modal().is_open());
        assert_eq!(f.banner.state(), ConsentState::Unset);
    }

    #[test]
    fn granted_cookie_rebroadcasts_without_opening() {
        let f = fixture(Some("granted"));
        f.banner.init();
        assert!(!f.banner.modal().is_open());
        assert_eq!(f.banner.state(), ConsentState::Granted);
        assert_eq!(*f.hook.calls.borrow(), vec![all_channels("granted")]);
    }

    #[test]
    fn denied_cookie_stays_quiet() {
        let f = fixture(Some("denied"));
        f.banner.init();
        assert!(!f.banner.modal().is_open());
        assert_eq!(f.banner.state(), ConsentState::Denied);
        assert!(f.hook.calls.borrow().is_empty());
    }

    #[test]
    fn accepting_persists_and_closes() {
        let f = fixture(None);
        f.banner.init();
        f.banner.grant_consent();

        assert_eq!(f.banner.cookies.get(CONSENT_COOKIE), "granted");
        assert_eq!(f.banner.state(), ConsentState::Granted);
        assert!(!f.banner.modal().is_open());
        assert_eq!(*f.hook.calls.borrow(), vec![all_channels("granted")]);
    }

    #[test]
    fn rejecting_persists_and_closes() {
        let f = fixture(None);
        f.banner.init();
        f.banner.deny_consent();

        assert_eq!(f.banner.cookies.get(CONSENT_COOKIE), "denied");
        assert_eq!(f.banner.state(), ConsentState::Denied);
        assert!(!f.banner.modal().is_open());
        assert_eq!(*f.hook.calls.borrow(), vec![all_channels("denied")]);
    }

    #[test]
    fn update_request_clears_and_reopens() {
        let f = fixture(Some("granted"));
        f.banner.init();
        f.banner.clear_consent();

        assert_eq!(f.banner.cookies.get(CONSENT_COOKIE), "");
        assert_eq!(f.banner.state(), ConsentState::Unset);
        assert!(f.banner.modal().is_open());
        // Only the initial re-broadcast; clearing sends nothing.
        assert_eq!(f.hook.calls.borrow().len(), 1);
    }

    #[test]
    fn decisions_work_without_a_hook() {
        let modal = Rc::new(Modal::new(
            BANNER_ID,
            Some(FakeElement::default()),
            None,
            ModalOptions::default(),
        ));
        let banner = CookieBanner::new(modal, MemoryCookies::new(), None);
        banner.init();
        banner.grant_consent();
        assert_eq!(banner.state(), ConsentState::Granted);
        assert!(!banner.modal().is_open());
    }

    #[test]
    fn inert_modal_still_records_decision() {
        let modal = Rc::new(Modal::<FakeElement>::new(
            BANNER_ID,
            None,
            None,
            ModalOptions::default(),
        ));
        let banner = CookieBanner::new(modal, MemoryCookies::new(), None);
        banner.init();
        assert!(!banner.modal().is_open());
        banner.deny_consent();
        assert_eq!(banner.state(), ConsentState::Denied);
    }
}
