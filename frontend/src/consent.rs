use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};

use crate::error::DomError;

/// Channels updated together on every consent decision.
pub const CONSENT_CHANNELS: [&str; 7] = [
    "ad_storage",
    "ad_user_data",
    "ad_personalization",
    "analytics_storage",
    "personalization_storage",
    "functionality_storage",
    "security_storage",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsentState {
    #[default]
    Unset,
    Granted,
    Denied,
}

impl ConsentState {
    /// Anything other than an explicit decision reads as unset.
    pub fn from_cookie(value: &str) -> Self {
        match value {
            "granted" => ConsentState::Granted,
            "denied" => ConsentState::Denied,
            _ => ConsentState::Unset,
        }
    }

    pub fn as_cookie_value(&self) -> &'static str {
        match self {
            ConsentState::Unset => "",
            ConsentState::Granted => "granted",
            ConsentState::Denied => "denied",
        }
    }
}

impl fmt::Display for ConsentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsentState::Unset => write!(f, "unset"),
            other => write!(f, "{}", other.as_cookie_value()),
        }
    }
}

/// Receives consent decisions, e.g. an analytics tag.
pub trait ConsentHook {
    fn update(&self, status: &str, channels: &[&str]);
}

/// `{ channel: status, ... }` object handed to the analytics tag.
pub fn consent_payload<'a>(status: &'a str, channels: &[&'a str]) -> BTreeMap<&'a str, &'a str> {
    channels.iter().map(|channel| (*channel, status)).collect()
}

/// Forwards decisions to Google's global `gtag` function.
pub struct GtagHook {
    gtag: Function,
}

impl GtagHook {
    /// Present only when the page loaded the tag.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let gtag = Reflect::get(&window, &JsValue::from_str("gtag")).ok()?;
        let gtag = gtag.dyn_into::<Function>().ok()?;
        Some(Self { gtag })
    }

    fn call(&self, status: &str, channels: &[&str]) -> Result<(), DomError> {
        let payload = consent_payload(status, channels)
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| DomError::Js(e.to_string()))?;
        self.gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("consent"),
            &JsValue::from_str("update"),
            &payload,
        )?;
        Ok(())
    }
}

impl ConsentHook for GtagHook {
    fn update(&self, status: &str, channels: &[&str]) {
        if let Err(e) = self.call(status, channels) {
            log::warn!("gtag consent update failed: {}", e);
        }
    }
}
