use chrono::{DateTime, Duration, Utc};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::error::DomError;

pub trait CookieStore {
    /// Value of cookie `name`, or an empty string when it is not set.
    fn get(&self, name: &str) -> String;

    /// Writes `name=value` on path `/`, expiring `days` from now. A negative
    /// `days` expires the cookie immediately.
    fn set(&self, name: &str, value: &str, days: i64);
}

/// Looks `name` up in a raw `document.cookie` string.
pub fn find_cookie(raw: &str, name: &str) -> String {
    let decoded = urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    let prefix = format!("{}=", name);

    decoded
        .split(';')
        .map(|entry| entry.trim_start_matches(' '))
        .find_map(|entry| entry.strip_prefix(prefix.as_str()))
        .unwrap_or_default()
        .to_string()
}

pub fn expiry_after(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now + Duration::days(days)
}

/// `Set-Cookie`-style assignment for `document.cookie`.
pub fn cookie_assignment(name: &str, value: &str, expires: DateTime<Utc>) -> String {
    format!(
        "{}={};expires={};path=/",
        name,
        value,
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

pub struct DocumentCookies {
    document: HtmlDocument,
}

impl DocumentCookies {
    pub fn new(document: &web_sys::Document) -> Result<Self, DomError> {
        let document = document
            .clone()
            .dyn_into::<HtmlDocument>()
            .map_err(|_| DomError::Js("document is not an HTML document".to_string()))?;
        Ok(Self { document })
    }
}

impl CookieStore for DocumentCookies {
    fn get(&self, name: &str) -> String {
        match self.document.cookie() {
            Ok(raw) => find_cookie(&raw, name),
            Err(e) => {
                log::warn!("Failed to read cookies: {:?}", e);
                String::new()
            }
        }
    }

    fn set(&self, name: &str, value: &str, days: i64) {
        let assignment = cookie_assignment(name, value, expiry_after(Utc::now(), days));
        if let Err(e) = self.document.set_cookie(&assignment) {
            log::warn!("Failed to write cookie {}: {:?}", name, e);
        }
    }
}
