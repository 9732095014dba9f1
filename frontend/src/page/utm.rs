//! Carries campaign attribution across the site: `utm_*` parameters the
//! visitor landed with are copied onto every internal link.

use url::Url;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement, Location};

use crate::config::UTM_PREFIX;
use crate::dom;
use crate::error::DomError;

pub type Params = Vec<(String, String)>;

/// The `utm_*` pairs of a `location.search` string, in order.
pub fn campaign_params(search: &str) -> Params {
    url::form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .filter(|(key, _)| key.starts_with(UTM_PREFIX))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// `href` rewritten to carry `campaign`, or `None` when the link must be
/// left alone: external, unparsable, or already attributed.
pub fn propagate_to(href: &str, page_host: &str, campaign: &[(String, String)]) -> Option<String> {
    if campaign.is_empty() || href.is_empty() {
        return None;
    }
    let mut link = Url::parse(href).ok()?;
    if host_with_port(&link)? != page_host {
        return None;
    }

    let own: Params = link.query_pairs().into_owned().collect();
    if own.iter().any(|(key, _)| key.starts_with(UTM_PREFIX)) {
        return None;
    }

    let merged = merge_params(campaign, &own);
    link.query_pairs_mut().clear().extend_pairs(merged.iter());
    Some(link.into())
}

/// Later pairs overwrite earlier ones with the same key; a key keeps the
/// position of its first appearance.
fn merge_params(base: &[(String, String)], overrides: &[(String, String)]) -> Params {
    let mut merged: Params = Vec::with_capacity(base.len() + overrides.len());
    for (key, value) in base.iter().chain(overrides) {
        match merged.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value.clone(),
            None => merged.push((key.clone(), value.clone())),
        }
    }
    merged
}

fn host_with_port(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

pub fn init(document: &Document, location: &Location) -> Result<(), DomError> {
    let campaign = campaign_params(&location.search()?);
    if campaign.is_empty() {
        return Ok(());
    }
    let host = location.host()?;

    let mut rewritten = 0;
    for element in dom::query_all_in_document(document, "a")? {
        let Ok(anchor) = element.dyn_into::<HtmlAnchorElement>() else {
            continue;
        };
        if let Some(href) = propagate_to(&anchor.href(), &host, &campaign) {
            anchor.set_href(&href);
            rewritten += 1;
        }
    }
    log::debug!("Propagated {} UTM parameters to {} links", campaign.len(), rewritten);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Params {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn keeps_only_utm_keys() {
        let params = campaign_params("?utm_source=news&ref=abc&utm_medium=email");
        assert_eq!(
            params,
            pairs(&[("utm_source", "news"), ("utm_medium", "email")])
        );
        assert!(campaign_params("?ref=abc").is_empty());
        assert!(campaign_params("").is_empty());
    }

    #[test]
    fn internal_link_gains_campaign_first() {
        let campaign = pairs(&[("utm_source", "news")]);
        assert_eq!(
            propagate_to("https://example.com/pricing?plan=pro#faq", "example.com", &campaign),
            Some("https://example.com/pricing?utm_source=news&plan=pro#faq".to_string())
        );
    }

    #[test]
    fn external_and_attributed_links_are_left_alone() {
        let campaign = pairs(&[("utm_source", "news")]);
        assert_eq!(propagate_to("https://other.org/", "example.com", &campaign), None);
        assert_eq!(
            propagate_to("https://example.com/?utm_campaign=spring", "example.com", &campaign),
            None
        );
        assert_eq!(propagate_to("mailto:hi@example.com", "example.com", &campaign), None);
        assert_eq!(propagate_to("", "example.com", &campaign), None);
    }

    #[test]
    fn host_comparison_includes_port() {
        let campaign = pairs(&[("utm_source", "news")]);
        assert_eq!(
            propagate_to("http://localhost:8080/about", "localhost:8080", &campaign),
            Some("http://localhost:8080/about?utm_source=news".to_string())
        );
        assert_eq!(propagate_to("http://localhost:3000/about", "localhost:8080", &campaign), None);
    }

    #[test]
    fn link_values_win_on_duplicate_keys() {
        let merged = merge_params(
            &pairs(&[("utm_source", "a"), ("utm_source", "b")]),
            &pairs(&[("lang", "fr"), ("lang", "en")]),
        );
        assert_eq!(merged, pairs(&[("utm_source", "b"), ("lang", "en")]));
    }
}
