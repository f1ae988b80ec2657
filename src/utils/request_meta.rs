//! Best-effort click metadata derived from request headers.

use axum::http::{HeaderMap, header};

/// Headers set by CDNs / reverse proxies carrying the client country code.
const COUNTRY_HEADERS: &[&str] = &["cf-ipcountry", "x-country-code"];

/// Classifies the client device from the `User-Agent` header.
///
/// Returns one of `"Bot"`, `"Tablet"`, `"Mobile"`, `"Desktop"`, or `None`
/// when the header is absent or unreadable.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::USER_AGENT, "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)".parse().unwrap());
/// assert_eq!(device_type_from_headers(&headers).as_deref(), Some("Mobile"));
/// ```
pub fn device_type_from_headers(headers: &HeaderMap) -> Option<String> {
    let ua = headers
        .get(header::USER_AGENT)?
        .to_str()
        .ok()?
        .trim()
        .to_ascii_lowercase();

    if ua.is_empty() {
        return None;
    }

    let kind = if ["bot", "crawler", "spider", "curl", "wget"]
        .iter()
        .any(|m| ua.contains(m))
    {
        "Bot"
    } else if ua.contains("ipad")
        || ua.contains("tablet")
        || (ua.contains("android") && !ua.contains("mobile"))
    {
        // Android phones carry a "Mobile" token, Android tablets do not.
        "Tablet"
    } else if ua.contains("mobile") || ua.contains("iphone") {
        "Mobile"
    } else {
        "Desktop"
    };

    Some(kind.to_string())
}

/// Reads the client country from proxy headers, if any.
///
/// Values are upper-cased; the Cloudflare placeholders `XX` (unknown) and
/// `T1` (Tor) are ignored.
pub fn location_from_headers(headers: &HeaderMap) -> Option<String> {
    COUNTRY_HEADERS.iter().find_map(|name| {
        let value = headers.get(*name)?.to_str().ok()?.trim().to_ascii_uppercase();
        let usable = value.len() == 2
            && value.chars().all(|c| c.is_ascii_alphabetic())
            && value != "XX";
        usable.then_some(value)
    })
}
