// src/url.rs

/// Default path for the custom events endpoint
pub const DEFAULT_EVENT_ENDPOINT: &str = "/v2/event";

/// Canonical ingest host for a realm
pub fn realm_ingest_url(realm: &str) -> String {
    format!("https://ingest.{}.signalfx.com", realm)
}

/// Compose the target URL for the event POST.
///
/// A realm takes priority over an explicit base URL. Returns `None` when
/// neither is available. The result is not validated; a malformed URL
/// surfaces as a transport error at send time.
pub fn compose_ingest_url(
    realm: Option<&str>,
    ingest_base_url: Option<&str>,
    endpoint: &str,
) -> Option<String> {
    let base = match realm.filter(|r| !r.is_empty()) {
        Some(realm) => realm_ingest_url(realm),
        None => ingest_base_url?.to_string(),
    };

    Some(format!("{}{}", base.trim_end_matches('/'), endpoint))
}
