//! Authorize URL construction
//!
//! Pure string building, no network. The session id is passed as the OAuth
//! `state` parameter, which binds the eventual callback to its session and
//! serves as the CSRF defense.

use relay_providers::ProviderConfig;

/// Build the provider authorize URL for a session.
///
/// Query order: `client_id`, `redirect_uri`, `response_type=code`, `scope`,
/// `state`, then the provider's extra params. Extras are appended last on
/// purpose: if a provider override collides with a required key, the
/// provider-specific value wins.
pub fn build_authorize_url(config: &ProviderConfig, session_id: &str, redirect_uri: &str) -> String {
    let mut url = format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
        config.authorize_url,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(&config.scope_string()),
        urlencoding::encode(session_id),
    );

    for (key, value) in &config.extra_authorize_params {
        url.push_str(&format!(
            "&{}={}",
            urlencoding::encode(key),
            urlencoding::encode(value)
        ));
    }

    url
}
