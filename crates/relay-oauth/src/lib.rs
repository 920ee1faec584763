//! Authorization broker for the mailrelay OAuth relay
//!
//! Builds provider authorize URLs and performs both token exchanges against
//! provider token endpoints: authorization code → tokens for the callback
//! path, and refresh token → tokens for the proxy path. No session state
//! lives here; the broker is given a resolved `ProviderConfig` and nothing
//! else.

pub mod authorize;
pub mod exchange;

pub use authorize::build_authorize_url;
pub use exchange::TokenExchanger;
