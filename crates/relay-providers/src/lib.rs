//! Provider registry for the mailrelay OAuth relay
//!
//! Maps a provider name (`google`, `yahoo`, ...) to its OAuth endpoint
//! configuration. The endpoint table is static; only the client credentials
//! are injected at startup from deployment configuration.

pub mod config;
pub mod registry;

pub use config::RegistryConfig;
pub use registry::{CredentialTransmission, ProviderConfig, ProviderRegistry};
