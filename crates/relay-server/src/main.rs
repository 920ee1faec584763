//! mailrelay - multi-provider OAuth2 relay for mail clients
//!
//! Binary entry point: parses flags, wires the registry, session store, and
//! broker together, and serves until interrupted.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use relay_oauth::TokenExchanger;
use relay_providers::{ProviderRegistry, RegistryConfig};
use relay_sessions::{MemoryStore, SessionManager};
use relay_server::{start_server, AppState, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "mailrelay", about = "Multi-provider OAuth2 relay for mail clients")]
struct Args {
    /// Address to bind
    #[arg(long, env = "RELAY_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind
    #[arg(long, env = "RELAY_PORT", default_value_t = 8080)]
    port: u16,

    /// Externally visible origin used for auth_url and redirect_uri.
    /// Defaults to http://<host>:<port>; must match what providers have
    /// registered as the redirect URI.
    #[arg(long, env = "RELAY_PUBLIC_ORIGIN")]
    public_origin: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ServerConfig {
        public_origin: args
            .public_origin
            .unwrap_or_else(|| format!("http://{}:{}", args.host, args.port)),
        host: args.host,
        port: args.port,
    };

    let registry = Arc::new(ProviderRegistry::new(RegistryConfig::from_env()));
    let configured: Vec<_> = registry
        .provider_names()
        .into_iter()
        .filter(|name| registry.resolve(name).is_some())
        .collect();
    tracing::info!("Providers with credentials: {:?}", configured);

    let state = AppState::new(
        registry,
        Arc::new(SessionManager::new(Arc::new(MemoryStore::new()))),
        Arc::new(TokenExchanger::new()),
        config.public_origin.clone(),
    );

    let (handle, _port) = start_server(config, state).await?;
    handle.await?;
    Ok(())
}
