//! route-console - terminal admin console for the gateway routing table
//!
//! This is the composition root that wires together all the components.

use route_console::adapters::inbound::TerminalConsole;
use route_console::adapters::outbound::{HttpProbeClient, HttpRouteAdmin, HttpTransport};
use route_console::application::{ConsoleEvent, ConsoleService, ConsoleState};
use route_console::config::load_config;
use route_console::infrastructure::{shutdown_signal, ShutdownController};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging; stdout belongs to the rendered console
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "starting route-console admin={} gateway={}",
        cfg.admin_url,
        cfg.gateway_url
    );

    // ===== COMPOSITION ROOT =====

    // 1. Outbound adapters, sharing one HTTP client
    let client = reqwest::Client::new();
    let admin = Arc::new(HttpRouteAdmin::new(HttpTransport::with_client(
        client.clone(),
        &cfg.admin_url,
    )?));
    let probe = Arc::new(HttpProbeClient::new(HttpTransport::with_client(
        client,
        &cfg.gateway_url,
    )?));

    // 2. Application service
    let mut initial = ConsoleState::default();
    if let Some(key) = cfg.api_key.clone() {
        initial.apply(ConsoleEvent::TestKeyEdited(key));
    }
    let service = Arc::new(ConsoleService::with_state(admin, probe, initial));

    // 3. Inbound adapter
    let shutdown = ShutdownController::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let console = TerminalConsole::new(service, shutdown);
    console.run().await
}
