use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the route-configuration service
    pub admin_url: String,
    /// Origin probes are sent to (the gateway data plane)
    pub gateway_url: String,
    /// Credential pre-filled in the test panel
    pub api_key: Option<String>,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_url: "http://127.0.0.1:8080".to_string(),
            gateway_url: "http://127.0.0.1:8080".to_string(),
            api_key: None,
            debug: false,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Build the config from an arbitrary variable lookup.
pub fn load_config_from<F>(lookup: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let admin_url = lookup("ROUTE_CONSOLE_ADMIN_URL")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(defaults.admin_url);

    // console and gateway share an origin unless told otherwise
    let gateway_url = lookup("ROUTE_CONSOLE_GATEWAY_URL")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| admin_url.clone());

    let api_key = lookup("ROUTE_CONSOLE_API_KEY").filter(|v| !v.is_empty());

    let debug = lookup("DEBUG").is_some();

    Ok(Config {
        admin_url,
        gateway_url,
        api_key,
        debug,
    })
}
