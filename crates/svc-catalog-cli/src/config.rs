//! CLI configuration.

use svc_catalog_client::SessionConfig;

/// Settings shared by every subcommand.
pub struct Config {
    /// Extra request headers as raw `Name: value` strings.
    pub headers: Vec<String>,

    /// Whole-request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// User-Agent override.
    pub user_agent: Option<String>,
}

impl Config {
    /// Build the transport session configuration.
    pub fn session_config(&self) -> Result<SessionConfig, String> {
        let mut config = SessionConfig {
            timeout_secs: self.timeout_secs,
            ..SessionConfig::default()
        };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        for raw in &self.headers {
            config.headers.push(parse_header(raw)?);
        }
        Ok(config)
    }
}

/// Split `Name: value` (or `Name=value`) into its parts.
fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .or_else(|| raw.split_once('='))
        .ok_or_else(|| format!("invalid header '{}', expected NAME:VALUE", raw))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid header '{}', empty name", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
