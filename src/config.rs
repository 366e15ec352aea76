use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

use crate::error::PkceError;

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Authorization server base URL; `/authorize` is appended to it.
    pub server_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    // Optional daily-rotated log file directory for the CLI
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default = "default_log_file_name")]
    pub log_file_name: String,
}

fn default_scopes() -> Vec<String> {
    vec!["read".to_string()]
}
fn default_log_file_name() -> String { "pkce-check.log".into() }

impl ClientConfig {
    pub fn from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let cfg: ClientConfig = toml::from_str(&s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject empty required fields and an unparsable server URL.
    pub fn validate(&self) -> Result<(), PkceError> {
        for (name, value) in [
            ("server_url", &self.server_url),
            ("client_id", &self.client_id),
            ("redirect_uri", &self.redirect_uri),
        ] {
            if value.trim().is_empty() {
                return Err(PkceError::InvalidConfig(format!("you must provide {}", name)));
            }
        }
        let server = Url::parse(&self.server_url)?;
        if server.query().is_some() || server.fragment().is_some() {
            return Err(PkceError::InvalidConfig(
                "server_url must not carry a query or fragment".to_string(),
            ));
        }
        if server.cannot_be_a_base() {
            return Err(PkceError::InvalidConfig(
                "server_url must be a hierarchical url".to_string(),
            ));
        }
        if self.scopes.is_empty() {
            return Err(PkceError::InvalidConfig(
                "you must provide a list of scopes".to_string(),
            ));
        }
        Ok(())
    }

    /// Scopes as sent in the `scope` query parameter (comma separated).
    pub fn scope(&self) -> String {
        self.scopes.join(",")
    }
}
