//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Root of the moderation API, e.g. `http://localhost:3001/api/v1`.
    pub api_base_url: String,
    pub templates_dir: String,
    pub secret: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Domain of the session cookie. Browsers refuse domain cookies for
    /// `localhost`, so it is left host-only there.
    pub fn cookie_domain(&self) -> Option<String> {
        match self.domain.trim() {
            "" | "localhost" => None,
            domain => Some(format!(".{domain}")),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    10
}
