use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `5000`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Development posture: error pages carry the failure message.
    /// TOML: `basic.debug`. Default: `true`.
    #[serde(default = "default_true")]
    pub debug: bool,

    /// Directory to load page templates from instead of the built-in ones.
    /// TOML: `basic.template_dir`. Default: unset.
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Re-read templates from `template_dir` on every request.
    /// TOML: `basic.reload`. Default: `true`.
    #[serde(default = "default_true")]
    pub reload: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            loglevel: default_loglevel(),
            debug: true,
            template_dir: None,
            reload: true,
        }
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_listen_port() -> u16 {
    5000
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
