//! Server configuration
//!
//! `serve` reads an optional TOML file; command-line flags override whatever
//! the file says.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// Settings for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind: String,
    /// Number of request worker threads.
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            workers: 4,
        }
    }
}

impl ServerConfig {
    /// Load settings from a TOML file. Missing keys fall back to defaults;
    /// unknown keys are rejected.
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
