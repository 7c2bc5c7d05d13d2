//! Server settings loaded via OrthoConfig.
//!
//! Values come from `--host`/`--port`/`--static-dir` flags, `REFERRALS_*`
//! environment variables or a configuration file.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_STATIC_DIR: &str = "public";

fn default_static_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STATIC_DIR)
}

/// Listener and asset settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REFERRALS")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Directory holding `index.html` and its scripts.
    pub static_dir: Option<PathBuf>,
}

impl ServerSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured asset directory, falling back to `public/` under the
    /// working directory.
    pub fn static_dir(&self) -> PathBuf {
        self.static_dir.clone().unwrap_or_else(default_static_dir)
    }

    /// Resolve host and port to the first matching socket address.
    ///
    /// # Errors
    /// Returns an error when the host cannot be resolved.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no address found for {}:{}", self.host(), self.port),
                )
            })
    }
}
