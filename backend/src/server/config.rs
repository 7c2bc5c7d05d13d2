//! HTTP server configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Listen on `bind_addr` without serving static assets.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            static_dir: None,
        }
    }

    /// Serve the front-end page from `dir`.
    #[must_use]
    pub fn with_static_dir(mut self, dir: PathBuf) -> Self {
        self.static_dir = Some(dir);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "read by server bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
