use std::net::SocketAddr;
use std::path::PathBuf;

use error_stack::ResultExt;
use kernel::KernelError;

const SERVER_PORT: &str = "SERVER_PORT";
const LOG_DIR: &str = "LOG_DIR";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_DIR: &str = "./logs/";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the process environment, `.env` included.
    pub fn load() -> error_stack::Result<Self, KernelError> {
        Self::from_vars(dotenvy::var(SERVER_PORT).ok(), dotenvy::var(LOG_DIR).ok())
    }

    fn from_vars(
        port: Option<String>,
        log_dir: Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let port = match port {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .change_context(KernelError::Internal)
                .attach_printable_lazy(|| format!("{SERVER_PORT} is not a port: {raw}"))?,
        };
        let log_dir = PathBuf::from(log_dir.unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()));
        Ok(Self { port, log_dir })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
