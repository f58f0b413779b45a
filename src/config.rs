//! # Configuración del Servidor
//! src/config.rs
//!
//! Define la configuración del servidor: una dirección IPv4 (o un hostname
//! que resuelva a IPv4) y un puerto. Se puede dar por CLI o por variables
//! de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./canned_http --host 0.0.0.0 --port 8080
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 ./canned_http
//! ```

use crate::error::ServerError;
use clap::Parser;
use std::net::{SocketAddr, SocketAddrV4, ToSocketAddrs};
use tracing::info;

/// Conexiones pendientes que el kernel encola antes del `accept`
pub const BACKLOG: i32 = 20;

/// Capacidad del buffer de lectura por conexión (bytes)
pub const BUFFER_SIZE: usize = 30720;

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "canned_http")]
#[command(about = "Servidor TCP secuencial que responde siempre la misma página HTML")]
#[command(version = "0.1.0")]
pub struct ServerConfig {
    /// Host/IP en el que escucha (debe resolver a IPv4)
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor (0 = puerto efímero)
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,
}

impl ServerConfig {
    /// Crea una configuración a partir de host y puerto
    ///
    /// # Ejemplo
    /// ```rust
    /// use canned_http::config::ServerConfig;
    ///
    /// let config = ServerConfig::new("127.0.0.1", 8080);
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parsea la configuración desde argumentos CLI y entorno
    pub fn from_args() -> Self {
        ServerConfig::parse()
    }

    /// Obtiene la dirección completa (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resuelve el host a la primera dirección IPv4 disponible
    ///
    /// Acepta un dotted-quad o un hostname. Si el host solo resuelve a
    /// IPv6 (o no resuelve) retorna `ServerError::InvalidAddress`.
    ///
    /// # Ejemplo
    /// ```rust
    /// use canned_http::config::ServerConfig;
    /// use std::net::{Ipv4Addr, SocketAddrV4};
    ///
    /// let addr = ServerConfig::new("127.0.0.1", 9000).resolve().unwrap();
    /// assert_eq!(addr, SocketAddrV4::new(Ipv4Addr::LOCALHOST, 9000));
    /// ```
    pub fn resolve(&self) -> Result<SocketAddrV4, ServerError> {
        let invalid = |reason: String| ServerError::InvalidAddress {
            address: self.address(),
            reason,
        };

        let mut candidates = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?;

        candidates
            .find_map(|addr| match addr {
                SocketAddr::V4(v4) => Some(v4),
                SocketAddr::V6(_) => None,
            })
            .ok_or_else(|| invalid("host does not resolve to an IPv4 address".to_string()))
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        Ok(())
    }

    /// Registra un resumen de la configuración en el log
    pub fn log_summary(&self) {
        info!("Configuración:");
        info!("   Host:        {}", self.host);
        info!("   Puerto:      {}", self.port);
        info!("   Backlog:     {}", BACKLOG);
        info!("   Buffer:      {} bytes", BUFFER_SIZE);
    }
}

impl Default for ServerConfig {
    /// Configuración por defecto
    fn default() -> Self {
        Self::new("127.0.0.1", 8080)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_address() {
        let config = ServerConfig::default();
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_address_custom() {
        let config = ServerConfig::new("0.0.0.0", 3000);
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    // ==================== Resolución ====================

    #[test]
    fn test_resolve_dotted_quad() {
        let addr = ServerConfig::new("10.1.2.3", 4242).resolve().unwrap();
        assert_eq!(*addr.ip(), Ipv4Addr::new(10, 1, 2, 3));
        assert_eq!(addr.port(), 4242);
    }

    #[test]
    fn test_resolve_localhost_hostname() {
        let addr = ServerConfig::new("localhost", 8080).resolve().unwrap();
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_resolve_ipv6_only_rejected() {
        let result = ServerConfig::new("::1", 8080).resolve();
        assert!(matches!(result, Err(ServerError::InvalidAddress { .. })));
    }

    #[test]
    fn test_resolve_garbage_rejected() {
        let result = ServerConfig::new("999.1.1.1", 8080).resolve();
        assert!(matches!(result, Err(ServerError::InvalidAddress { .. })));
    }

    // ==================== Validación ====================

    #[test]
    fn test_validate_success() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let result = ServerConfig::new("  ", 8080).validate();
        assert!(result.unwrap_err().contains("Host"));
    }

    // ==================== CLI ====================

    #[test]
    fn test_parse_cli_args() {
        let config = ServerConfig::try_parse_from(["canned_http", "--host", "0.0.0.0", "-p", "9090"]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_parse_cli_rejects_out_of_range_port() {
        let result = ServerConfig::try_parse_from(["canned_http", "--port", "70000"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_constants() {
        assert_eq!(BACKLOG, 20);
        assert_eq!(BUFFER_SIZE, 30720);
    }
}
