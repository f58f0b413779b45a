//! # Errores del Servidor
//! src/error.rs
//!
//! Todos los errores de este módulo son fatales: `main` los registra y
//! termina el proceso con código 1. El envío incompleto de la respuesta
//! NO es un error (ver `server::tcp::SendOutcome`).

use std::io;
use std::net::SocketAddrV4;
use thiserror::Error;

/// Resultado de las operaciones del servidor
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errores fatales del servidor
#[derive(Debug, Error)]
pub enum ServerError {
    /// El host configurado no resuelve a IPv4
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// No se pudo crear el socket
    #[error("Cannot create socket. errno: {0}")]
    SocketCreate(#[source] io::Error),

    /// No se pudo asociar el socket a la dirección
    #[error("Cannot connect socket to address {addr}: {source}")]
    Bind {
        addr: SocketAddrV4,
        #[source]
        source: io::Error,
    },

    /// Se intentó escuchar sin un socket asociado
    #[error("Socket is not bound (PORT: {port})")]
    NotBound { port: u16 },

    /// Falló `listen`
    #[error("Socket listen: {0}")]
    Listen(#[source] io::Error),

    /// Falló `accept`
    #[error("Server failed to accept incoming connection from ADDRESS: {ip} PORT: {port}: {source}")]
    Accept {
        ip: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// Falló la lectura a nivel de sistema operativo
    #[error("Failed to read bytes from client socket connection: {0}")]
    Read(#[source] io::Error),
}

impl ServerError {
    /// Código de salida del proceso para este error
    pub fn exit_code(&self) -> u8 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_every_error_exits_with_one() {
        let errors = vec![
            ServerError::SocketCreate(io::Error::from(io::ErrorKind::PermissionDenied)),
            ServerError::NotBound { port: 8080 },
            ServerError::Listen(io::Error::from(io::ErrorKind::Other)),
            ServerError::Read(io::Error::from(io::ErrorKind::ConnectionReset)),
        ];
        for error in errors {
            assert_eq!(error.exit_code(), 1);
        }
    }

    #[test]
    fn test_bind_message_names_address() {
        let error = ServerError::Bind {
            addr: SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8080),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };
        assert!(error.to_string().contains("127.0.0.1:8080"));
    }

    #[test]
    fn test_accept_message_names_port() {
        let error = ServerError::Accept {
            ip: "127.0.0.1".to_string(),
            port: 9000,
            source: io::Error::from(io::ErrorKind::Other),
        };
        let text = error.to_string();
        assert!(text.contains("ADDRESS: 127.0.0.1"));
        assert!(text.contains("PORT: 9000"));
    }
}
