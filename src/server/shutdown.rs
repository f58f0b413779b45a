//! # Señal de parada
//! src/server/shutdown.rs
//!
//! El loop principal bloquea en `accept`, así que levantar la bandera no
//! basta: `trigger` además abre una conexión de despertar contra el
//! listener. El loop revisa la bandera antes de esperar y justo después
//! de cada `accept`.

use std::net::{SocketAddr, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Timeout de la conexión de despertar
const WAKE_TIMEOUT: Duration = Duration::from_secs(1);

/// Handle clonable para detener el loop de `start_listen` desde otro thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    wake_addr: Option<SocketAddr>,
}

impl ShutdownHandle {
    /// Crea un handle. `wake_addr` es la dirección local del listener.
    pub fn new(wake_addr: Option<SocketAddr>) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            wake_addr,
        }
    }

    /// Pide la parada y despierta un `accept` bloqueado
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);

        if let Some(addr) = self.wake_addr {
            let addr = wake_target(addr);
            match TcpStream::connect_timeout(&addr, WAKE_TIMEOUT) {
                Ok(_) => debug!("Wake-up connection sent to {}", addr),
                Err(e) => debug!("Wake-up connection to {} failed: {}", addr, e),
            }
        }
    }

    /// Otro handle con la misma bandera pero con dirección de despertar
    pub fn with_wake_addr(&self, wake_addr: Option<SocketAddr>) -> Self {
        Self {
            flag: Arc::clone(&self.flag),
            wake_addr,
        }
    }

    /// ¿Se pidió la parada?
    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Un listener en 0.0.0.0 no acepta conexiones a 0.0.0.0; se usa loopback
fn wake_target(addr: SocketAddr) -> SocketAddr {
    if addr.ip().is_unspecified() {
        SocketAddr::from(([127, 0, 0, 1], addr.port()))
    } else {
        addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_not_triggered_by_default() {
        let handle = ShutdownHandle::new(None);
        assert!(!handle.is_triggered());
    }

    #[test]
    fn test_trigger_is_shared_between_clones() {
        let handle = ShutdownHandle::new(None);
        let clone = handle.clone();
        clone.trigger();
        assert!(handle.is_triggered());
    }

    #[test]
    fn test_with_wake_addr_shares_flag() {
        let handle = ShutdownHandle::new(None);
        let other = handle.with_wake_addr(None);
        other.trigger();
        assert!(handle.is_triggered());
    }

    #[test]
    fn test_trigger_wakes_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let handle = ShutdownHandle::new(Some(listener.local_addr().unwrap()));

        handle.trigger();

        // La conexión de despertar ya está en la cola del listener
        assert!(listener.accept().is_ok());
    }

    #[test]
    fn test_wake_target_unspecified() {
        let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
        assert_eq!(wake_target(addr), SocketAddr::from(([127, 0, 0, 1], 8080)));
    }
}
