//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Servidor TCP que:
//! 1. Crea un socket IPv4 y lo asocia a la dirección configurada
//! 2. Escucha con un backlog fijo
//! 3. Acepta una conexión a la vez, lee y descarta lo que llegue
//! 4. Responde siempre la misma respuesta HTTP y cierra la conexión

pub mod binder;
pub mod shutdown;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use binder::{Binder, SystemBinder};
pub use shutdown::ShutdownHandle;
pub use tcp::{handle_connection, send_response, SendOutcome, Server};
