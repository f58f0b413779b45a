//! # Canned HTTP
//! src/lib.rs
//!
//! Listener TCP mínimo: acepta una conexión a la vez, descarta lo que el
//! cliente envía y responde siempre la misma página HTML por HTTP/1.1.
//!
//! ## Arquitectura
//!
//! - `config`: dirección y puerto (CLI / variables de entorno)
//! - `error`: errores fatales del servidor
//! - `http`: construcción de la respuesta fija
//! - `server`: socket, loop de `accept` y envío de la respuesta
//! - `logging`: salida de diagnóstico a stdout
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use canned_http::config::ServerConfig;
//! use canned_http::server::Server;
//!
//! let mut server = Server::new(ServerConfig::new("127.0.0.1", 8080));
//! server.start_listen().expect("Error fatal del servidor");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod server;
