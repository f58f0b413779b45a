//! # Canned HTTP - Entry Point
//! src/main.rs
//!
//! Los errores fatales terminan el proceso con código 1.

use canned_http::config::ServerConfig;
use canned_http::logging;
use canned_http::server::Server;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    logging::setup_logging();

    // Configuración desde CLI o entorno
    let config = ServerConfig::from_args();
    if let Err(e) = config.validate() {
        error!("ERROR: Invalid configuration: {}", e);
        return ExitCode::from(1);
    }
    config.log_summary();

    let mut server = Server::new(config);

    // Bloquea hasta un error fatal
    match server.start_listen() {
        Ok(()) => server.close_server(),
        Err(e) => {
            error!("ERROR: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
