//! # Logging
//! src/logging.rs
//!
//! Todas las líneas de diagnóstico van a stdout como texto plano: sin
//! timestamps, sin target y sin columna de nivel. Los errores fatales
//! llevan el prefijo `ERROR: ` dentro del propio mensaje.
//! El filtro se toma de `RUST_LOG` (por defecto `info`).

use std::io;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Capa de formato de línea plana sobre el writer dado
pub fn plain_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::Layer::new()
        .without_time()
        .with_target(false)
        .with_level(false)
        .compact()
        .with_ansi(false)
        .with_writer(writer)
}

/// Instala el subscriber global
///
/// Si ya hay uno instalado (por ejemplo, al correr varios tests en el
/// mismo proceso) no hace nada.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(plain_layer(io::stdout))
        .try_init();
}
