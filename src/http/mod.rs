//! # Módulo HTTP
//!
//! No hay parsing de requests: lo único que el servidor sabe de HTTP es
//! cómo armar su respuesta fija.

pub mod response;

pub use response::{build_response, CannedResponse, HTML_BODY};
