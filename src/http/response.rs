//! # Respuesta HTTP fija
//!
//! El servidor responde exactamente los mismos bytes a todas las
//! conexiones. Se calculan una sola vez al construir el servidor.
//!
//! ## Formato
//!
//! Las líneas terminan en `\n` (no `\r\n`), igual que el servidor con el
//! que este debe ser compatible byte a byte:
//!
//! ```text
//! HTTP/1.1 200 OK\n
//! Content-Type: text/html\n
//! Content-Length: 86\n
//! \n
//! <!DOCTYPE html>...
//! ```

/// Status line de la respuesta
pub const STATUS_LINE: &str = "HTTP/1.1 200 OK";

/// Tipo de contenido anunciado
pub const CONTENT_TYPE: &str = "text/html";

/// Cuerpo HTML que se envía a cada cliente
pub const HTML_BODY: &str = "<!DOCTYPE html><html lang=\"en\"><body><h1>Web Server Test</h1><p>Yep.</p></body></html>";

/// Separador de líneas en la respuesta
const LINE_END: &str = "\n";

/// Secuencia de bytes precalculada e inmutable
///
/// Invariante: el valor de `Content-Length` es el largo exacto en bytes
/// del cuerpo que le sigue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedResponse {
    bytes: Vec<u8>,
    body_len: usize,
}

impl CannedResponse {
    /// Construye la respuesta con `HTML_BODY`
    pub fn new() -> Self {
        Self::with_body(HTML_BODY)
    }

    /// Construye la respuesta con un cuerpo HTML arbitrario
    ///
    /// # Ejemplo
    /// ```
    /// use canned_http::http::CannedResponse;
    ///
    /// let response = CannedResponse::with_body("<p>hola</p>");
    /// assert_eq!(response.content_length(), 11);
    /// ```
    pub fn with_body(body: &str) -> Self {
        let head = format!(
            "{STATUS_LINE}{LINE_END}Content-Type: {CONTENT_TYPE}{LINE_END}Content-Length: {}{LINE_END}{LINE_END}",
            body.len()
        );

        let mut bytes = Vec::with_capacity(head.len() + body.len());
        bytes.extend_from_slice(head.as_bytes());
        bytes.extend_from_slice(body.as_bytes());

        Self {
            bytes,
            body_len: body.len(),
        }
    }

    /// Bytes listos para escribir en el socket
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Largo total de la respuesta
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Valor anunciado en `Content-Length`
    pub fn content_length(&self) -> usize {
        self.body_len
    }

    /// Porción del cuerpo (lo que sigue a la línea vacía)
    pub fn body(&self) -> &[u8] {
        &self.bytes[self.bytes.len() - self.body_len..]
    }
}

impl Default for CannedResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Construye la respuesta fija del servidor
///
/// Función pura; el servidor la llama una sola vez.
pub fn build_response() -> CannedResponse {
    CannedResponse::new()
}
