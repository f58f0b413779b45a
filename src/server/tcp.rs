//! # Servidor TCP secuencial
//! src/server/tcp.rs
//!
//! Un solo thread, I/O bloqueante, una conexión a la vez:
//!
//! ```text
//! new -> start_server (socket + bind) -> start_listen {
//!     accept -> read (se descarta) -> write (respuesta fija) -> close
//! }
//! ```
//!
//! Mientras se atiende una conexión, las siguientes esperan en la cola del
//! kernel (backlog de 20). Un cliente lento bloquea a todos los demás.

use crate::config::{ServerConfig, BACKLOG, BUFFER_SIZE};
use crate::error::{Result, ServerError};
use crate::http::{build_response, CannedResponse};
use crate::server::binder::{Binder, SystemBinder};
use crate::server::shutdown::ShutdownHandle;
use socket2::Socket;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::process::ExitCode;
use tracing::{debug, error, info};

/// Resultado de enviar la respuesta a un cliente
///
/// Un envío incompleto o fallido no detiene el servidor: se registra y el
/// loop sigue con la próxima conexión.
#[derive(Debug)]
pub enum SendOutcome {
    /// Se escribieron todos los bytes
    Complete,
    /// `write` aceptó menos bytes de los esperados
    Short { written: usize, expected: usize },
    /// `write` retornó error
    Failed(io::Error),
}

impl SendOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, SendOutcome::Complete)
    }
}

/// Servidor de conexión con respuesta fija
pub struct Server<B: Binder = SystemBinder> {
    config: ServerConfig,
    binder: B,
    response: CannedResponse,
    /// Socket creado y asociado, todavía sin `listen`
    socket: Option<Socket>,
    /// Socket en modo escucha
    listener: Option<TcpListener>,
    /// Conexión que se está atendiendo
    connection: Option<TcpStream>,
    shutdown: ShutdownHandle,
}

impl Server<SystemBinder> {
    /// Crea el servidor e intenta asociar el socket de inmediato
    ///
    /// Si el bind falla solo se registra el error: el servidor queda sin
    /// socket y el próximo `start_listen` falla con `ServerError::NotBound`.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_binder(config, SystemBinder)
    }
}

impl<B: Binder> Server<B> {
    /// Igual que `new` pero con un `Binder` propio
    pub fn with_binder(config: ServerConfig, binder: B) -> Self {
        let mut server = Self {
            config,
            binder,
            response: build_response(),
            socket: None,
            listener: None,
            connection: None,
            shutdown: ShutdownHandle::new(None),
        };

        if let Err(e) = server.start_server() {
            error!("Failed to start server with PORT: {}", server.config.port);
            error!("ERROR: {}", e);
        }

        server
    }

    /// Crea el socket IPv4 y lo asocia a la dirección configurada
    pub fn start_server(&mut self) -> Result<()> {
        let addr = self.config.resolve()?;

        let socket = self.binder.create().map_err(ServerError::SocketCreate)?;
        self.binder
            .bind(&socket, addr)
            .map_err(|source| ServerError::Bind { addr, source })?;

        info!("Socket created.");
        self.socket = Some(socket);
        Ok(())
    }

    /// Pone el socket en modo escucha con `BACKLOG`
    ///
    /// No hace nada si ya está escuchando.
    pub fn listen(&mut self) -> Result<()> {
        if self.listener.is_some() {
            return Ok(());
        }

        let socket = self.socket.take().ok_or(ServerError::NotBound {
            port: self.config.port,
        })?;
        socket.listen(BACKLOG).map_err(ServerError::Listen)?;
        let listener: TcpListener = socket.into();

        match listener.local_addr() {
            Ok(addr) => info!("** Listening on ADDRESS: {} PORT: {} ***", addr.ip(), addr.port()),
            Err(_) => info!("** Listening on ADDRESS: {} ***", self.config.address()),
        }

        self.listener = Some(listener);
        Ok(())
    }

    /// Loop principal del servidor
    ///
    /// Solo retorna `Ok(())` si se disparó un `ShutdownHandle`; cualquier
    /// error que retorne es fatal.
    pub fn start_listen(&mut self) -> Result<()> {
        self.listen()?;

        loop {
            if self.shutdown.is_triggered() {
                break;
            }

            info!("----- Waiting for a new connection -----");
            let (stream, peer) = self.accept_connection()?;

            if self.shutdown.is_triggered() {
                debug!("Shutdown requested, dropping connection from {}", peer);
                break;
            }
            debug!("Connection from {}", peer);

            let stream = self.connection.insert(stream);
            handle_connection(stream, &self.response)?;

            // Cierra la conexión
            self.connection = None;
        }

        info!("Listen loop stopped");
        Ok(())
    }

    /// Bloquea hasta que un cliente se conecta
    pub fn accept_connection(&self) -> Result<(TcpStream, SocketAddr)> {
        let listener = self.listener.as_ref().ok_or(ServerError::NotBound {
            port: self.config.port,
        })?;

        listener.accept().map_err(|source| {
            let (ip, port) = self.bound_location();
            ServerError::Accept { ip, port, source }
        })
    }

    /// IP y puerto efectivos del socket; si no se pueden leer, los configurados
    fn bound_location(&self) -> (String, u16) {
        match self.local_addr() {
            Some(addr) => (addr.ip().to_string(), addr.port()),
            None => (self.config.host.clone(), self.config.port),
        }
    }

    /// Dirección local del socket (útil si se pidió el puerto 0)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        if let Some(listener) = &self.listener {
            return listener.local_addr().ok();
        }
        self.socket.as_ref()?.local_addr().ok()?.as_socket()
    }

    /// ¿Hay un socket asociado (escuchando o no)?
    pub fn is_bound(&self) -> bool {
        self.socket.is_some() || self.listener.is_some()
    }

    /// Handle para detener `start_listen` desde otro thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.with_wake_addr(self.local_addr())
    }

    /// Respuesta que se envía a cada cliente
    pub fn response(&self) -> &CannedResponse {
        &self.response
    }

    /// Cierra el socket de escucha y la conexión abierta, si hay
    pub fn close_server(mut self) -> ExitCode {
        self.connection.take();
        self.listener.take();
        self.socket.take();
        info!("Server closed");
        ExitCode::SUCCESS
    }
}

/// Atiende una conexión: una lectura (descartada) y la respuesta fija
///
/// Un read con cero bytes o parcial es válido. Solo un error de I/O en la
/// lectura es fatal; el resultado del envío se retorna tal cual.
pub fn handle_connection<S: Read + Write>(
    stream: &mut S,
    response: &CannedResponse,
) -> Result<SendOutcome> {
    let mut buffer = [0u8; BUFFER_SIZE];
    let bytes_received = stream.read(&mut buffer).map_err(ServerError::Read)?;

    info!("----- Received Request from client -----");
    debug!("{} bytes received", bytes_received);

    Ok(send_response(stream, response))
}

/// Escribe la respuesta fija con una sola llamada a `write`
pub fn send_response<W: Write>(stream: &mut W, response: &CannedResponse) -> SendOutcome {
    let expected = response.len();

    let outcome = match stream.write(response.as_bytes()) {
        Ok(written) if written == expected => SendOutcome::Complete,
        Ok(written) => SendOutcome::Short { written, expected },
        Err(e) => SendOutcome::Failed(e),
    };

    match &outcome {
        SendOutcome::Complete => info!("----- Server Response sent to client -----"),
        SendOutcome::Short { written, expected } => {
            error!("Error sending response to client ({} of {} bytes)", written, expected)
        }
        SendOutcome::Failed(e) => error!("Error sending response to client: {}", e),
    }

    outcome
}
