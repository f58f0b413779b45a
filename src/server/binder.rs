//! # Creación y bind del socket
//! src/server/binder.rs
//!
//! `Binder` separa las dos llamadas al sistema que hace `start_server`
//! (crear el socket y asociarlo a la dirección) para que los tests puedan
//! simular fallos sin tocar el proceso real.

use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddrV4;

/// Crea y asocia el socket de escucha
pub trait Binder {
    /// Crea un socket IPv4 orientado a stream
    fn create(&self) -> io::Result<Socket>;

    /// Asocia el socket a la dirección
    fn bind(&self, socket: &Socket, addr: SocketAddrV4) -> io::Result<()>;
}

/// Implementación real sobre el sistema operativo
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBinder;

impl Binder for SystemBinder {
    fn create(&self) -> io::Result<Socket> {
        Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
    }

    fn bind(&self, socket: &Socket, addr: SocketAddrV4) -> io::Result<()> {
        socket.bind(&addr.into())
    }
}

impl<B: Binder + ?Sized> Binder for &B {
    fn create(&self) -> io::Result<Socket> {
        (**self).create()
    }

    fn bind(&self, socket: &Socket, addr: SocketAddrV4) -> io::Result<()> {
        (**self).bind(socket, addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, TcpListener};

    #[test]
    fn test_system_binder_ephemeral_port() {
        let binder = SystemBinder;
        let socket = binder.create().unwrap();
        binder.bind(&socket, SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0)).unwrap();

        let local = socket.local_addr().unwrap().as_socket_ipv4().unwrap();
        assert_eq!(*local.ip(), Ipv4Addr::LOCALHOST);
        assert_ne!(local.port(), 0);
    }

    #[test]
    fn test_system_binder_port_in_use() {
        let taken = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let binder = SystemBinder;
        let socket = binder.create().unwrap();
        let result = binder.bind(&socket, SocketAddrV4::new(Ipv4Addr::LOCALHOST, port));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::AddrInUse);
    }
}
