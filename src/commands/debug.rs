//! Debugger attach point.
//!
//! With `--debug` the run blocks until a client connects to the configured
//! address, giving a debugger time to attach before the first sample.

use crate::utils::config::{DEFAULT_DEBUG_IP, DEFAULT_DEBUG_PORT};
use log::info;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpListener};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugAttach {
    pub ip: IpAddr,
    pub port: u16,
}

impl Default for DebugAttach {
    fn default() -> Self {
        Self {
            ip: DEFAULT_DEBUG_IP.parse().unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            port: DEFAULT_DEBUG_PORT,
        }
    }
}

impl DebugAttach {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self { ip, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }

    pub fn listen(&self) -> io::Result<TcpListener> {
        TcpListener::bind(self.socket_addr())
    }

    /// Block until one client connects, then return its address
    pub fn wait_for_client(&self) -> io::Result<SocketAddr> {
        let listener = self.listen()?;
        info!("Waiting for debugger on {}", listener.local_addr()?);
        accept_client(&listener)
    }
}

pub fn accept_client(listener: &TcpListener) -> io::Result<SocketAddr> {
    let (_stream, peer) = listener.accept()?;
    info!("Debugger attached from {}", peer);
    Ok(peer)
}
