//! UDP request/response adapter.
//!
//! One datagram in, one datagram out, strictly in order. The bridge reads
//! the next request only after the previous answer has been sent, which is
//! what keeps appliance access serialized.
//!
//! `std::net` works unchanged on ESP-IDF (lwIP sockets), so this adapter is
//! shared by both targets.

use std::io;
use std::net::{SocketAddr, UdpSocket};

use log::{debug, info, warn};

use crate::app::ports::{EventSink, MachinePort};
use crate::app::service::BridgeService;
use crate::rpc::engine::RpcEngine;

/// Largest request datagram accepted.
pub const MAX_DATAGRAM: usize = 1024;

/// Blocking UDP front end for the [`RpcEngine`].
pub struct UdpServer {
    socket: UdpSocket,
    engine: RpcEngine,
    buf: [u8; MAX_DATAGRAM],
}

impl UdpServer {
    /// Bind on all interfaces at `port`.
    pub fn bind(port: u16) -> io::Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", port))?;
        info!("UDP listening on {}", socket.local_addr()?);
        Ok(Self::from_socket(socket))
    }

    pub fn from_socket(socket: UdpSocket) -> Self {
        Self {
            socket,
            engine: RpcEngine::new(),
            buf: [0; MAX_DATAGRAM],
        }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn engine(&self) -> &RpcEngine {
        &self.engine
    }

    /// Receive one request, handle it, and answer the sender.
    pub fn serve_once(
        &mut self,
        app: &mut BridgeService,
        machine: &mut impl MachinePort,
        sink: &mut impl EventSink,
    ) -> io::Result<SocketAddr> {
        let (len, peer) = self.socket.recv_from(&mut self.buf)?;
        debug!("UDP: {} bytes from {}", len, peer);

        let answer = self
            .engine
            .handle_request(&self.buf[..len], app, machine, sink);
        self.socket.send_to(&answer, peer)?;
        Ok(peer)
    }

    /// Serve forever. Socket errors are logged and the loop continues.
    pub fn run(
        &mut self,
        app: &mut BridgeService,
        machine: &mut impl MachinePort,
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            if let Err(e) = self.serve_once(app, machine, sink) {
                warn!("UDP: {}", e);
            }
        }
    }
}
