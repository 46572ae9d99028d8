use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use bytes::Buf;

use crate::error::{Result, SourceError};
use crate::traits::SampleSource;

const MAX_DATAGRAM: usize = 1024;

/// Collects little-endian `f32` values from UDP datagrams.
///
/// Each batch keeps receiving until at least `channels` values arrived and
/// returns every value collected, so a batch may exceed `channels`. Bytes
/// past the last whole float of a datagram are ignored.
///
/// If the read timeout fires after some values arrived, the short batch is
/// returned; a timeout with nothing collected surfaces as an I/O error.
#[derive(Debug)]
pub struct UdpFloatSource {
    socket: UdpSocket,
    channels: usize,
    buf: Vec<u8>,
}

impl UdpFloatSource {
    /// Bind to `host:port`.
    pub fn bind(host: &str, port: u16, channels: usize) -> Result<Self> {
        let addr = (host, port)
            .to_socket_addrs()
            .map_err(|_| SourceError::Resolve(format!("{host}:{port}")))?
            .next()
            .ok_or_else(|| SourceError::Resolve(format!("{host}:{port}")))?;
        Self::bind_addr(addr, channels)
    }

    pub fn bind_addr(addr: SocketAddr, channels: usize) -> Result<Self> {
        let socket = UdpSocket::bind(addr).map_err(|err| SourceError::bind(addr, err))?;
        tracing::debug!(%addr, channels, "udp source bound");
        Ok(Self {
            socket,
            channels,
            buf: vec![0u8; MAX_DATAGRAM],
        })
    }

    /// Set a receive timeout. See the type docs for how timeouts end a batch.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.socket.set_read_timeout(timeout)?;
        Ok(())
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

impl SampleSource for UdpFloatSource {
    fn next_batch(&mut self) -> Result<Vec<f32>> {
        let mut batch = Vec::with_capacity(self.channels);
        while batch.len() < self.channels {
            let (len, peer) = match self.socket.recv_from(&mut self.buf) {
                Ok(received) => received,
                Err(err)
                    if !batch.is_empty()
                        && matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) =>
                {
                    tracing::debug!(values = batch.len(), "udp read timed out, returning short batch");
                    break;
                }
                Err(err) => return Err(err.into()),
            };
            tracing::trace!(%peer, len, "udp datagram received");

            let mut datagram = &self.buf[..len - len % 4];
            while datagram.has_remaining() {
                batch.push(datagram.get_f32_le());
            }
        }
        Ok(batch)
    }
}
