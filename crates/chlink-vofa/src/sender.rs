use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use crate::error::{Result, VofaError};
use crate::stream::build_vofa_stream;

/// Sends one JustFloat datagram per batch to a fixed target.
#[derive(Debug)]
pub struct VofaSender {
    socket: UdpSocket,
    target: SocketAddr,
}

impl VofaSender {
    /// Resolve `host:port` and bind an ephemeral local socket.
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let target = (host, port)
            .to_socket_addrs()
            .map_err(|_| VofaError::Resolve(format!("{host}:{port}")))?
            .next()
            .ok_or_else(|| VofaError::Resolve(format!("{host}:{port}")))?;
        Self::with_target(target)
    }

    pub fn with_target(target: SocketAddr) -> Result<Self> {
        let local: SocketAddr = if target.is_ipv4() {
            ([0u8; 4], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        let socket = UdpSocket::bind(local).map_err(|source| VofaError::Bind {
            addr: local.to_string(),
            source,
        })?;
        tracing::debug!(dest = %target, "vofa sender ready");
        Ok(Self { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Send `samples` as one datagram; returns the bytes sent.
    pub fn send(&self, samples: &[f32]) -> Result<usize> {
        let datagram = build_vofa_stream(samples);
        let sent = self
            .socket
            .send_to(&datagram, self.target)
            .map_err(|source| VofaError::Send {
                target: self.target.to_string(),
                source,
            })?;
        tracing::trace!(
            dest = %self.target,
            bytes = sent,
            samples = samples.len(),
            "vofa datagram sent"
        );
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::stream::FRAME_TAIL;

    #[test]
    fn datagram_reaches_loopback_receiver() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let port = receiver.local_addr().unwrap().port();

        let sender = VofaSender::connect("127.0.0.1", port).unwrap();
        let sent = sender.send(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(sent, 16);

        let mut buf = [0u8; 64];
        let (len, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(len, 16);
        assert_eq!(f32::from_le_bytes(buf[8..12].try_into().unwrap()), 3.0);
        assert_eq!(&buf[12..16], &FRAME_TAIL);
    }

    #[test]
    fn target_is_resolved_once() {
        let sender = VofaSender::connect("127.0.0.1", 5000).unwrap();
        assert_eq!(sender.target(), "127.0.0.1:5000".parse().unwrap());
    }
}
