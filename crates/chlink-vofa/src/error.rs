/// Errors that can occur while sending VOFA datagrams.
#[derive(Debug, thiserror::Error)]
pub enum VofaError {
    /// The local UDP socket could not be bound.
    #[error("failed to bind UDP socket to {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    /// The target host/port did not resolve.
    #[error("could not resolve {0}")]
    Resolve(String),

    /// Sending a datagram failed.
    #[error("failed to send datagram to {target}: {source}")]
    Send {
        target: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, VofaError>;
