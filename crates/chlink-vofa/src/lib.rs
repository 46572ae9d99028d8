//! VOFA+ "JustFloat" datagrams.
//!
//! A datagram is a run of little-endian `f32` samples closed by a `+inf`
//! tail (`00 00 80 7F`), which the plotter uses to split channels into
//! frames. One datagram carries one batch.

pub mod error;
pub mod sender;
pub mod stream;

pub use error::{Result, VofaError};
pub use sender::VofaSender;
pub use stream::{build_float_matrix, build_vofa_stream, FRAME_TAIL};
