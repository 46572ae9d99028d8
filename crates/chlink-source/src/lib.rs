//! Sample sources feeding the chlink relay.
//!
//! Every source implements [`SampleSource`]: one call, one batch of `f32`
//! samples. Which source runs is a configuration decision made by the caller.
//!
//! - [`Waveform`] synthesizes sine or cosine channels
//! - [`FloatStreamSource`] reads raw little-endian floats from any `Read`
//! - [`UdpFloatSource`] collects little-endian floats from UDP datagrams
//! - [`AhrsSource`] decodes CH100 frames and yields roll, pitch and yaw

pub mod ahrs;
pub mod error;
pub mod floats;
pub mod serial;
pub mod traits;
pub mod udp;
pub mod waveform;

pub use ahrs::AhrsSource;
pub use error::{Result, SourceError};
pub use floats::FloatStreamSource;
pub use serial::SerialStream;
pub use traits::SampleSource;
pub use udp::UdpFloatSource;
pub use waveform::{WaveKind, Waveform};
