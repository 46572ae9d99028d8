//! Decode HiPNUC CH100 AHRS telemetry and relay it to VOFA+.
//!
//! # Crate Structure
//!
//! - [`frame`] — Sync scanning, CRC-16 validation and HI91 payload decoding
//! - [`source`] — Sample sources (waveform, serial floats, UDP floats, AHRS)
//! - [`vofa`] — JustFloat datagram building and UDP sending
//!
//! The `chlink` binary (behind the `cli` feature) wires these together.

/// Re-export frame types.
pub mod frame {
    pub use chlink_frame::*;
}

/// Re-export sample source types.
pub mod source {
    pub use chlink_source::*;
}

/// Re-export VOFA types.
pub mod vofa {
    pub use chlink_vofa::*;
}
