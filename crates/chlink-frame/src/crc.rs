//! CRC-16 used by CH100 frames.
//!
//! Polynomial 0x1021, MSB first, no reflection and no final XOR: the
//! CRC-16/XMODEM parameter set, with the seed taking the place of its zero
//! initial value.

use ::crc::{Crc, CRC_16_XMODEM};

const CH100_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Fold `bytes` into a running CRC register.
///
/// The register is the only state, so checksums can be chained:
/// `crc16(crc16(seed, a), b) == crc16(seed, a ++ b)`.
pub fn crc16(seed: u16, bytes: &[u8]) -> u16 {
    let mut digest = CH100_CRC.digest_with_initial(seed);
    digest.update(bytes);
    digest.finalize()
}
