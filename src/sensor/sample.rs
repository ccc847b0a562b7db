//! One sample pair as read from the sensor FIFO.

use crate::config::SAMPLE_MASK;

/// Bytes per FIFO record: three for RED, then three for IR, MSB first.
pub const FIFO_RECORD_LEN: usize = 6;

/// RED and IR ADC counts taken at the same instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Sample {
    pub red: u32,
    pub ir: u32,
}

impl Sample {
    /// Build a sample, masking both channels to the 18-bit ADC range.
    #[inline]
    pub const fn new(
        red: u32,
        ir: u32,
    ) -> Self {
        Self {
            red: red & SAMPLE_MASK,
            ir: ir & SAMPLE_MASK,
        }
    }

    /// Decode a FIFO record. The top six bits of each channel are unused.
    pub const fn from_fifo_bytes(bytes: [u8; FIFO_RECORD_LEN]) -> Self {
        let red = (bytes[0] as u32) << 16 | (bytes[1] as u32) << 8 | bytes[2] as u32;
        let ir = (bytes[3] as u32) << 16 | (bytes[4] as u32) << 8 | bytes[5] as u32;
        Self::new(red, ir)
    }
}
