//! Error taxonomy for RDA58xx operations

use core::ops::RangeInclusive;

use thiserror::Error;

use crate::registers::InvalidTuning;

/// An error from operating the RDA58xx.
///
/// `E` is the error type of the underlying I2C bus. Every failure is
/// reported to the immediate caller and never retried internally: an I2C
/// failure usually points at wiring or configuration, not transient
/// contention, so the caller decides whether to retry or abandon the
/// handle. No error here is fatal to the process.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error<E> {
    /// No I2C bus is registered under the requested name.
    #[error("no i2c bus named `{0}`")]
    BusNotFound(String),

    /// The platform could not allocate the resources backing the handle.
    #[error("out of resources while binding the bus")]
    ResourceExhausted,

    /// The bus transaction did not complete.
    #[error("i2c transfer failed: {0:?}")]
    Transport(E),

    /// The handle's register lock could not be acquired because a previous
    /// holder panicked. The register access is not attempted.
    #[error("register lock poisoned")]
    Lock,

    /// SPACE[1:0] in the tuning register holds the reserved value 0b11.
    #[error("unsupported channel spacing selector {0:#04b}")]
    UnsupportedSpacing(u8),

    /// BAND[1:0] in the tuning register holds a selector other than 0b00
    /// or 0b01.
    #[error("unsupported band selector {0:#04b}")]
    UnsupportedBand(u8),

    /// The requested frequency lies outside the band currently selected in
    /// the tuning register.
    #[error("frequency ({frequency_khz} kHz) out of range ({}..={} kHz)", .range.start(), .range.end())]
    FrequencyOutOfRange {
        /// The rejected frequency.
        frequency_khz: u32,
        /// The inclusive range of the active band, in kHz.
        range: RangeInclusive<u32>,
    },
}

impl<E> From<InvalidTuning> for Error<E> {
    fn from(err: InvalidTuning) -> Self {
        match err {
            InvalidTuning::Spacing(bits) => Self::UnsupportedSpacing(bits),
            InvalidTuning::Band(bits) => Self::UnsupportedBand(bits),
        }
    }
}
