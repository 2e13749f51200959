//! Register definitions for the RDA58xx
//!
//! The chip exposes a file of 16-bit registers, transferred high byte
//! first on the wire. Only the registers this driver touches are modeled:
//!
//! - 0x02: power configuration ([`PowerConfig`])
//! - 0x03: tuning ([`Tuning`]): band, spacing, channel and tune request
//! - 0x05, 0x16: written once during power-up with vendor-recommended
//!   defaults the datasheet does not break down ([`SYSTEM_DEFAULT`],
//!   [`INTERNAL_DEFAULT`])

use core::convert::Infallible;
use core::ops::RangeInclusive;

use bitflags::bitflags;
use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};
use thiserror::Error;

/// Bus address the chip responds at. Not configurable.
pub const I2C_ADDRESS: u8 = 0x11;

/// Power configuration register address.
pub const REG_POWER: u8 = 0x02;

/// Tuning register address.
pub const REG_TUNING: u8 = 0x03;

/// System configuration register address.
pub const REG_SYSTEM: u8 = 0x05;

/// Undocumented register written during power-up.
pub const REG_INTERNAL: u8 = 0x16;

/// Power-up value for the system configuration register (0x05).
///
/// Vendor-recommended; the driver treats it as opaque.
pub const SYSTEM_DEFAULT: u16 = 0x8848;

/// Power-up value for register 0x16. Opaque, as above.
pub const INTERNAL_DEFAULT: u16 = 0xC000;

bitflags! {
    /// Power configuration register (address: 0x02)
    ///
    /// Only the bits exercised by the power-up sequence are named here;
    /// the rest of the register stays at its reset value of zero.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PowerConfig: u16 {
        /// Audio output stage enable (high impedance when clear)
        const DHIZ = 1 << 15;
        /// Un-mute the audio output
        const DMUTE = 1 << 14;
        /// Soft reset: restores every register to its default value
        const SOFT_RESET = 1 << 1;
        /// Power the chip up
        const ENABLE = 1;
        /// Value written to bring the chip out of reset, audio enabled
        const POWER_UP = Self::DHIZ.bits() | Self::DMUTE.bits() | Self::ENABLE.bits();
    }
}

/// Channel spacing selector (SPACE[1:0], tuning register bits [1:0])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// 100 kHz between adjacent channels
    Khz100,
    /// 200 kHz between adjacent channels
    Khz200,
    /// 50 kHz between adjacent channels
    Khz50,
}

impl Default for Spacing {
    fn default() -> Self {
        Self::Khz100
    }
}

impl Spacing {
    /// Channel granularity in kHz.
    pub const fn khz(self) -> u32 {
        match self {
            Self::Khz100 => 100,
            Self::Khz200 => 200,
            Self::Khz50 => 50,
        }
    }

    fn from_bits(bits: u8) -> Result<Self, InvalidTuning> {
        match bits {
            0b00 => Ok(Self::Khz100),
            0b01 => Ok(Self::Khz200),
            0b10 => Ok(Self::Khz50),
            reserved => Err(InvalidTuning::Spacing(reserved)),
        }
    }

    const fn bits(self) -> u16 {
        match self {
            Self::Khz100 => 0b00,
            Self::Khz200 => 0b01,
            Self::Khz50 => 0b10,
        }
    }
}

/// Frequency band selector (BAND[1:0], tuning register bits [3:2])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// 87.0–108.0 MHz (US/Europe broadcast band)
    UsEurope,
    /// 76.0–91.0 MHz (Japanese broadcast band)
    Japan,
}

impl Default for Band {
    fn default() -> Self {
        Self::UsEurope
    }
}

impl Band {
    /// Inclusive range of tunable frequencies, in kHz.
    pub const fn range_khz(self) -> RangeInclusive<u32> {
        match self {
            Self::UsEurope => 87_000..=108_000,
            Self::Japan => 76_000..=91_000,
        }
    }

    /// Low edge of the band in kHz. Channel 0 tunes here.
    pub const fn low_edge_khz(self) -> u32 {
        match self {
            Self::UsEurope => 87_000,
            Self::Japan => 76_000,
        }
    }

    fn from_bits(bits: u8) -> Result<Self, InvalidTuning> {
        match bits {
            0b00 => Ok(Self::UsEurope),
            0b01 => Ok(Self::Japan),
            unsupported => Err(InvalidTuning::Band(unsupported)),
        }
    }

    const fn bits(self) -> u16 {
        match self {
            Self::UsEurope => 0b00,
            Self::Japan => 0b01,
        }
    }
}

/// Error type for tuning register decoding
///
/// Raised when the register holds selector bits the driver cannot map to
/// a spacing or band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidTuning {
    /// SPACE[1:0] holds the reserved value 0b11
    #[error("reserved spacing selector {0:#04b}")]
    Spacing(u8),
    /// BAND[1:0] holds a selector other than 0b00 or 0b01
    #[error("unsupported band selector {0:#04b}")]
    Band(u8),
}

/// Tuning register (address: 0x03)
///
/// Encodes the whole tuning state in one 16-bit word:
///
/// | bits   | field                                          |
/// |--------|------------------------------------------------|
/// | [1:0]  | SPACE, channel spacing selector                |
/// | [3:2]  | BAND, frequency band selector                  |
/// | [4]    | TUNE, set to request a tune action             |
/// | [15:6] | CHAN, channel index from the band's low edge   |
///
/// The tuned frequency is `band low edge + channel × spacing`. The chip
/// retunes when the register is written with TUNE set.
#[register(0x03u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct Tuning {
    /// Channel spacing selector
    pub spacing: Spacing,
    /// Frequency band selector
    pub band: Band,
    /// Tune request flag
    pub tune: bool,
    /// Channel index, in units of `spacing` above the band's low edge.
    /// Only the low 10 bits fit in the register.
    pub channel: u16,
}

impl Default for Tuning {
    /// The cleared configuration written during power-up: US/Europe band,
    /// 100 kHz spacing, channel 0, no tune request.
    fn default() -> Self {
        Self {
            spacing: Spacing::Khz100,
            band: Band::UsEurope,
            tune: false,
            channel: 0,
        }
    }
}

impl FromByteArray for Tuning {
    type Error = InvalidTuning;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        let word = u16::from_be_bytes(bytes);
        // The spacing selector is checked before the band selector, so a
        // register with both fields unusable reports the spacing.
        let spacing = Spacing::from_bits((word & 0x0003) as u8)?;
        let band = Band::from_bits(((word >> 2) & 0x0003) as u8)?;
        Ok(Self {
            spacing,
            band,
            tune: word & (1 << 4) != 0,
            channel: word >> 6,
        })
    }
}

impl ToByteArray for Tuning {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        // A channel wider than 10 bits loses its high bits to the shift,
        // the same truncation the register itself applies.
        let word = self.spacing.bits()
            | self.band.bits() << 2
            | (self.tune as u16) << 4
            | self.channel << 6;
        Ok(word.to_be_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_cleared_register() {
        let tuning = Tuning::from_bytes(0x0000u16.to_be_bytes()).unwrap();
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn decodes_selectors() {
        let tuning = Tuning::from_bytes(0x0005u16.to_be_bytes()).unwrap();
        assert_eq!(tuning.spacing, Spacing::Khz200);
        assert_eq!(tuning.band, Band::Japan);

        let tuning = Tuning::from_bytes(0x0002u16.to_be_bytes()).unwrap();
        assert_eq!(tuning.spacing, Spacing::Khz50);
        assert_eq!(tuning.band, Band::UsEurope);
    }

    #[test]
    fn decodes_tune_flag_and_channel() {
        let tuning = Tuning::from_bytes(0x3490u16.to_be_bytes()).unwrap();
        assert!(tuning.tune);
        assert_eq!(tuning.channel, 210);
    }

    #[test]
    fn rejects_reserved_spacing() {
        let err = Tuning::from_bytes(0x0003u16.to_be_bytes()).unwrap_err();
        assert_eq!(err, InvalidTuning::Spacing(0b11));
    }

    #[test]
    fn rejects_unsupported_band() {
        let err = Tuning::from_bytes(0x0008u16.to_be_bytes()).unwrap_err();
        assert_eq!(err, InvalidTuning::Band(0b10));

        let err = Tuning::from_bytes(0x000Cu16.to_be_bytes()).unwrap_err();
        assert_eq!(err, InvalidTuning::Band(0b11));
    }

    #[test]
    fn reserved_spacing_reported_before_band() {
        // Both selectors unusable: the spacing wins.
        let err = Tuning::from_bytes(0x000Bu16.to_be_bytes()).unwrap_err();
        assert_eq!(err, InvalidTuning::Spacing(0b11));
    }

    #[test]
    fn encodes_channel_and_tune() {
        let tuning = Tuning {
            tune: true,
            channel: 210,
            ..Tuning::default()
        };
        assert_eq!(tuning.to_bytes().unwrap(), 0x3490u16.to_be_bytes());
    }

    #[test]
    fn encode_keeps_selector_bits() {
        let tuning = Tuning {
            spacing: Spacing::Khz200,
            band: Band::Japan,
            tune: true,
            channel: 20,
        };
        assert_eq!(tuning.to_bytes().unwrap(), 0x0515u16.to_be_bytes());
    }

    #[test]
    fn truncates_channel_to_ten_bits() {
        let tuning = Tuning {
            tune: true,
            channel: 1 << 10,
            ..Tuning::default()
        };
        assert_eq!(tuning.to_bytes().unwrap(), 0x0010u16.to_be_bytes());
    }

    #[test]
    fn power_up_value_matches_vendor_sequence() {
        assert_eq!(PowerConfig::POWER_UP.bits(), 0xC001);
        assert_eq!(PowerConfig::SOFT_RESET.bits(), 0x0002);
    }
}
