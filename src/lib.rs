//! RDA58xx FM Transceiver Driver
//!
//! This crate provides a driver for the RDA58xx family of broadcast FM
//! transceivers, controlled over I2C through the `embedded-hal` traits.
//! The chip lives at bus address 0x11 and exposes a file of 16-bit
//! registers; tuning means rewriting a single register that packs the
//! band, the channel spacing, the channel index and a tune request into
//! one word.
//!
//! # Features
//! - Raw and typed access to the 16-bit register file
//! - Power-up sequence with the chip's mandated settle times
//! - Frequency tuning against the band and spacing configured on the chip
//! - Thread-safe handle: every bus transaction is serialized behind a
//!   per-handle lock
//! - Named-bus resolution through the platform's [`BusLookup`] capability
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`device`]: the [`Rda58xx`] handle
//!   - Register transport and its locking discipline
//!   - Device lifecycle (probe, power-up, release)
//!   - Frequency tuning
//!
//! - [`registers`]: register definitions
//!   - [`Tuning`]: the band/spacing/channel word
//!   - [`PowerConfig`]: power configuration flags
//!   - Vendor default constants for the opaque registers
//!
//! - [`bus`]: the named-bus registry trait implemented by the platform
//!
//! - [`error`]: the [`Error`] taxonomy
//!
//! # Usage
//! ```no_run
//! use embedded_hal::{delay::DelayNs, i2c::I2c};
//! use rda58xx::{Error, Rda58xx};
//!
//! fn station<I2C, D>(i2c: I2C, delay: &mut D) -> Result<Rda58xx<I2C>, Error<I2C::Error>>
//! where
//!     I2C: I2c,
//!     D: DelayNs,
//! {
//!     let radio = Rda58xx::new(i2c, delay)?;
//!     radio.set_frequency(99_500)?;
//!     Ok(radio)
//! }
//! ```
//!
//! # Important Notes
//! - Tuning reads the chip's current band and spacing and validates the
//!   requested frequency against them; it never rewrites the selectors.
//! - Register state is never cached; every access is a fresh bus transaction.
//! - Two handles bound to the same physical bus can still race on the
//!   hardware; keep one handle per bus.

pub mod bus;
pub mod device;
pub mod error;
pub mod registers;

pub use bus::{BusLookup, LookupError};
pub use device::Rda58xx;
pub use error::Error;
pub use registers::*;
