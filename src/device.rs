//! RDA58xx Device Interface
//!
//! This module provides the [`Rda58xx`] handle: an owned I2C bus behind a
//! per-handle lock, with raw and typed register access, the chip's
//! power-up sequence and frequency tuning on top.
//!
//! Every register access acquires the handle's lock for the duration of
//! its bus transfer, so the handle can be shared between threads and a
//! read's two-phase transaction is never interleaved with another
//! thread's write. The chip's I2C interface is not designed to survive
//! that kind of interleaving from a single controller.
//!
//! # Example
//! ```no_run
//! use embedded_hal::{delay::DelayNs, i2c::I2c};
//! use rda58xx::{Error, Rda58xx};
//!
//! fn bring_up<I2C, D>(i2c: I2C, delay: &mut D) -> Result<Rda58xx<I2C>, Error<I2C::Error>>
//! where
//!     I2C: I2c,
//!     D: DelayNs,
//! {
//!     let radio = Rda58xx::new(i2c, delay)?;
//!     // 99.5 MHz, using the band and spacing configured on the chip.
//!     radio.set_frequency(99_500)?;
//!     Ok(radio)
//! }
//! ```

use core::convert::Infallible;
use std::sync::{Mutex, MutexGuard, PoisonError};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, error, warn};
use regiface::{FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::bus::{BusLookup, LookupError};
use crate::error::Error;
use crate::registers::{
    PowerConfig, Tuning, I2C_ADDRESS, INTERNAL_DEFAULT, REG_INTERNAL, REG_POWER, REG_SYSTEM,
    REG_TUNING, SYSTEM_DEFAULT,
};

/// Settle time after the soft reset, before power-up.
const RESET_SETTLE_MS: u32 = 50;

/// Settle time for the oscillator and regulators after power-up.
const POWER_UP_SETTLE_MS: u32 = 600;

/// Handle to one RDA58xx chip on an I2C bus.
///
/// The handle owns the bus and serializes all chip communication behind
/// an internal lock, so every method takes `&self` and the handle can be
/// shared across threads. Two handles bound to the same physical bus have
/// independent locks and can still race on the hardware; keeping one
/// handle per bus is the caller's responsibility.
///
/// No register state is cached: every read and write is a fresh bus
/// transaction.
pub struct Rda58xx<I2C> {
    bus: Mutex<I2C>,
}

impl<I2C> core::fmt::Debug for Rda58xx<I2C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rda58xx").finish_non_exhaustive()
    }
}

impl<I2C> Rda58xx<I2C>
where
    I2C: I2c,
{
    /// Binds an owned bus and runs the chip's power-up sequence.
    ///
    /// Initialization is all-or-nothing: if any write of the sequence
    /// fails, the partially initialized handle is dropped (releasing the
    /// bus and its lock) and the error is returned. `delay` is only used
    /// here, for the chip's mandated settle times.
    pub fn new<D>(i2c: I2C, delay: &mut D) -> Result<Self, Error<I2C::Error>>
    where
        D: DelayNs,
    {
        let device = Self {
            bus: Mutex::new(i2c),
        };
        device.power_up(delay)?;
        Ok(device)
    }

    /// Resolves `name` through the platform's bus registry, then
    /// initializes the chip found there.
    ///
    /// Fails with [`Error::BusNotFound`] before any bus traffic if the
    /// registry does not know the name.
    pub fn probe<L, D>(buses: &mut L, name: &str, delay: &mut D) -> Result<Self, Error<I2C::Error>>
    where
        L: BusLookup<Bus = I2C>,
        D: DelayNs,
    {
        let i2c = buses.lookup(name).map_err(|err| match err {
            LookupError::NotFound => {
                error!("no i2c bus named `{name}`");
                Error::BusNotFound(name.to_owned())
            }
            LookupError::Exhausted => Error::ResourceExhausted,
        })?;
        Self::new(i2c, delay)
    }

    /// Releases the underlying bus.
    ///
    /// This method consumes the handle and returns the wrapped bus. It
    /// cannot fail; a poisoned lock is ignored since the bus itself is
    /// still intact.
    pub fn release(self) -> I2C {
        self.bus.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes a 16-bit register.
    ///
    /// Serialized as one 3-byte transaction: the register address followed
    /// by the value, high byte first. The handle's lock is held for the
    /// duration of the transfer and released on every path; if the lock
    /// cannot be acquired the transfer is not attempted.
    pub fn write_register(&self, address: u8, value: u16) -> Result<(), Error<I2C::Error>> {
        let mut bus = self.lock()?;
        Self::register_write(&mut bus, address, value)
    }

    /// Reads a 16-bit register.
    ///
    /// The address byte out and the two value bytes back are issued as a
    /// single two-message transfer, so no other access to the chip can
    /// interleave between the phases. The value is reconstructed high
    /// byte first. Same locking discipline as [`write_register`](Self::write_register).
    pub fn read_register(&self, address: u8) -> Result<u16, Error<I2C::Error>> {
        let mut bus = self.lock()?;
        Self::register_read(&mut bus, address)
    }

    /// Reads a typed register.
    ///
    /// # Errors
    /// Decode failures of the tuning register surface as
    /// [`Error::UnsupportedSpacing`] or [`Error::UnsupportedBand`].
    pub fn read<R>(&self) -> Result<R, Error<I2C::Error>>
    where
        R: ReadableRegister<IdType = u8, Array = [u8; 2]>,
        Error<I2C::Error>: From<<R as FromByteArray>::Error>,
    {
        let mut bus = self.lock()?;
        let word = Self::register_read(&mut bus, R::id())?;
        R::from_bytes(word.to_be_bytes()).map_err(Error::from)
    }

    /// Writes a typed register.
    pub fn write<R>(&self, register: R) -> Result<(), Error<I2C::Error>>
    where
        R: WritableRegister<IdType = u8, Error = Infallible, Array = [u8; 2]>,
    {
        let raw = register.to_bytes().unwrap();
        let mut bus = self.lock()?;
        Self::register_write(&mut bus, R::id(), u16::from_be_bytes(raw))
    }

    /// Tunes the receiver to `frequency_khz`.
    ///
    /// The band and spacing currently configured in the tuning register
    /// decide the admissible range and the channel granularity: the
    /// channel index is `(frequency_khz - band low edge) / spacing`,
    /// truncated. BAND and SPACE are written back unchanged alongside the
    /// new channel and the TUNE request flag.
    ///
    /// The read and the write-back happen under a single lock
    /// acquisition, so a concurrent
    /// [`write_register`](Self::write_register) from another thread
    /// cannot slip in between them and get overwritten.
    ///
    /// Fails without touching the chip when the register holds a reserved
    /// spacing or band selector, or when `frequency_khz` lies outside the
    /// active band. The selector checks come first: an unusable band is
    /// reported even when the frequency would also be out of range.
    pub fn set_frequency(&self, frequency_khz: u32) -> Result<(), Error<I2C::Error>> {
        let mut bus = self.lock()?;

        let word = Self::register_read(&mut bus, REG_TUNING)?;
        let current = match Tuning::from_bytes(word.to_be_bytes()) {
            Ok(tuning) => tuning,
            Err(err) => {
                error!("tuning register holds {word:#06x}: {err}");
                return Err(err.into());
            }
        };

        let range = current.band.range_khz();
        if !range.contains(&frequency_khz) {
            error!(
                "{frequency_khz} kHz outside the {}..={} kHz band",
                range.start(),
                range.end()
            );
            return Err(Error::FrequencyOutOfRange {
                frequency_khz,
                range,
            });
        }

        let channel = (frequency_khz - current.band.low_edge_khz()) / current.spacing.khz();
        let next = Tuning {
            tune: true,
            channel: channel as u16,
            ..current
        };
        let raw = next.to_bytes().unwrap();
        Self::register_write(&mut bus, REG_TUNING, u16::from_be_bytes(raw))
    }

    /// Soft reset, power up, then the vendor-recommended defaults.
    ///
    /// Each write goes through the transport; the first failure aborts the
    /// sequence. The delays model the chip's power-up timing requirements.
    fn power_up<D>(&self, delay: &mut D) -> Result<(), Error<I2C::Error>>
    where
        D: DelayNs,
    {
        debug!("powering up rda58xx");
        self.write_register(REG_POWER, PowerConfig::SOFT_RESET.bits())?;
        delay.delay_ms(RESET_SETTLE_MS);
        self.write_register(REG_POWER, PowerConfig::POWER_UP.bits())?;
        delay.delay_ms(POWER_UP_SETTLE_MS);
        self.write(Tuning::default())?;
        self.write_register(REG_SYSTEM, SYSTEM_DEFAULT)?;
        self.write_register(REG_INTERNAL, INTERNAL_DEFAULT)
    }

    fn lock(&self) -> Result<MutexGuard<'_, I2C>, Error<I2C::Error>> {
        self.bus.lock().map_err(|_| {
            warn!("rda58xx register lock poisoned; access not attempted");
            Error::Lock
        })
    }

    fn register_write(bus: &mut I2C, address: u8, value: u16) -> Result<(), Error<I2C::Error>> {
        let frame = &mut [address, 0x00, 0x00];
        frame[1..].copy_from_slice(&value.to_be_bytes());
        bus.write(I2C_ADDRESS, frame).map_err(Error::Transport)
    }

    fn register_read(bus: &mut I2C, address: u8) -> Result<u16, Error<I2C::Error>> {
        let mut raw = [0u8; 2];
        bus.write_read(I2C_ADDRESS, &[address], &mut raw)
            .map_err(Error::Transport)?;
        Ok(u16::from_be_bytes(raw))
    }
}
