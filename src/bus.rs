//! Named-bus resolution
//!
//! The driver never enumerates hardware itself. The platform supplies a
//! registry of named I2C buses through [`BusLookup`], and
//! [`Rda58xx::probe`](crate::Rda58xx::probe) resolves one of them by name
//! before bringing the chip up. Ownership of the bus transfers to the
//! device handle; sharing a physical bus between handles is the
//! platform's responsibility.

use embedded_hal::i2c::I2c;
use thiserror::Error;

/// Failure modes of [`BusLookup::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No bus is registered under the requested name.
    #[error("no such bus")]
    NotFound,
    /// The registry could not allocate the resources needed to hand the
    /// bus out.
    #[error("bus registry out of resources")]
    Exhausted,
}

/// Access to a platform's named I2C buses.
///
/// Implemented by the platform layer over whatever bus inventory it keeps
/// (device-tree names, `/dev` paths, a static table). A successful lookup
/// hands the caller exclusive ownership of the bus.
pub trait BusLookup {
    /// The bus type handed out by this registry.
    type Bus: I2c;

    /// Resolves `name` to an owned bus.
    fn lookup(&mut self, name: &str) -> Result<Self::Bus, LookupError>;
}
