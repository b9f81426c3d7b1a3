//! Physical quantities for accretion disk modelling.
//!
//! Every quantity stores its value in CGS units, which is what the disk
//! solver works in. Constructors and accessors cover the astronomer units
//! used to describe X-ray binaries (solar masses, days, kiloparsecs, keV).

pub mod frequency;
pub mod length;
pub mod mass;
pub mod mass_rate;
pub mod temperature;
pub mod time;

#[cfg(test)]
mod frequency_test;
#[cfg(test)]
mod length_test;
#[cfg(test)]
mod mass_rate_test;
#[cfg(test)]
mod mass_test;
#[cfg(test)]
mod time_test;

pub use frequency::Frequency;
pub use length::Length;
pub use mass::{Mass, SOLAR_MASS_G};
pub use mass_rate::MassRate;
pub use temperature::Temperature;
pub use time::Time;

/// Gravitational constant (cm³/(g·s²))
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-8;

/// Speed of light (cm/s)
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e10;
