use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Boltzmann constant over the electron-volt (K per keV)
const KELVIN_PER_KEV: f64 = 1.160_451_812e7;

/// A thermodynamic temperature using f64 precision.
///
/// The base unit is the Kelvin. Inner disk temperatures of X-ray binaries are
/// often quoted in keV, so conversions to and from keV are provided.
///
/// # Examples
///
/// ```rust
/// use units::Temperature;
///
/// let hot_edge = Temperature::from_kelvin(1e4);
/// let inner = Temperature::from_kev(1.0);
///
/// let kelvin = inner.to_kelvin();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Temperature(f64); // Base unit: Kelvin

impl Temperature {
    /// Creates a zero temperature
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Temperature` from a value in Kelvin.
    pub fn from_kelvin(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Temperature` from a thermal energy kT in keV.
    pub fn from_kev(value: f64) -> Self {
        Self(value * KELVIN_PER_KEV)
    }

    /// Returns the temperature in Kelvin.
    pub fn to_kelvin(&self) -> f64 {
        self.0
    }

    /// Converts the temperature to thermal energy kT in keV.
    pub fn to_kev(&self) -> f64 {
        self.0 / KELVIN_PER_KEV
    }
}

impl Add for Temperature {
    type Output = Temperature;

    fn add(self, rhs: Temperature) -> Temperature {
        Temperature(self.0 + rhs.0)
    }
}

impl Sub for Temperature {
    type Output = Temperature;

    fn sub(self, rhs: Temperature) -> Temperature {
        Temperature(self.0 - rhs.0)
    }
}

impl Mul<f64> for Temperature {
    type Output = Temperature;

    fn mul(self, rhs: f64) -> Temperature {
        Temperature(self.0 * rhs)
    }
}

impl Div<f64> for Temperature {
    type Output = Temperature;

    fn div(self, rhs: f64) -> Temperature {
        Temperature(self.0 / rhs)
    }
}
