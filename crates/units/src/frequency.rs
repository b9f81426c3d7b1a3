use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

/// Photon frequency corresponding to 1 keV (Hz)
pub const HERTZ_PER_KEV: f64 = 2.417_989_242e17;

/// A frequency (photon frequency or spin frequency) using f64 precision.
///
/// The base unit is the hertz. X-ray bands are given as photon energies in
/// keV, which map onto frequencies through E = hν.
///
/// # Examples
///
/// ```rust
/// use units::Frequency;
///
/// let soft = Frequency::from_kev(1.0);
/// let spin = Frequency::from_hertz(400.0);
///
/// let nu = soft.to_hertz();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Frequency(f64); // Base unit: Hz

impl Frequency {
    /// Creates a new `Frequency` from a value in hertz.
    pub fn from_hertz(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Frequency` from a photon energy in keV.
    pub fn from_kev(value: f64) -> Self {
        Self(value * HERTZ_PER_KEV)
    }

    /// Returns the frequency in hertz.
    pub fn to_hertz(&self) -> f64 {
        self.0
    }

    /// Converts the frequency to photon energy in keV.
    pub fn to_kev(&self) -> f64 {
        self.0 / HERTZ_PER_KEV
    }
}

impl Mul<f64> for Frequency {
    type Output = Frequency;

    fn mul(self, rhs: f64) -> Frequency {
        Frequency(self.0 * rhs)
    }
}

impl Div for Frequency {
    type Output = f64;

    fn div(self, rhs: Frequency) -> f64 {
        self.0 / rhs.0
    }
}
