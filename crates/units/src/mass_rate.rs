use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::mass::{Mass, SOLAR_MASS_G};
use crate::time::{Time, SECONDS_PER_YEAR};

/// A mass flow rate using f64 precision.
///
/// The base unit is grams per second, the natural unit of accretion rates in
/// the disk equations. Observers often quote rates in solar masses per year.
///
/// # Examples
///
/// ```rust
/// use units::{MassRate, Time};
///
/// let peak = MassRate::from_grams_per_second(1e18);
/// let quiescent = MassRate::from_solar_masses_per_year(1e-10);
///
/// let accreted = peak.integrate(Time::from_days(10.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MassRate(f64); // Base unit: g/s

impl MassRate {
    /// Creates a zero mass rate
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `MassRate` from a value in grams per second.
    pub fn from_grams_per_second(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `MassRate` from a value in solar masses per year.
    pub fn from_solar_masses_per_year(value: f64) -> Self {
        Self(value * SOLAR_MASS_G / SECONDS_PER_YEAR)
    }

    /// Returns the mass rate in grams per second.
    pub fn to_grams_per_second(&self) -> f64 {
        self.0
    }

    /// Converts the mass rate to solar masses per year.
    pub fn to_solar_masses_per_year(&self) -> f64 {
        self.0 * SECONDS_PER_YEAR / SOLAR_MASS_G
    }

    /// Mass transferred at this rate over `duration`.
    pub fn integrate(&self, duration: Time) -> Mass {
        Mass::from_grams(self.0 * duration.to_seconds())
    }
}

impl Add for MassRate {
    type Output = MassRate;

    fn add(self, rhs: MassRate) -> MassRate {
        MassRate(self.0 + rhs.0)
    }
}

impl Sub for MassRate {
    type Output = MassRate;

    fn sub(self, rhs: MassRate) -> MassRate {
        MassRate(self.0 - rhs.0)
    }
}

impl Mul<f64> for MassRate {
    type Output = MassRate;

    fn mul(self, rhs: f64) -> MassRate {
        MassRate(self.0 * rhs)
    }
}

impl Div<f64> for MassRate {
    type Output = MassRate;

    fn div(self, rhs: f64) -> MassRate {
        MassRate(self.0 / rhs)
    }
}
