use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::mass::Mass;
use crate::{GRAVITATIONAL_CONSTANT, SPEED_OF_LIGHT};

pub const KM_TO_CM: f64 = 1e5;
pub const ANGSTROM_TO_CM: f64 = 1e-8;

/// Solar radius in centimeters
pub const SOLAR_RADIUS_CM: f64 = 6.957e10;

/// One kiloparsec in centimeters
pub const KPC_TO_CM: f64 = 3.085_677_581e21;

/// A physical length quantity using f64 precision.
///
/// The base unit is the centimeter. Disk radii are usually quoted in solar
/// radii or gravitational radii of the accretor, distances in kiloparsecs and
/// wavelengths in angstroms.
///
/// # Examples
///
/// ```rust
/// use units::{Length, Mass};
///
/// let outer_edge = Length::from_solar_radii(1.0);
/// let distance = Length::from_kpc(5.0);
/// let isco = Length::from_gravitational_radii(6.0, Mass::from_solar_masses(10.0));
///
/// let r_cm = outer_edge.to_cm();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: cm

impl Length {
    /// Creates a zero length value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Length` from a value in centimeters.
    pub fn from_cm(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Length` from a value in kilometers.
    pub fn from_km(value: f64) -> Self {
        Self(value * KM_TO_CM)
    }

    /// Creates a new `Length` from a value in solar radii.
    pub fn from_solar_radii(value: f64) -> Self {
        Self(value * SOLAR_RADIUS_CM)
    }

    /// Creates a new `Length` from a value in kiloparsecs.
    pub fn from_kpc(value: f64) -> Self {
        Self(value * KPC_TO_CM)
    }

    /// Creates a new `Length` from a value in angstroms.
    pub fn from_angstrom(value: f64) -> Self {
        Self(value * ANGSTROM_TO_CM)
    }

    /// Creates a new `Length` in units of the gravitational radius GM/c² of `mass`.
    pub fn from_gravitational_radii(value: f64, mass: Mass) -> Self {
        Self(value * gravitational_radius_cm(mass))
    }

    /// Creates a new `Length` in units of the Schwarzschild radius 2GM/c² of `mass`.
    pub fn from_schwarzschild_radii(value: f64, mass: Mass) -> Self {
        Self(2.0 * value * gravitational_radius_cm(mass))
    }

    /// Returns the length in centimeters.
    pub fn to_cm(&self) -> f64 {
        self.0
    }

    /// Converts the length to kilometers.
    pub fn to_km(&self) -> f64 {
        self.0 / KM_TO_CM
    }

    /// Converts the length to solar radii.
    pub fn to_solar_radii(&self) -> f64 {
        self.0 / SOLAR_RADIUS_CM
    }

    /// Converts the length to kiloparsecs.
    pub fn to_kpc(&self) -> f64 {
        self.0 / KPC_TO_CM
    }

    /// Converts the length to angstroms.
    pub fn to_angstrom(&self) -> f64 {
        self.0 / ANGSTROM_TO_CM
    }

    /// Converts the length to gravitational radii GM/c² of `mass`.
    pub fn to_gravitational_radii(&self, mass: Mass) -> f64 {
        self.0 / gravitational_radius_cm(mass)
    }
}

fn gravitational_radius_cm(mass: Mass) -> f64 {
    GRAVITATIONAL_CONSTANT * mass.to_grams() / (SPEED_OF_LIGHT * SPEED_OF_LIGHT)
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Division of Length by Length returns a dimensionless ratio
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Length) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Length (commutative multiplication)
impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}
