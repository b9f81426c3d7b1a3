//! Geometry of the binary system hosting the disk.
//!
//! The accretor sets the inner edge of the disk through its innermost stable
//! circular orbit, and the companion sets the outer edge through tidal
//! truncation inside the accretor's Roche lobe.
//!
//! # References
//! - Bardeen, Press & Teukolsky (1972) - "Rotating Black Holes"
//! - Eggleton (1983) - "Approximations to the radii of Roche lobes"
//! - Paczyński (1977) - "A model of accretion disks in close binaries"

use units::{Length, Mass, Time};

use crate::constants::{C, G, PI};

/// Fraction of the accretor's Roche lobe occupied by the tidally truncated disk.
pub const TIDAL_FRACTION: f64 = 0.9;

/// Gravitational radius `GM/c²`.
pub fn gravitational_radius(mass: Mass) -> Length {
    Length::from_cm(G * mass.to_grams() / (C * C))
}

/// Radius of the innermost stable circular orbit of a Kerr black hole.
///
/// # Arguments
/// * `mass` - Black hole mass
/// * `kerr` - Dimensionless spin `a`, positive for prograde orbits
pub fn isco_radius(mass: Mass, kerr: f64) -> Length {
    let a = kerr;
    let z1 = 1.0 + (1.0 - a * a).cbrt() * ((1.0 + a).cbrt() + (1.0 - a).cbrt());
    let z2 = (3.0 * a * a + z1 * z1).sqrt();
    let r = 3.0 + z2 - a.signum() * ((3.0 - z1) * (3.0 + z1 + 2.0 * z2)).sqrt();
    gravitational_radius(mass) * r
}

/// Radiative efficiency of accretion through the ISCO, `η = 1 - E_isco`.
pub fn efficiency(mass: Mass, kerr: f64) -> f64 {
    let r = isco_radius(mass, kerr) / gravitational_radius(mass);
    1.0 - (1.0 - 2.0 / (3.0 * r)).sqrt()
}

/// Semi-major axis of the orbit from Kepler's third law.
pub fn semi_major_axis(total_mass: Mass, period: Time) -> Length {
    let p = period.to_seconds();
    Length::from_cm((G * total_mass.to_grams() * p * p / (4.0 * PI * PI)).cbrt())
}

/// Eggleton's volume-equivalent Roche lobe radius of the star of mass `m`.
pub fn roche_lobe_radius(m: Mass, companion: Mass, period: Time) -> Length {
    let q = m / companion;
    let q23 = q.powf(2.0 / 3.0);
    let fraction = 0.49 * q23 / (0.6 * q23 + (1.0 + q.cbrt()).ln());
    semi_major_axis(m + companion, period) * fraction
}

/// Default outer disk radius: a fixed fraction of the accretor's Roche lobe.
pub fn tidal_radius(accretor: Mass, companion: Mass, period: Time) -> Length {
    roche_lobe_radius(accretor, companion, period) * TIDAL_FRACTION
}

/// Specific angular momentum of a Keplerian orbit, `h = sqrt(GM r)`.
pub fn angular_momentum(mass: Mass, radius: Length) -> f64 {
    (G * mass.to_grams() * radius.to_cm()).sqrt()
}
