use approx::assert_relative_eq;

use crate::length::{Length, KPC_TO_CM, SOLAR_RADIUS_CM};
use crate::mass::Mass;

#[test]
fn solar_radius_conversions() {
    let r = Length::from_solar_radii(1.0);
    assert_relative_eq!(r.to_cm(), SOLAR_RADIUS_CM);
    assert_relative_eq!(Length::from_cm(SOLAR_RADIUS_CM).to_solar_radii(), 1.0);
}

#[test]
fn distance_and_wavelength_conversions() {
    assert_relative_eq!(Length::from_kpc(1.0).to_cm(), KPC_TO_CM);
    assert_relative_eq!(Length::from_angstrom(5450.0).to_cm(), 5.45e-5);
    assert_relative_eq!(Length::from_km(10.0).to_cm(), 1e6);
    assert_relative_eq!(Length::from_cm(1e6).to_km(), 10.0);
}

#[test]
fn gravitational_radius_of_a_solar_mass_is_about_1_5_km() {
    let sun = Mass::from_solar_masses(1.0);
    let r_g = Length::from_gravitational_radii(1.0, sun);
    assert_relative_eq!(r_g.to_km(), 1.4766, max_relative = 1e-3);

    let r_s = Length::from_schwarzschild_radii(1.0, sun);
    assert_relative_eq!(r_s.to_cm(), 2.0 * r_g.to_cm());
    assert_relative_eq!(r_s.to_gravitational_radii(sun), 2.0);
}

#[test]
fn length_arithmetic() {
    let a = Length::from_cm(5.0);
    let b = Length::from_cm(3.0);

    assert_relative_eq!((a + b).to_cm(), 8.0);
    assert_relative_eq!((a - b).to_cm(), 2.0);
    assert_relative_eq!((a * 2.0).to_cm(), 10.0);
    assert_relative_eq!((2.0 * a).to_cm(), 10.0);
    assert_relative_eq!((a / 2.0).to_cm(), 2.5);
    assert_relative_eq!(a / b, 5.0 / 3.0);
}
