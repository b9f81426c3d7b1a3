use approx::assert_relative_eq;
use units::{Mass, Time};

use crate::binary::*;

#[test]
fn schwarzschild_isco_is_six_gravitational_radii() {
    let mass = Mass::from_solar_masses(10.0);
    let ratio = isco_radius(mass, 0.0) / gravitational_radius(mass);
    assert_relative_eq!(ratio, 6.0, max_relative = 1e-12);
}

#[test]
fn extreme_kerr_isco() {
    let mass = Mass::from_solar_masses(7.0);
    let rg = gravitational_radius(mass);

    assert_relative_eq!(isco_radius(mass, 1.0) / rg, 1.0, max_relative = 1e-9);
    assert_relative_eq!(isco_radius(mass, -1.0) / rg, 9.0, max_relative = 1e-9);
}

#[test]
fn schwarzschild_efficiency() {
    let eta = efficiency(Mass::from_solar_masses(10.0), 0.0);
    // 1 - sqrt(8/9)
    assert_relative_eq!(eta, 0.057_191, max_relative = 1e-4);
}

#[test]
fn efficiency_grows_with_spin() {
    let mass = Mass::from_solar_masses(10.0);
    assert!(efficiency(mass, 0.9) > efficiency(mass, 0.5));
    assert!(efficiency(mass, 0.5) > efficiency(mass, 0.0));
}

#[test]
fn earth_orbit_semi_major_axis() {
    let a = semi_major_axis(Mass::from_solar_masses(1.0), Time::from_years(1.0));
    assert_relative_eq!(a.to_cm(), 1.496e13, max_relative = 1e-3);
}

#[test]
fn equal_mass_roche_lobe() {
    let m = Mass::from_solar_masses(1.0);
    let period = Time::from_days(1.0);

    let fraction = roche_lobe_radius(m, m, period) / semi_major_axis(m + m, period);
    assert_relative_eq!(fraction, 0.49 / (0.6 + 2.0_f64.ln()), max_relative = 1e-12);
}

#[test]
fn tidal_radius_is_inside_roche_lobe() {
    let mx = Mass::from_solar_masses(8.0);
    let mopt = Mass::from_solar_masses(0.5);
    let period = Time::from_days(0.43);

    let rl = roche_lobe_radius(mx, mopt, period);
    let rt = tidal_radius(mx, mopt, period);
    assert_relative_eq!(rt / rl, TIDAL_FRACTION);
    assert!(rt.to_solar_radii() > 0.5 && rt.to_solar_radii() < 5.0);
}

#[test]
fn angular_momentum_of_keplerian_orbit() {
    let mass = Mass::from_solar_masses(1.0);
    let r = units::Length::from_cm(1e11);
    let h = angular_momentum(mass, r);
    assert_relative_eq!(h * h, crate::constants::G * mass.to_grams() * 1e11, max_relative = 1e-12);
}
