use approx::assert_relative_eq;

use crate::mass::SOLAR_MASS_G;
use crate::mass_rate::MassRate;
use crate::time::{Time, SECONDS_PER_YEAR};

#[test]
fn solar_masses_per_year_round_trip() {
    let rate = MassRate::from_solar_masses_per_year(1e-8);
    assert_relative_eq!(
        rate.to_grams_per_second(),
        1e-8 * SOLAR_MASS_G / SECONDS_PER_YEAR
    );
    assert_relative_eq!(rate.to_solar_masses_per_year(), 1e-8);
}

#[test]
fn integrate_over_days() {
    let rate = MassRate::from_grams_per_second(1e18);
    let mass = rate.integrate(Time::from_days(1.0));
    assert_relative_eq!(mass.to_grams(), 8.64e22);
}

#[test]
fn mass_rate_arithmetic() {
    let a = MassRate::from_grams_per_second(3e17);
    let b = MassRate::from_grams_per_second(1e17);
    assert_relative_eq!((a + b).to_grams_per_second(), 4e17);
    assert_relative_eq!((a - b).to_grams_per_second(), 2e17);
    assert_relative_eq!((a * 2.0).to_grams_per_second(), 6e17);
    assert_relative_eq!((a / 3.0).to_grams_per_second(), 1e17);
}
