use approx::assert_relative_eq;

use crate::mass::{Mass, SOLAR_MASS_G};

#[test]
fn solar_mass_conversions() {
    let m = Mass::from_solar_masses(7.5);
    assert_relative_eq!(m.to_grams(), 7.5 * SOLAR_MASS_G);
    assert_relative_eq!(Mass::from_grams(SOLAR_MASS_G).to_solar_masses(), 1.0);
}

#[test]
fn mass_ratio_is_dimensionless() {
    let accretor = Mass::from_solar_masses(10.0);
    let donor = Mass::from_solar_masses(0.5);
    assert_relative_eq!(accretor / donor, 20.0);
    assert_relative_eq!((accretor + donor).to_solar_masses(), 10.5);
    assert_relative_eq!((accretor - donor).to_solar_masses(), 9.5);
}
