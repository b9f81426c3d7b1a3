use approx::assert_relative_eq;
use units::Mass;

use crate::constants::{G, PI};
use crate::opacity::{OpacityLaw, VerticalStructure};

fn black_hole_gm() -> f64 {
    G * Mass::from_solar_masses(10.0).to_grams()
}

#[test]
fn kramers_torque_exponent() {
    let vs = VerticalStructure::new(OpacityLaw::Kramers, 0.25, black_hole_gm()).unwrap();
    assert_relative_eq!(vs.m(), 0.3, max_relative = 1e-12);
}

#[test]
fn opal_torque_exponent() {
    let vs = VerticalStructure::new(OpacityLaw::Opal, 0.25, black_hole_gm()).unwrap();
    assert_relative_eq!(vs.m(), 1.0 / 3.0, max_relative = 1e-12);
}

#[test]
fn kramers_ring_at_1e10_cm() {
    // Ring at R = 1e10 cm around 10 M☉ carrying F = Mdot h with Mdot = 1e18 g/s
    let gm = black_hole_gm();
    let r = 1e10;
    let h = (gm * r).sqrt();
    let f = 1e18 * h;
    let vs = VerticalStructure::new(OpacityLaw::Kramers, 0.25, gm).unwrap();

    assert_relative_eq!(vs.sigma(f, h), 1394.46, max_relative = 1e-4);
    assert_relative_eq!(vs.height(f, h) / r, 0.038_453, max_relative = 1e-4);
    assert_relative_eq!(vs.central_temperature(f, h), 2.873_23e5, max_relative = 1e-4);
}

#[test]
fn disk_is_thin() {
    let gm = black_hole_gm();
    let vs = VerticalStructure::new(OpacityLaw::Opal, 0.5, gm).unwrap();
    for r in [1e8, 1e9, 1e10, 1e11] {
        let h = (gm * r).sqrt();
        let ratio = vs.height(1e17 * h, h) / r;
        assert!(ratio > 1e-3 && ratio < 0.2, "z/R = {} at R = {}", ratio, r);
    }
}

#[test]
fn sigma_scales_as_f_to_one_minus_m() {
    let gm = black_hole_gm();
    let vs = VerticalStructure::new(OpacityLaw::Kramers, 0.5, gm).unwrap();
    let h = (gm * 3e10).sqrt();
    let f = 1e35;

    let ratio = vs.sigma(2.0 * f, h) / vs.sigma(f, h);
    assert_relative_eq!(ratio, 2.0_f64.powf(1.0 - vs.m()), max_relative = 1e-10);
}

#[test]
fn w_is_sigma_in_angular_momentum_measure() {
    let gm = black_hole_gm();
    let vs = VerticalStructure::new(OpacityLaw::Kramers, 0.5, gm).unwrap();
    let h = (gm * 5e10).sqrt();
    let f = 3e36;

    let expected = 4.0 * PI * h.powi(3) * vs.sigma(f, h) / (gm * gm);
    assert_relative_eq!(vs.w(f, h), expected, max_relative = 1e-12);
}

#[test]
fn non_positive_torque_has_no_mass() {
    let vs = VerticalStructure::new(OpacityLaw::Kramers, 0.5, black_hole_gm()).unwrap();
    assert_eq!(vs.sigma(0.0, 1e18), 0.0);
    assert_eq!(vs.w(-1.0, 1e18), 0.0);
    assert_eq!(vs.height(0.0, 1e18), 0.0);
}

#[test]
fn w_range_covers_active_points_only() {
    let gm = black_hole_gm();
    let vs = VerticalStructure::new(OpacityLaw::Opal, 0.3, gm).unwrap();
    let h: Vec<f64> = (1..=8).map(|i| (gm * 1e9 * i as f64).sqrt()).collect();
    let f: Vec<f64> = h.iter().map(|&hi| 1e17 * hi).collect();

    let w = vs.w_range(&h, &f, 2, 6);

    assert_eq!(w.len(), 5);
    assert_relative_eq!(w[0], vs.w(f[2], h[2]));
    assert_relative_eq!(w[4], vs.w(f[6], h[6]));
}
