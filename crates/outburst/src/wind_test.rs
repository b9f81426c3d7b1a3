use std::sync::Arc;

use approx::assert_relative_eq;

use crate::config::{DiskConfig, InitialCondition};
use crate::constants::{C, M_PROTON, PI, SIGMA_THOMSON};
use crate::error::ConfigError;
use crate::photometry::trapezoid;
use crate::state::{Commit, DiskState};
use crate::wind::{Wind, WindModel};

fn state() -> DiskState {
    let mut config = DiskConfig::default();
    config.calculation.nx = 100;
    config.disk.initial = InitialCondition::SineF;
    DiskState::new(Arc::new(config)).unwrap()
}

/// Wind mass-loss rate per unit radius, `-C GM / 2h`.
fn per_radius(state: &DiskState, c: &[f64]) -> Vec<f64> {
    c.iter()
        .zip(state.h())
        .map(|(c, h)| -c * state.gm() / (2.0 * h))
        .collect()
}

#[test]
fn no_wind_has_zero_terms() {
    let s = state();
    let coefficients = WindModel::None.coefficients(&s);
    assert_eq!(coefficients.a.len(), 100);
    assert!(coefficients.a.iter().all(|&v| v == 0.0));
    assert!(coefficients.b.iter().all(|&v| v == 0.0));
    assert!(coefficients.c.iter().all(|&v| v == 0.0));
    assert!(!Wind::new(WindModel::None, &s).is_active());
}

#[test]
fn test_models_fill_one_term() {
    let s = state();

    let a = WindModel::TestA { k_a: -1e-7 }.coefficients(&s);
    assert!(a.a.iter().all(|&v| v == -1e-7));
    assert!(a.c.iter().all(|&v| v == 0.0));

    let b = WindModel::TestB { k_b: 2e-30 }.coefficients(&s);
    assert!(b.b.iter().all(|&v| v == 2e-30));

    let c = WindModel::TestC { k_c: -5.0 }.coefficients(&s);
    assert!(c.c.iter().all(|&v| v == -5.0));
    assert!(c.a.iter().all(|&v| v == 0.0));
}

#[test]
fn super_eddington_wind_removes_eddington_rate() {
    let s = state();
    let coefficients = WindModel::Ss73C.coefficients(&s);
    assert!(coefficients.c.iter().all(|&v| v < 0.0));

    let l_edd = 4.0 * PI * s.gm() * M_PROTON * C / SIGMA_THOMSON;
    let mdot_edd = l_edd / (s.eta() * C * C);
    let loss: Vec<f64> = coefficients.c.iter().map(|c| -c).collect();
    assert_relative_eq!(trapezoid(s.h(), &loss), mdot_edd, max_relative = 1e-9);

    let rates = per_radius(&s, &coefficients.c);
    assert_relative_eq!(rates[10], rates[90], max_relative = 1e-9);
}

#[test]
fn compton_wind_carries_fraction_of_accretion_rate() {
    let s = state();
    let model = WindModel::Cambier2013 {
        k_c: 2.0,
        r_ic_to_out: 0.1,
    };
    let coefficients = model.coefficients(&s);

    let rates = per_radius(&s, &coefficients.c);
    assert_relative_eq!(trapezoid(s.r(), &rates), 2.0 * s.mdot_in(), max_relative = 1e-9);
    assert!(rates[95] > rates[20]);
}

#[test]
fn shields_wind_starts_at_minimum_radius() {
    let s = state();
    let model = WindModel::TestCShields1986 {
        k_c: 0.5,
        r_windmin_to_out: 0.5,
    };
    let coefficients = model.coefficients(&s);
    let r_min = 0.5 * s.r()[99];

    for (c, r) in coefficients.c.iter().zip(s.r()) {
        if *r < r_min {
            assert_eq!(*c, 0.0);
        } else {
            assert!(*c < 0.0);
        }
    }
    let rates = per_radius(&s, &coefficients.c);
    assert_relative_eq!(trapezoid(s.r(), &rates), 0.5 * s.mdot_in(), max_relative = 1e-9);
}

#[test]
fn outflowing_disk_feeds_no_wind() {
    let mut config = DiskConfig::default();
    config.calculation.nx = 50;
    let config = Arc::new(config);
    let template = DiskState::new(Arc::clone(&config)).unwrap();
    let h_out = template.h()[49];
    let f: Vec<f64> = template.h().iter().map(|&h| 1e17 * (h_out - h)).collect();
    let s = DiskState::with_torque(config, f).unwrap();
    assert!(s.mdot_in() < 0.0);

    let model = WindModel::Cambier2013 {
        k_c: 1.0,
        r_ic_to_out: 0.5,
    };
    assert!(model.coefficients(&s).c.iter().all(|&v| v == 0.0));
}

#[test]
fn only_shields_wind_is_refreshed() {
    assert!(!WindModel::Cambier2013 {
        k_c: 1.0,
        r_ic_to_out: 0.1
    }
    .recomputes_each_step());
    assert!(WindModel::TestCShields1986 {
        k_c: 1.0,
        r_windmin_to_out: 0.1
    }
    .recomputes_each_step());
    assert!(!WindModel::Ss73C.recomputes_each_step());
    assert!(!WindModel::TestC { k_c: 1.0 }.recomputes_each_step());
}

#[test]
fn update_follows_accretion_rate() {
    let mut s = state();
    let mut fixed = Wind::new(WindModel::Ss73C, &s);
    let mut compton = Wind::new(
        WindModel::Cambier2013 {
            k_c: 1.0,
            r_ic_to_out: 0.2,
        },
        &s,
    );
    let mut tracking = Wind::new(
        WindModel::TestCShields1986 {
            k_c: 1.0,
            r_windmin_to_out: 0.2,
        },
        &s,
    );
    let fixed_before = fixed.coefficients().clone();
    let compton_before = compton.coefficients().clone();
    let tracking_before = tracking.coefficients().c[90];
    assert!(tracking_before < 0.0);

    let f: Vec<f64> = s.f().iter().map(|v| 2.0 * v).collect();
    let (first, last) = (s.first(), s.last());
    s.commit(Commit {
        f,
        first,
        last,
        f_in: 0.0,
        tau: 1.0,
    });
    fixed.update(&s);
    compton.update(&s);
    tracking.update(&s);

    assert_eq!(fixed.coefficients(), &fixed_before);
    assert_eq!(compton.coefficients(), &compton_before);
    assert_relative_eq!(tracking.coefficients().c[90], 2.0 * tracking_before, max_relative = 1e-9);
}

#[test]
fn radius_ratios_must_lie_in_unit_interval() {
    let bad = WindModel::Cambier2013 {
        k_c: 1.0,
        r_ic_to_out: 0.0,
    };
    assert_eq!(
        bad.validate(),
        Err(ConfigError::OutOfUnitInterval {
            name: "r_ic_to_out",
            value: 0.0
        })
    );

    let bad = WindModel::TestCShields1986 {
        k_c: 1.0,
        r_windmin_to_out: 1.5,
    };
    assert!(bad.validate().is_err());

    let good = WindModel::TestCShields1986 {
        k_c: 1.0,
        r_windmin_to_out: 1.0,
    };
    assert!(good.validate().is_ok());
    assert!(WindModel::Ss73C.validate().is_ok());
}
