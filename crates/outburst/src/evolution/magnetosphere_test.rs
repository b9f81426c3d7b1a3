use std::sync::Arc;

use approx::assert_relative_eq;
use units::{Length, Mass};

use super::magnetosphere::Magnetosphere;
use crate::config::{DiskConfig, NeutronStarParams, NeutronStarProperties, TorqueCoefficient};
use crate::state::DiskState;

fn ns_config(ns: NeutronStarParams) -> DiskConfig {
    let mut config = DiskConfig::default();
    config.binary.mx = Mass::from_solar_masses(1.4);
    config.calculation.nx = 100;
    config.neutron_star = Some(ns);
    config
}

fn unclamped() -> NeutronStarParams {
    NeutronStarParams {
        r_m_min: Some(Length::from_cm(1.0)),
        ..NeutronStarParams::default()
    }
}

/// Magnetic moment that puts `R_m` at `r_m` for accretion rate `mdot`.
fn moment_for(r_m: f64, mdot: f64, xi: f64, gm: f64) -> f64 {
    ((r_m / xi).powi(7) * gm * mdot * mdot).powf(0.25)
}

#[test]
fn radius_follows_alfven_scaling() {
    let ns = unclamped();
    let config = ns_config(ns);
    let m = Magnetosphere::new(&ns, &config);

    let mdot: f64 = 1e17;
    let expected = 0.7 * (1e27_f64.powi(4) / (config.gm() * mdot * mdot)).powf(1.0 / 7.0);
    assert_relative_eq!(m.radius(mdot), expected, max_relative = 1e-12);
    // R_m ∝ Mdot^(-2/7)
    assert_relative_eq!(
        m.radius(mdot) / m.radius(128.0 * mdot),
        4.0,
        max_relative = 1e-12
    );
}

#[test]
fn radius_is_clamped_between_bounds() {
    let ns = NeutronStarParams {
        r_m_min: Some(Length::from_cm(1e8)),
        r_dead: Some(Length::from_cm(1e9)),
        ..NeutronStarParams::default()
    };
    let config = ns_config(ns);
    let m = Magnetosphere::new(&ns, &config);

    assert_eq!(m.radius(1e25), 1e8);
    assert_eq!(m.radius(1.0), 1e9);
}

#[test]
fn lower_bound_defaults_to_inner_radius() {
    let ns = NeutronStarParams::default();
    let config = ns_config(ns);
    let m = Magnetosphere::new(&ns, &config);
    assert_relative_eq!(m.radius(1e40), config.inner_radius().to_cm(), max_relative = 1e-12);
}

#[test]
fn non_rotating_star_never_propels() {
    let ns = unclamped();
    let config = ns_config(ns);
    let m = Magnetosphere::new(&ns, &config);

    assert!(m.corotation_radius().is_infinite());
    assert_eq!(m.inner_torque(1e10), 0.0);
}

#[test]
fn propeller_torque_beyond_corotation() {
    let ns = NeutronStarParams {
        properties: NeutronStarProperties::SibgatullinSunyaev2000 { freqx: 500.0 },
        ..unclamped()
    };
    let config = ns_config(ns);
    let m = Magnetosphere::new(&ns, &config);

    let omega = 2.0 * std::f64::consts::PI * 500.0;
    let r_cor = (config.gm() / (omega * omega)).cbrt();
    assert_relative_eq!(m.corotation_radius(), r_cor, max_relative = 1e-12);

    let r_m = 2.0 * r_cor;
    assert_relative_eq!(
        m.inner_torque(r_m),
        1e54 / 3.0 / r_m.powi(3),
        max_relative = 1e-12
    );
    assert_eq!(m.inner_torque(0.5 * r_cor), 0.0);
}

fn spinning(k_t: TorqueCoefficient) -> (Magnetosphere, f64) {
    let ns = NeutronStarParams {
        properties: NeutronStarProperties::SibgatullinSunyaev2000 { freqx: 500.0 },
        k_t,
        ..unclamped()
    };
    let m = Magnetosphere::new(&ns, &ns_config(ns));
    let r_cor = m.corotation_radius();
    (m, r_cor)
}

#[test]
fn corotation_step_switches_coefficient() {
    let (m, r_cor) = spinning(TorqueCoefficient::CorotationStep {
        inside: 0.1,
        outside: 0.5,
    });
    let mu2 = 1e54;

    let r_in = 0.5 * r_cor;
    assert_relative_eq!(m.inner_torque(r_in), 0.1 * mu2 / r_in.powi(3), max_relative = 1e-12);
    let r_out = 2.0 * r_cor;
    assert_relative_eq!(m.inner_torque(r_out), 0.5 * mu2 / r_out.powi(3), max_relative = 1e-12);
}

#[test]
fn romanova_coefficient_grows_with_fastness() {
    let k_t = TorqueCoefficient::Romanova2018 {
        inside: 0.1,
        outside: 0.5,
    };
    let (m, r_cor) = spinning(k_t);

    assert_eq!(k_t.at(0.5 * r_cor, r_cor), Some(0.1));
    // fastness 8 at four corotation radii
    assert_relative_eq!(
        k_t.at(4.0 * r_cor, r_cor).unwrap(),
        0.1 + 0.4 * (1.0 - 1.0 / 8.0),
        max_relative = 1e-12
    );
    let near = k_t.at(r_cor * (1.0 + 1e-9), r_cor).unwrap();
    assert_relative_eq!(near, 0.1, max_relative = 1e-6);

    let r_m = 4.0 * r_cor;
    assert_relative_eq!(
        m.inner_torque(r_m),
        0.45 * 1e54 / r_m.powi(3),
        max_relative = 1e-12
    );
}

#[test]
fn default_step_prescriptions_use_one_third() {
    let r_cor = 1e8;
    for k_t in [TorqueCoefficient::corotation_step(), TorqueCoefficient::romanova2018()] {
        assert_relative_eq!(k_t.at(0.5 * r_cor, r_cor).unwrap(), 1.0 / 3.0);
        assert_relative_eq!(k_t.at(3.0 * r_cor, r_cor).unwrap(), 1.0 / 3.0, max_relative = 1e-12);
    }
    assert_eq!(TorqueCoefficient::default().at(0.5 * r_cor, r_cor), None);
}

#[test]
fn edge_lands_on_first_point_outside_magnetosphere() {
    let base_config = ns_config(unclamped());
    let gm = base_config.gm();
    let mdot = 1e17;
    let ns = NeutronStarParams {
        magnetic_moment: moment_for(1e9, mdot, 0.7, gm),
        ..unclamped()
    };
    let config = Arc::new(ns_config(ns));
    let m = Magnetosphere::new(&ns, &config);

    let template = DiskState::new(Arc::clone(&config)).unwrap();
    let h0 = template.h()[0];
    let f: Vec<f64> = template.h().iter().map(|&h| mdot * (h - h0)).collect();
    let state = DiskState::with_torque(config, f).unwrap();

    let edge = m.inner_edge(&state, state.last());
    let r = state.r();
    assert!(edge.first > 0);
    assert!(r[edge.first] >= 1e9 * (1.0 - 1e-9));
    assert!(r[edge.first - 1] < 1e9);
    assert_eq!(edge.f_in, 0.0);
}

#[test]
fn edge_keeps_three_points() {
    let ns = NeutronStarParams {
        magnetic_moment: 1e33,
        ..unclamped()
    };
    let config = Arc::new(ns_config(ns));
    let m = Magnetosphere::new(&ns, &config);
    let state = DiskState::new(config).unwrap();
    assert!(state.mdot_in() > 0.0);

    let edge = m.inner_edge(&state, 60);
    assert_eq!(edge.first, 58);
}

#[test]
fn no_inflow_keeps_current_edge() {
    let ns = unclamped();
    let config = Arc::new(ns_config(ns));
    let m = Magnetosphere::new(&ns, &config);

    let template = DiskState::new(Arc::clone(&config)).unwrap();
    let h_out = template.h()[template.nx() - 1];
    let f: Vec<f64> = template.h().iter().map(|&h| 1e17 * (h_out - h)).collect();
    let state = DiskState::with_torque(config, f).unwrap();
    assert!(state.mdot_in() < 0.0);

    let edge = m.inner_edge(&state, state.last());
    assert_eq!(edge.first, state.first());
    assert_eq!(edge.f_in, state.f_in());
}
