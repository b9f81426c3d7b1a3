//! Disk winds as source terms of the diffusion equation.
//!
//! A wind adds `A W + B F + C` to the right-hand side of `∂W/∂t = ∂²F/∂h²`.
//! Physical winds only remove mass, which enters through
//! `C = -dṀ_wind/dh`; the test variants exercise `A` and `B` as well.
//!
//! Coefficients are stored over the whole grid and built once when the
//! evolution starts. Only the Shields test wind is rebuilt before every step;
//! the Compton-heated wind keeps the accretion rate it was built with.
//!
//! # References
//! - Shakura & Sunyaev (1973) - "Black holes in binary systems. Observational
//!   appearance", super-Eddington outflow
//! - Begelman, McKee & Shields (1983) - "Compton heated winds and coronae above
//!   accretion disks"
//! - Shields et al. (1986), Compton-heated winds in disk evolution
//! - Cambier & Smith (2013), radial profile of thermal winds

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{C, M_PROTON, PI, SIGMA_THOMSON};
use crate::diffusion::WindTerms;
use crate::error::ConfigError;
use crate::photometry::trapezoid;
use crate::state::DiskState;

/// Wind model and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum WindModel {
    /// No wind
    #[default]
    None,

    /// Super-Eddington outflow removing the Eddington accretion rate,
    /// spread uniformly in radius over the disk.
    Ss73C,

    /// Compton-heated wind carrying `k_c · Mdot_in` of the initial disk,
    /// weighted towards radii beyond the Compton radius.
    Cambier2013 {
        /// Wind rate in units of the inner accretion rate
        k_c: f64,
        /// Compton radius in units of the outer disk radius
        r_ic_to_out: f64,
    },

    /// Constant `A`
    TestA { k_a: f64 },

    /// Constant `B`
    TestB { k_b: f64 },

    /// Constant `C`
    TestC { k_c: f64 },

    /// Wind carrying `k_c · Mdot_in`, uniform in radius outside
    /// `r_windmin_to_out · R_out`.
    TestCShields1986 {
        /// Wind rate in units of the inner accretion rate
        k_c: f64,
        /// Inner edge of the wind region in units of the outer disk radius
        r_windmin_to_out: f64,
    },
}

impl WindModel {
    /// Whether the coefficients follow the disk state and must be rebuilt
    /// before each step.
    pub fn recomputes_each_step(&self) -> bool {
        matches!(self, Self::TestCShields1986 { .. })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ratio = match self {
            Self::Cambier2013 { r_ic_to_out, .. } => Some(("r_ic_to_out", *r_ic_to_out)),
            Self::TestCShields1986 {
                r_windmin_to_out, ..
            } => Some(("r_windmin_to_out", *r_windmin_to_out)),
            _ => None,
        };
        match ratio {
            Some((name, value)) if !(value > 0.0 && value <= 1.0) => {
                Err(ConfigError::OutOfUnitInterval { name, value })
            }
            _ => Ok(()),
        }
    }

    /// Coefficients for the current disk state.
    pub fn coefficients(&self, state: &DiskState) -> WindCoefficients {
        let nx = state.nx();
        let mut coefficients = WindCoefficients::zeros(nx);

        match *self {
            Self::None => {}
            Self::Ss73C => {
                let gm = state.gm();
                let l_edd = 4.0 * PI * gm * M_PROTON * C / SIGMA_THOMSON;
                let mdot_edd = l_edd / (state.eta() * C * C);
                let r_in = state.r()[state.first()];
                let r_out = state.r()[state.last()];
                let per_radius = mdot_edd / (r_out - r_in);
                for (c, &h) in coefficients.c.iter_mut().zip(state.h()) {
                    *c = -per_radius * 2.0 * h / gm;
                }
            }
            Self::Cambier2013 { k_c, r_ic_to_out } => {
                let r_ic = r_ic_to_out * state.r()[state.last()];
                let weight = |r: f64| {
                    let x2 = (r / r_ic).powi(2);
                    x2 / (1.0 + x2)
                };
                spread_over_radius(state, k_c * state.mdot_in().max(0.0), weight, &mut coefficients.c);
            }
            Self::TestA { k_a } => coefficients.a.fill(k_a),
            Self::TestB { k_b } => coefficients.b.fill(k_b),
            Self::TestC { k_c } => coefficients.c.fill(k_c),
            Self::TestCShields1986 {
                k_c,
                r_windmin_to_out,
            } => {
                let r_min = r_windmin_to_out * state.r()[state.last()];
                let weight = |r: f64| if r >= r_min { 1.0 } else { 0.0 };
                spread_over_radius(state, k_c * state.mdot_in().max(0.0), weight, &mut coefficients.c);
            }
        }

        coefficients
    }
}

/// Distributes a total wind rate over the active disk with radial density
/// proportional to `weight(R)` and writes `C = -dṀ/dh`.
fn spread_over_radius(state: &DiskState, total: f64, weight: impl Fn(f64) -> f64, c: &mut [f64]) {
    let (first, last) = (state.first(), state.last());
    let r = &state.r()[first..=last];
    let weights: Vec<f64> = r.iter().map(|&ri| weight(ri)).collect();
    let norm = trapezoid(r, &weights);
    if norm <= 0.0 || total == 0.0 {
        return;
    }
    let gm = state.gm();
    for (k, i) in (first..=last).enumerate() {
        let per_radius = total * weights[k] / norm;
        c[i] = -per_radius * 2.0 * state.h()[i] / gm;
    }
}

/// Full-grid `A`, `B`, `C` arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct WindCoefficients {
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub c: Vec<f64>,
}

impl WindCoefficients {
    pub fn zeros(nx: usize) -> Self {
        Self {
            a: vec![0.0; nx],
            b: vec![0.0; nx],
            c: vec![0.0; nx],
        }
    }

    pub fn as_terms(&self) -> WindTerms<'_> {
        WindTerms {
            a: &self.a,
            b: &self.b,
            c: &self.c,
        }
    }
}

/// A wind model together with its current coefficients.
#[derive(Debug, Clone)]
pub struct Wind {
    model: WindModel,
    coefficients: WindCoefficients,
}

impl Wind {
    pub fn new(model: WindModel, state: &DiskState) -> Self {
        let coefficients = model.coefficients(state);
        Self {
            model,
            coefficients,
        }
    }

    /// Refreshes state-dependent coefficients.
    pub fn update(&mut self, state: &DiskState) {
        if self.model.recomputes_each_step() {
            self.coefficients = self.model.coefficients(state);
            debug!(
                "wind coefficients refreshed at t = {:.4e} s, Mdot_in = {:.4e} g/s",
                state.t(),
                state.mdot_in()
            );
        }
    }

    pub fn model(&self) -> WindModel {
        self.model
    }

    pub fn coefficients(&self) -> &WindCoefficients {
        &self.coefficients
    }

    pub fn is_active(&self) -> bool {
        !self.model.is_none()
    }
}
