//! Inner truncation of the disk by the magnetosphere of a neutron star.
//!
//! The disk is disrupted at the magnetospheric radius
//!
//! ```text
//! R_m = ξ (μ⁴ / (GM Ṁ²))^(1/7)
//! ```
//!
//! When `R_m` lies beyond the corotation radius the field lines spin faster
//! than the disk and the star acts as a propeller: matter is not accreted and
//! the inner edge carries a torque `F_in = k_t μ² / R_m³` instead of zero.
//! The coefficient `k_t` follows a [`TorqueCoefficient`] prescription; the
//! step prescriptions also apply a torque while the star accretes.
//!
//! # References
//! - Ghosh & Lamb (1979) - "Accretion by rotating magnetic neutron stars"
//! - Lipunov (1992) - "Astrophysics of Neutron Stars"

use crate::config::{DiskConfig, NeutronStarParams, TorqueCoefficient};
use crate::state::DiskState;

/// Candidate inner edge of the active disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerEdge {
    pub first: usize,
    pub f_in: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Magnetosphere {
    gm: f64,
    magnetic_moment: f64,
    xi: f64,
    k_t: TorqueCoefficient,
    r_m_min: f64,
    r_dead: f64,
    r_cor: f64,
}

impl Magnetosphere {
    pub fn new(ns: &NeutronStarParams, config: &DiskConfig) -> Self {
        let gm = config.gm();
        Self {
            gm,
            magnetic_moment: ns.magnetic_moment,
            xi: ns.xi,
            k_t: ns.k_t,
            r_m_min: ns
                .r_m_min
                .unwrap_or_else(|| config.inner_radius())
                .to_cm(),
            r_dead: ns.r_dead.map_or(f64::INFINITY, |r| r.to_cm()),
            r_cor: ns.corotation_radius(gm),
        }
    }

    /// Magnetospheric radius for accretion rate `mdot`, clamped to
    /// `[r_m_min, r_dead]` (cm).
    pub fn radius(&self, mdot: f64) -> f64 {
        let mu = self.magnetic_moment;
        let r_m = self.xi * (mu.powi(4) / (self.gm * mdot * mdot)).powf(1.0 / 7.0);
        r_m.max(self.r_m_min).min(self.r_dead)
    }

    /// Corotation radius (cm), infinite for a non-rotating star.
    pub fn corotation_radius(&self) -> f64 {
        self.r_cor
    }

    /// Torque at the inner edge for magnetospheric radius `r_m`.
    pub fn inner_torque(&self, r_m: f64) -> f64 {
        self.k_t
            .at(r_m, self.r_cor)
            .map_or(0.0, |k_t| k_t * self.magnetic_moment.powi(2) / r_m.powi(3))
    }

    /// Inner edge for the current accretion rate, leaving at least three
    /// points below `last`.
    pub fn inner_edge(&self, state: &DiskState, last: usize) -> InnerEdge {
        let mdot = state.mdot_in();
        if !(mdot > 0.0) {
            return InnerEdge {
                first: state.first(),
                f_in: state.f_in(),
            };
        }
        let r_m = self.radius(mdot);
        let first = state.r().partition_point(|&r| r < r_m);
        InnerEdge {
            first: first.min(last.saturating_sub(2)),
            f_in: self.inner_torque(r_m),
        }
    }
}
