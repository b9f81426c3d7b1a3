//! Moving boundaries of the hot disk.
//!
//! During outburst decay the outer parts of the disk cool below the hydrogen
//! ionisation temperature and drop out of the hot, viscous zone; the outer
//! edge then follows the radius where the photosphere (or the irradiation)
//! temperature reaches `T_hot`. The inner edge is fixed for black holes and
//! follows the magnetosphere for magnetised neutron stars.

use super::magnetosphere::{InnerEdge, Magnetosphere};
use crate::config::{BoundaryCondition, DiskConfig};
use crate::constants::SIGMA_SB;
use crate::state::DiskState;

/// Candidate outer edge.
///
/// The edge only moves while the accretion rate is falling, and only
/// inwards. An accretion rate equal to the previous one keeps the edge.
/// The returned index may leave fewer than three active points, which the
/// caller must reject.
pub fn outer_edge(state: &DiskState) -> usize {
    let (first, mut last) = (state.first(), state.last());
    if !(state.mdot_in() < state.mdot_in_prev()) {
        return last;
    }

    let t_hot = state.config().disk.t_hot.to_kelvin();
    match state.config().disk.boundary {
        BoundaryCondition::Teff => {
            let tph = state.tph();
            while last > first && tph[last - first] < t_hot {
                last -= 1;
            }
        }
        BoundaryCondition::Tirr => {
            let qx = state.qx();
            let q_hot = SIGMA_SB * t_hot.powi(4);
            while last > first && qx[last - first] < q_hot {
                last -= 1;
            }
        }
    }
    last
}

/// How the inner edge of the disk is chosen each step.
#[derive(Debug, Clone, PartialEq)]
pub enum InnerBoundary {
    /// Edge and boundary torque stay as they are
    Fixed,
    /// Edge follows the magnetospheric radius
    Magnetosphere(Magnetosphere),
}

impl InnerBoundary {
    pub fn from_config(config: &DiskConfig) -> Self {
        match &config.neutron_star {
            Some(ns) if ns.magnetic_moment > 0.0 => Self::Magnetosphere(Magnetosphere::new(ns, config)),
            _ => Self::Fixed,
        }
    }

    /// Candidate inner edge given the candidate outer edge `last`.
    pub fn inner_edge(&self, state: &DiskState, last: usize) -> InnerEdge {
        match self {
            Self::Fixed => InnerEdge {
                first: state.first(),
                f_in: state.f_in(),
            },
            Self::Magnetosphere(magnetosphere) => magnetosphere.inner_edge(state, last),
        }
    }
}
