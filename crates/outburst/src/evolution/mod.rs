//! Time evolution of the disk through an outburst.
//!
//! [`Evolution`] owns the disk state, the wind and the inner-boundary
//! strategy, and advances them with the implicit diffusion solver. Black
//! hole and neutron star accretors share one driver; they differ only in the
//! [`InnerBoundary`] chosen from the configuration.
//!
//! # References
//! - Lipunova & Shakura (2000) - "New solution to viscous evolution of
//!   accretion disks in binary systems"
//! - Lipunova & Malanchev (2017) - "Determination of the turbulent parameter in
//!   accretion discs"

mod driver;
mod magnetosphere;
mod truncation;

#[cfg(test)]
mod magnetosphere_test;

pub use driver::{Evolution, EvolutionStatus};
pub use magnetosphere::{InnerEdge, Magnetosphere};
pub use truncation::{outer_edge, InnerBoundary};
