//! Viscous evolution of accretion disks in X-ray binaries.
//!
//! The disk is described on a grid of specific angular momentum `h` by its
//! viscous torque `F(h, t)`, which obeys the nonlinear diffusion equation
//!
//! ```text
//! ∂W/∂t = ∂²F/∂h²,    W = W(F, h)
//! ```
//!
//! where `W` is proportional to the surface density and the relation between
//! `W` and `F` follows from the vertical structure of a disk with a power-law
//! opacity. [`Evolution`] advances a [`DiskState`] through an outburst, moving
//! the outer edge as the disk cools and the inner edge with the magnetosphere
//! of a neutron star, and the state derives the observables of every step:
//! accretion rate, disk mass, temperatures, X-ray luminosity and optical
//! magnitudes.
//!
//! ```no_run
//! use outburst::{DiskConfig, Evolution};
//!
//! let mut evolution = Evolution::new(DiskConfig::default())?;
//! evolution.run(|state| {
//!     let summary = state.summary();
//!     println!("{:.4e} {:.4e}", summary.t.to_seconds(), summary.mdot_in);
//! })?;
//! # Ok::<(), outburst::EvolutionError>(())
//! ```

pub mod binary;
pub mod config;
pub mod constants;
pub mod diffusion;
pub mod error;
pub mod evolution;
pub mod opacity;
pub mod photometry;
pub mod state;
pub mod wind;

#[cfg(test)]
mod binary_test;
#[cfg(test)]
mod opacity_test;
#[cfg(test)]
mod wind_test;

// Re-export configuration
pub use config::{
    BinaryParams, BoundaryCondition, CalculationParams, DiskConfig, DiskParams, FluxParams,
    GridScale, InitialCondition, IrradiationFactor, IrradiationParams, Normalization,
    NeutronStarParams, NeutronStarProperties, TorqueCoefficient,
};

// Re-export errors
pub use error::{ConfigError, DiffusionError, EvolutionError};

// Re-export the solver and the disk
pub use diffusion::{BoundaryConditions, Convergence, NonlinearDiffusion};
pub use evolution::{Evolution, EvolutionStatus, InnerBoundary};
pub use opacity::{OpacityLaw, VerticalStructure};
pub use photometry::{Band, Passband};
pub use state::{DiskState, RadialProfile, StepSummary};
pub use wind::{Wind, WindModel};
