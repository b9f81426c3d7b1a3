//! Error types for configuration, the diffusion kernel and the evolution driver.

use thiserror::Error;

/// Invalid parameter combinations, caught before any stepping begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("inner radius {rin:.4e} cm must be smaller than outer radius {rout:.4e} cm")]
    InnerBeyondOuter { rin: f64, rout: f64 },

    #[error("grid needs at least 3 points, got {0}")]
    GridTooSmall(usize),

    #[error("inclination must be within [0, 90] degrees, got {0}")]
    Inclination(f64),

    #[error("irradiation factor must be positive when the outer boundary follows Tirr")]
    IrradiationRequired,

    #[error("{name} must lie in (0, 1], got {value}")]
    OutOfUnitInterval { name: &'static str, value: f64 },

    #[error("X-ray band is empty: emin {emin:.4e} Hz >= emax {emax:.4e} Hz")]
    EmptyBand { emin: f64, emax: f64 },

    #[error("magnetic moment must be non-negative, got {0}")]
    NegativeMagneticMoment(f64),

    #[error("initial condition {0} has no inner accretion rate or mass to normalise")]
    DegenerateInitialCondition(&'static str),

    #[error("accretion-rate normalisation needs a sineF or quasistat profile, got {0}")]
    AccretionRateNormalization(&'static str),

    #[error("passband {name}: {reason}")]
    Passband { name: String, reason: &'static str },

    #[error("torque profile has {actual} values for a grid of {expected} points")]
    TorqueLength { expected: usize, actual: usize },

    #[error("vertical-structure system of the {0} opacity law is singular")]
    SingularStructure(&'static str),
}

/// Failures of a single implicit diffusion solve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiffusionError {
    #[error("active range [{first}, {last}] has fewer than 3 points")]
    GridTooSmall { first: usize, last: usize },

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("array length mismatch: grid has {expected} points, {name} has {actual}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("closure returned {actual} values for {expected} active points")]
    ClosureLength { expected: usize, actual: usize },

    #[error("non-finite value in {stage} at grid index {index}")]
    NonFinite { stage: &'static str, index: usize },

    #[error("zero pivot in tridiagonal elimination at grid index {0}")]
    ZeroPivot(usize),

    #[error("no convergence after {iterations} iterations (relative error {error:.3e})")]
    NotConverged { iterations: usize, error: f64 },

    #[error("cancelled after {0} iterations")]
    Cancelled(usize),
}

/// Failures of the evolution driver, tagged with where in the run they happened.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvolutionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("step {step} (t = {time:.6e} s): {source}")]
    Diffusion {
        step: usize,
        time: f64,
        #[source]
        source: DiffusionError,
    },

    #[error("step {step} (t = {time:.6e} s): active disk shrank to {points} grid points")]
    DegenerateGrid {
        step: usize,
        time: f64,
        points: usize,
    },

    #[error("step {step} (t = {time:.6e} s): time step must be positive, got {tau}")]
    InvalidTimeStep { step: usize, time: f64, tau: f64 },

    #[error("evolution failed at step {step} and cannot continue")]
    Terminated { step: usize },
}

impl EvolutionError {
    /// Step index at which the failure happened, if the error is tied to one.
    pub fn step(&self) -> Option<usize> {
        match self {
            Self::Config(_) => None,
            Self::Diffusion { step, .. }
            | Self::DegenerateGrid { step, .. }
            | Self::InvalidTimeStep { step, .. }
            | Self::Terminated { step } => Some(*step),
        }
    }
}
