//! Implicit solver for the nonlinear diffusion equation
//!
//! ```text
//! ∂w/∂t = ∂²y/∂x² [+ A w + B y + C]
//! ```
//!
//! on a non-uniform one-dimensional grid, where `w = w(x, y)` is supplied by
//! the caller as a closure. Each time step is a backward-Euler step whose
//! nonlinearity is resolved by fixed-point iteration: the coefficient
//! `K = w / y` is frozen at the current guess, the resulting linear
//! tridiagonal system is solved with the Thomas algorithm, and the loop
//! repeats until `w` stops changing.
//!
//! The bracketed wind terms are optional; [`WindTerms`] carries them when a
//! disk wind is active.

mod kernel;
mod tridiagonal;


pub use kernel::{
    max_dif_rel, mean_square_rel, BoundaryConditions, Convergence, NonlinearDiffusion, WindTerms,
    DEFAULT_MAX_ITERATIONS,
};
pub use tridiagonal::solve_tridiagonal;
