//! Physical constants in CGS units.

pub use units::{GRAVITATIONAL_CONSTANT as G, SPEED_OF_LIGHT as C};

/// Stefan-Boltzmann constant (erg/(cm²·s·K⁴))
pub const SIGMA_SB: f64 = 5.670_374e-5;

/// Planck constant (erg·s)
pub const H_PLANCK: f64 = 6.626_070_15e-27;

/// Boltzmann constant (erg/K)
pub const K_B: f64 = 1.380_649e-16;

/// Proton mass (g)
pub const M_PROTON: f64 = 1.672_621_924e-24;

/// Thomson cross-section (cm²)
pub const SIGMA_THOMSON: f64 = 6.652_458_732e-25;

/// Universal gas constant per unit mass of hydrogen, k_B / m_p (erg/(g·K))
pub const R_GAS: f64 = K_B / M_PROTON;

/// Mean molecular weight of fully ionised solar-composition gas
pub const MU: f64 = 0.62;

/// Pi
pub const PI: f64 = std::f64::consts::PI;
