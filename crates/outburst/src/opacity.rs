//! Vertical structure of a stationary alpha-disk ring and the `W(F, h)` closure.
//!
//! The diffusion equation evolves the viscous torque `F`, while mass lives in
//! `W = 4π h³ Σ / (GM)²`. Relating the two needs the vertical structure of the
//! disk, which for a power-law opacity `κ = κ0 ρ^a T^b` reduces to four
//! algebraic relations between the central temperature `T_c`, the half
//! surface density `Σ0`, the half-thickness `z0` and the central density `ρ_c`:
//!
//! ```text
//! Π1 = ω² z0² μ / (ℛ T_c)
//! Π2 = Σ0 / (2 z0 ρ_c)
//! Π3 = 3/4 · α ω ℛ T_c Σ0 / (μ Q0)
//! Π4 = 3/32 · σ T_c⁴ / (Q0 κ_c Σ0)
//! ```
//!
//! with `ω = (GM)²/h³` the Keplerian angular velocity and
//! `Q0 = 3/(8π) · F ω / R²` the viscous flux from one face. Taking logarithms
//! turns them into a 4×4 linear system, so every structure quantity is a
//! power law in `F` and `h`. In particular `Σ ∝ F^(1-m) h^p`, where `m` is
//! 0.3 for Kramers and 1/3 for OPAL opacity.
//!
//! # References
//! - Ketsaris & Shakura (1998) - "On the calculation of the vertical structure
//!   of accretion discs"
//! - Suleimanov, Lipunova & Shakura (2007) - "Modeling of non-stationary
//!   accretion disks in X-ray novae"
//! - Lipunova & Malanchev (2017) - "Determination of the turbulent parameter in
//!   accretion discs"

use std::fmt;

use nalgebra::{Matrix4, Vector4};
use serde::{Deserialize, Serialize};

use crate::constants::{MU, PI, R_GAS, SIGMA_SB};
use crate::error::ConfigError;

/// Power-law opacity `κ = κ0 ρ^a T^b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpacityLaw {
    /// Free-free Kramers opacity, `κ ∝ ρ T^(-7/2)`
    #[default]
    Kramers,
    /// Fit to OPAL tables for hot ionised gas, `κ ∝ ρ T^(-5/2)`
    Opal,
}

impl OpacityLaw {
    /// Normalisation `κ0` (cm²/g in CGS with `ρ` in g/cm³ and `T` in K).
    pub fn kappa0(&self) -> f64 {
        match self {
            Self::Kramers => 5e24,
            Self::Opal => 1.5e20,
        }
    }

    /// Density and temperature exponents `(a, b)`.
    pub fn exponents(&self) -> (f64, f64) {
        match self {
            Self::Kramers => (1.0, -3.5),
            Self::Opal => (1.0, -2.5),
        }
    }

    /// Dimensionless vertical-structure constants `Π1..Π4`.
    pub fn structure_constants(&self) -> [f64; 4] {
        match self {
            Self::Kramers => [5.13, 0.5, 1.15, 0.46],
            Self::Opal => [6.31, 0.5, 1.15, 0.4],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Kramers => "Kramers",
            Self::Opal => "OPAL",
        }
    }
}

impl fmt::Display for OpacityLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `coefficient · F^f_exponent · h^h_exponent`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    pub coefficient: f64,
    pub f_exponent: f64,
    pub h_exponent: f64,
}

impl PowerLaw {
    /// Evaluates the law, returning zero for a non-positive torque.
    pub fn eval(&self, f: f64, h: f64) -> f64 {
        if f <= 0.0 {
            return 0.0;
        }
        self.coefficient * f.powf(self.f_exponent) * h.powf(self.h_exponent)
    }
}

/// Solved vertical structure for one opacity law, viscosity and central mass.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalStructure {
    law: OpacityLaw,
    gm: f64,
    sigma: PowerLaw,
    height: PowerLaw,
    central_temperature: PowerLaw,
}

impl VerticalStructure {
    /// Solves the logarithmic structure system.
    ///
    /// # Arguments
    /// * `law` - Opacity law
    /// * `alpha` - Shakura-Sunyaev viscosity parameter
    /// * `gm` - Gravitational parameter of the accretor (cm³/s²)
    pub fn new(law: OpacityLaw, alpha: f64, gm: f64) -> Result<Self, ConfigError> {
        let (a, b) = law.exponents();
        let [pi1, pi2, pi3, pi4] = law.structure_constants();

        // Unknowns: (ln T_c, ln Σ0, ln z0, ln ρ_c)
        #[rustfmt::skip]
        let system = Matrix4::new(
            -1.0,    0.0, 2.0, 0.0,
             0.0,   -1.0, 1.0, 1.0,
             1.0,    1.0, 0.0, 0.0,
             b - 4.0, 1.0, 0.0, a,
        );
        let constant = Vector4::new(
            (pi1 * R_GAS / MU).ln(),
            -(2.0 * pi2).ln(),
            -(3.0 * alpha * R_GAS / (4.0 * MU * pi3)).ln(),
            -(32.0 * pi4 / 3.0).ln() + SIGMA_SB.ln() - law.kappa0().ln(),
        );
        // Coefficients of ln Q0 and ln ω on the right-hand side
        let along_q = Vector4::new(0.0, 0.0, 1.0, -1.0);
        let along_w = Vector4::new(-2.0, 0.0, -1.0, 0.0);

        let inverse = system
            .try_inverse()
            .ok_or(ConfigError::SingularStructure(law.name()))?;
        let base = inverse * constant;
        let dq = inverse * along_q;
        let dw = inverse * along_w;

        // ln Q0 = ln(3/8π) + 4 ln GM + ln F - 7 ln h,  ln ω = 2 ln GM - 3 ln h
        let ln_gm = gm.ln();
        let q_const = (3.0 / (8.0 * PI)).ln() + 4.0 * ln_gm;
        let w_const = 2.0 * ln_gm;
        let power_law = |k: usize, scale: f64| PowerLaw {
            coefficient: scale * (base[k] + dq[k] * q_const + dw[k] * w_const).exp(),
            f_exponent: dq[k],
            h_exponent: -7.0 * dq[k] - 3.0 * dw[k],
        };

        Ok(Self {
            law,
            gm,
            central_temperature: power_law(0, 1.0),
            sigma: power_law(1, 2.0),
            height: power_law(2, 1.0),
        })
    }

    pub fn law(&self) -> OpacityLaw {
        self.law
    }

    /// Exponent `m` of `W ∝ F^(1-m)`.
    pub fn m(&self) -> f64 {
        1.0 - self.sigma.f_exponent
    }

    /// Full surface density `Σ = 2 Σ0` (g/cm²).
    pub fn sigma(&self, f: f64, h: f64) -> f64 {
        self.sigma.eval(f, h)
    }

    /// Half-thickness `z0` (cm).
    pub fn height(&self, f: f64, h: f64) -> f64 {
        self.height.eval(f, h)
    }

    /// Mid-plane temperature (K).
    pub fn central_temperature(&self, f: f64, h: f64) -> f64 {
        self.central_temperature.eval(f, h)
    }

    /// `W = 4π h³ Σ / (GM)²`
    pub fn w(&self, f: f64, h: f64) -> f64 {
        4.0 * PI * h.powi(3) * self.sigma(f, h) / (self.gm * self.gm)
    }

    /// Closure over the active range, in the shape the diffusion kernel expects.
    pub fn w_range(&self, h: &[f64], f: &[f64], first: usize, last: usize) -> Vec<f64> {
        (first..=last).map(|i| self.w(f[i], h[i])).collect()
    }

    /// Power law of `Σ`, used to normalise initial conditions.
    pub fn sigma_law(&self) -> PowerLaw {
        self.sigma
    }
}
