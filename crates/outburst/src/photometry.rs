//! Black-body radiation, photometric bands and passbands.
//!
//! Every annulus of the disk is treated as a black body at its photosphere
//! temperature. Disk-integrated quantities are built by the disk state on top
//! of the primitives here.
//!
//! # References
//! - Bessell, Castelli & Plez (1998) - "Model atmospheres broad-band colors,
//!   bolometric corrections and temperature calibrations for O - M stars"

use serde::{Deserialize, Serialize};
use units::Length;

use crate::constants::{C, H_PLANCK, K_B};
use crate::error::ConfigError;

/// Frequencies sampled when integrating a Planck spectrum over a band.
pub const BAND_SAMPLES: usize = 100;

/// Planck spectral radiance per unit frequency `B_ν(T)` (erg/(s·cm²·Hz·sr)).
pub fn planck_nu(nu: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    let x = H_PLANCK * nu / (K_B * t);
    if x > 700.0 {
        return 0.0;
    }
    2.0 * H_PLANCK * nu.powi(3) / (C * C) / x.exp_m1()
}

/// Planck spectral radiance per unit wavelength `B_λ(T)` (erg/(s·cm²·cm·sr)).
pub fn planck_lambda(lambda: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    let x = H_PLANCK * C / (lambda * K_B * t);
    if x > 700.0 {
        return 0.0;
    }
    2.0 * H_PLANCK * C * C / lambda.powi(5) / x.exp_m1()
}

/// `∫ B_ν(T) dν` between `nu_min` and `nu_max`, trapezoid on a logarithmic grid.
pub fn planck_band(nu_min: f64, nu_max: f64, t: f64) -> f64 {
    let ln_min = nu_min.ln();
    let step = (nu_max.ln() - ln_min) / (BAND_SAMPLES - 1) as f64;
    let nu: Vec<f64> = (0..BAND_SAMPLES)
        .map(|i| (ln_min + step * i as f64).exp())
        .collect();
    let b: Vec<f64> = nu.iter().map(|&v| planck_nu(v, t)).collect();
    trapezoid(&nu, &b)
}

/// Trapezoid rule for samples `y` over abscissae `x`.
pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(x, y)| 0.5 * (x[1] - x[0]) * (y[0] + y[1]))
        .sum()
}

/// Johnson-Cousins-Bessell broad bands used for the summary magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    U,
    B,
    V,
    R,
    I,
    J,
}

impl Band {
    pub const ALL: [Band; 6] = [Band::U, Band::B, Band::V, Band::R, Band::I, Band::J];

    /// Effective wavelength (cm).
    pub fn wavelength(&self) -> f64 {
        let angstrom = match self {
            Self::U => 3600.0,
            Self::B => 4380.0,
            Self::V => 5450.0,
            Self::R => 6410.0,
            Self::I => 7980.0,
            Self::J => 12200.0,
        };
        Length::from_angstrom(angstrom).to_cm()
    }

    /// Flux density of a zero-magnitude star (erg/(s·cm²·cm)).
    pub fn zero_point(&self) -> f64 {
        // Bessell et al. (1998), Table A2, in 1e-11 erg/(s·cm²·Å)
        let f = match self {
            Self::U => 417.5,
            Self::B => 632.0,
            Self::V => 363.1,
            Self::R => 217.7,
            Self::I => 112.6,
            Self::J => 31.47,
        };
        f * 1e-11 / Length::from_angstrom(1.0).to_cm()
    }
}

/// Tabulated transmission curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PassbandTable", into = "PassbandTable")]
pub struct Passband {
    name: String,
    lambdas: Vec<f64>,
    transmissions: Vec<f64>,
    norm: f64,
}

/// Serialised form of a [`Passband`], wavelengths in Ångström.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassbandTable {
    pub name: String,
    pub angstrom: Vec<f64>,
    pub transmission: Vec<f64>,
}

impl Passband {
    /// Builds a passband from wavelength/transmission pairs.
    ///
    /// Wavelengths must be strictly increasing and transmissions
    /// non-negative with a positive integral.
    pub fn new(
        name: impl Into<String>,
        lambdas: &[Length],
        transmissions: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let fail = |reason| ConfigError::Passband {
            name: name.clone(),
            reason,
        };
        if lambdas.len() != transmissions.len() {
            return Err(fail("wavelength and transmission columns differ in length"));
        }
        if lambdas.len() < 2 {
            return Err(fail("needs at least two points"));
        }
        let lambdas: Vec<f64> = lambdas.iter().map(Length::to_cm).collect();
        if lambdas.windows(2).any(|w| w[1] <= w[0]) || lambdas[0] <= 0.0 {
            return Err(fail("wavelengths must be positive and strictly increasing"));
        }
        if transmissions.iter().any(|&t| !(t >= 0.0 && t.is_finite())) {
            return Err(fail("transmission must be non-negative"));
        }
        let norm = trapezoid(&lambdas, &transmissions);
        if norm <= 0.0 {
            return Err(fail("transmission integrates to zero"));
        }
        Ok(Self {
            name,
            lambdas,
            transmissions,
            norm,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wavelength samples (cm).
    pub fn lambdas(&self) -> &[f64] {
        &self.lambdas
    }

    pub fn transmissions(&self) -> &[f64] {
        &self.transmissions
    }

    /// Transmission-weighted mean of `f(λ)` over the passband.
    pub fn weighted_mean(&self, f: impl Fn(f64) -> f64) -> f64 {
        let weighted: Vec<f64> = self
            .lambdas
            .iter()
            .zip(&self.transmissions)
            .map(|(&lambda, &t)| t * f(lambda))
            .collect();
        trapezoid(&self.lambdas, &weighted) / self.norm
    }
}

impl TryFrom<PassbandTable> for Passband {
    type Error = ConfigError;

    fn try_from(table: PassbandTable) -> Result<Self, Self::Error> {
        let lambdas: Vec<Length> = table
            .angstrom
            .iter()
            .map(|&a| Length::from_angstrom(a))
            .collect();
        Passband::new(table.name, &lambdas, table.transmission)
    }
}

impl From<Passband> for PassbandTable {
    fn from(passband: Passband) -> Self {
        Self {
            angstrom: passband
                .lambdas
                .iter()
                .map(|&l| Length::from_cm(l).to_angstrom())
                .collect(),
            transmission: passband.transmissions,
            name: passband.name,
        }
    }
}
