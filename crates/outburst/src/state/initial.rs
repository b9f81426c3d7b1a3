//! Initial torque profile.
//!
//! The profile shape is set on `ξ = (h - h_in) / (h_out - h_in)` and scaled by
//! one of three normalisations. Disk mass scales as `F0^(1-m)`, so a target
//! mass fixes `F0` in closed form without iteration.
//!
//! The quasi-stationary profile separates `F = φ(t) f(h/h_out)` in
//! `∂W/∂t = ∂²F/∂h²` with `W ∝ F^(1-m) h^n`, which leaves
//! `f'' = -λ f^(1-m) x^n`. It is found by shooting from `f(0) = 0` to the
//! point where `f'` vanishes.
//!
//! # References
//! - Lipunova & Shakura (2000) - "New solution to viscous evolution of
//!   accretion disks in binary systems"

use std::f64::consts::FRAC_PI_2;

use crate::config::{InitialCondition, Normalization};
use crate::error::ConfigError;
use crate::opacity::VerticalStructure;
use crate::photometry::trapezoid;

/// Profile shape with unit maximum.
pub fn shape(initial: InitialCondition, h: &[f64], structure: &VerticalStructure) -> Vec<f64> {
    let (h_in, h_out) = (h[0], h[h.len() - 1]);
    let xi = |hi: f64| (hi - h_in) / (h_out - h_in);

    let raw: Vec<f64> = match initial {
        InitialCondition::PowerF { power } => h.iter().map(|&hi| xi(hi).powf(power)).collect(),
        InitialCondition::PowerSigma { power } => {
            // Invert Σ = k F^(1-m) h^p for F, dropping the constant k
            let law = structure.sigma_law();
            h.iter()
                .map(|&hi| {
                    let sigma = xi(hi).powf(power);
                    (sigma / hi.powf(law.h_exponent)).powf(1.0 / law.f_exponent)
                })
                .collect()
        }
        InitialCondition::SineF => h.iter().map(|&hi| (xi(hi) * FRAC_PI_2).sin()).collect(),
        InitialCondition::GaussF { mu, sigma } => h
            .iter()
            .map(|&hi| (-(xi(hi) - mu).powi(2) / (2.0 * sigma * sigma)).exp())
            .collect(),
        InitialCondition::Quasistat => {
            // W = 4π h³ Σ / (GM)²
            let law = structure.sigma_law();
            let profile = QuasiStationary::new(law.f_exponent, 3.0 + law.h_exponent);
            h.iter()
                .map(|&hi| profile.eval(hi / h_out) * xi(hi) * h_out / hi)
                .collect()
        }
    };

    let peak = raw.iter().cloned().fold(0.0, f64::max);
    if peak > 0.0 {
        raw.iter().map(|v| v / peak).collect()
    } else {
        raw
    }
}

/// Disk mass `∫ Σ 2πR dR` of the profile `f`.
pub fn disk_mass(f: &[f64], h: &[f64], r: &[f64], structure: &VerticalStructure) -> f64 {
    let ring: Vec<f64> = f
        .iter()
        .zip(h)
        .zip(r)
        .map(|((&fi, &hi), &ri)| structure.sigma(fi, hi) * 2.0 * std::f64::consts::PI * ri)
        .collect();
    trapezoid(r, &ring)
}

/// Scaled initial torque profile over the whole grid.
pub fn initial_torque(
    initial: InitialCondition,
    normalization: Normalization,
    h: &[f64],
    r: &[f64],
    structure: &VerticalStructure,
) -> Result<Vec<f64>, ConfigError> {
    let unit = shape(initial, h, structure);
    let name = initial.name();

    let f0 = match normalization {
        Normalization::F0(f0) => f0,
        Normalization::DiskMass(mass) => {
            let unit_mass = disk_mass(&unit, h, r, structure);
            if !(unit_mass > 0.0) {
                return Err(ConfigError::DegenerateInitialCondition(name));
            }
            (mass.to_grams() / unit_mass).powf(1.0 / (1.0 - structure.m()))
        }
        Normalization::AccretionRate(mdot) => {
            let unit_mdot = (unit[1] - unit[0]) / (h[1] - h[0]);
            if !(unit_mdot > 0.0) {
                return Err(ConfigError::DegenerateInitialCondition(name));
            }
            mdot.to_grams_per_second() / unit_mdot
        }
    };

    Ok(unit.into_iter().map(|v| f0 * v).collect())
}

const SHOOTING_STEP: f64 = 1e-4;
const MAX_SHOOTING_STEPS: usize = 1_000_000;

/// Solution of `f'' = -f^a x^n` on `[0, 1]` with `f(0) = 0`, `f'(1) = 0`,
/// scaled to `f(1) = 1`.
#[derive(Debug, Clone)]
pub(crate) struct QuasiStationary {
    /// `f` on a uniform grid of step `SHOOTING_STEP` in the unscaled variable
    values: Vec<f64>,
    /// Unscaled point where `f'` vanishes
    x_star: f64,
    f_star: f64,
}

impl QuasiStationary {
    pub(crate) fn new(a: f64, n: f64) -> Self {
        let rhs = |x: f64, f: f64| if f > 0.0 { -f.powf(a) * x.powf(n) } else { 0.0 };
        let dx = SHOOTING_STEP;

        let (mut f, mut df) = (0.0_f64, 1.0_f64);
        let mut values = vec![f];
        let mut x_star = None;
        for k in 0..MAX_SHOOTING_STEPS {
            let x = k as f64 * dx;
            // Classical RK4 on (f, f')
            let (k1f, k1g) = (df, rhs(x, f));
            let (k2f, k2g) = (df + 0.5 * dx * k1g, rhs(x + 0.5 * dx, f + 0.5 * dx * k1f));
            let (k3f, k3g) = (df + 0.5 * dx * k2g, rhs(x + 0.5 * dx, f + 0.5 * dx * k2f));
            let (k4f, k4g) = (df + dx * k3g, rhs(x + dx, f + dx * k3f));
            let df_next = df + dx / 6.0 * (k1g + 2.0 * k2g + 2.0 * k3g + k4g);
            f += dx / 6.0 * (k1f + 2.0 * k2f + 2.0 * k3f + k4f);
            values.push(f);

            if df_next <= 0.0 {
                x_star = Some(x + dx * df / (df - df_next));
                break;
            }
            df = df_next;
        }

        let x_star = x_star.unwrap_or((values.len() - 1) as f64 * dx);
        let f_star = interpolate(&values, x_star / dx);
        Self {
            values,
            x_star,
            f_star,
        }
    }

    /// Scaled profile at `x`, clamped to `[0, 1]`.
    pub(crate) fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        interpolate(&self.values, x * self.x_star / SHOOTING_STEP) / self.f_star
    }
}

/// Linear interpolation of uniformly sampled `values` at fractional index `at`.
fn interpolate(values: &[f64], at: f64) -> f64 {
    let last = values.len() - 1;
    let i = (at.floor() as usize).min(last.saturating_sub(1));
    let t = at - i as f64;
    values[i] + t * (values[(i + 1).min(last)] - values[i])
}
