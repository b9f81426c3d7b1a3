use std::sync::Arc;

use serde::Serialize;
use units::{Length, Time};

use super::cache::ObservableCache;
use super::initial;
use crate::config::{DiskConfig, GridScale, IrradiationFactor};
use crate::constants::{C, PI, SIGMA_SB};
use crate::error::ConfigError;
use crate::opacity::VerticalStructure;
use crate::photometry::{planck_band, planck_lambda, trapezoid, Band, Passband};

/// Disk on an angular momentum grid with lazily derived observables.
///
/// The grid `h` and radii `R = h²/GM` are fixed at construction. The torque
/// profile `F`, the active range `[first, last]` and the time cursor change
/// only through a committed evolution step, which also drops every cached
/// observable.
#[derive(Debug, Clone)]
pub struct DiskState {
    config: Arc<DiskConfig>,
    structure: VerticalStructure,
    gm: f64,
    eta: f64,
    cos_i_over_d2: f64,
    h: Vec<f64>,
    r: Vec<f64>,
    f: Vec<f64>,
    first: usize,
    last: usize,
    f_in: f64,
    t: f64,
    i_t: usize,
    mdot_in_prev: f64,
    cache: ObservableCache,
}

/// New field and range produced by a successful step.
#[derive(Debug, Clone)]
pub(crate) struct Commit {
    pub f: Vec<f64>,
    pub first: usize,
    pub last: usize,
    pub f_in: f64,
    pub tau: f64,
}

impl DiskState {
    /// Builds the grid and the initial torque profile.
    pub fn new(config: Arc<DiskConfig>) -> Result<Self, ConfigError> {
        let mut state = Self::empty(config)?;
        let cfg = &state.config;
        state.f = initial::initial_torque(
            cfg.disk.initial,
            cfg.disk.normalization,
            &state.h,
            &state.r,
            &state.structure,
        )?;
        Ok(state)
    }

    /// Builds the grid and takes `f` as the torque profile.
    pub fn with_torque(config: Arc<DiskConfig>, f: Vec<f64>) -> Result<Self, ConfigError> {
        let mut state = Self::empty(config)?;
        if f.len() != state.h.len() {
            return Err(ConfigError::TorqueLength {
                expected: state.h.len(),
                actual: f.len(),
            });
        }
        state.f = f;
        Ok(state)
    }

    fn empty(config: Arc<DiskConfig>) -> Result<Self, ConfigError> {
        config.validate()?;

        let gm = config.gm();
        let structure = VerticalStructure::new(config.disk.opacity, config.binary.alpha, gm)?;
        let h_in = (gm * config.inner_radius().to_cm()).sqrt();
        let h_out = (gm * config.outer_radius().to_cm()).sqrt();
        let nx = config.calculation.nx;
        let h = grid(config.calculation.grid, h_in, h_out, nx);
        let r = h.iter().map(|&hi| hi * hi / gm).collect();
        let distance = config.flux.distance.to_cm();

        Ok(Self {
            structure,
            gm,
            eta: config.efficiency(),
            cos_i_over_d2: config.flux.cos_i() / (distance * distance),
            h,
            r,
            f: vec![0.0; nx],
            first: 0,
            last: nx - 1,
            f_in: 0.0,
            t: 0.0,
            i_t: 0,
            mdot_in_prev: f64::NEG_INFINITY,
            cache: ObservableCache::default(),
            config,
        })
    }

    pub fn config(&self) -> &DiskConfig {
        &self.config
    }

    pub(crate) fn shared_config(&self) -> Arc<DiskConfig> {
        Arc::clone(&self.config)
    }

    pub fn structure(&self) -> &VerticalStructure {
        &self.structure
    }

    /// `G M_x` (cm³/s²)
    pub fn gm(&self) -> f64 {
        self.gm
    }

    /// Accretion efficiency `η`
    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn nx(&self) -> usize {
        self.h.len()
    }

    /// Specific angular momentum grid (cm²/s)
    pub fn h(&self) -> &[f64] {
        &self.h
    }

    /// Radii of the grid points (cm)
    pub fn r(&self) -> &[f64] {
        &self.r
    }

    /// Viscous torque (dyn·cm)
    pub fn f(&self) -> &[f64] {
        &self.f
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn last(&self) -> usize {
        self.last
    }

    /// Torque imposed at the inner boundary
    pub fn f_in(&self) -> f64 {
        self.f_in
    }

    /// Elapsed time (s)
    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn time(&self) -> Time {
        Time::from_seconds(self.t)
    }

    /// Number of committed steps
    pub fn i_t(&self) -> usize {
        self.i_t
    }

    /// Accretion rate through the inner edge (g/s), `dF/dh` there.
    pub fn mdot_in(&self) -> f64 {
        let i = self.first;
        (self.f[i + 1] - self.f[i]) / (self.h[i + 1] - self.h[i])
    }

    /// Accretion rate before the last committed step; `-∞` before the first.
    pub fn mdot_in_prev(&self) -> f64 {
        self.mdot_in_prev
    }

    /// Accretion rate onto the disk through the outer edge (g/s).
    pub fn mdot_out(&self) -> f64 {
        self.config.disk.mdot_out.to_grams_per_second()
    }

    /// Outer radius of the hot disk.
    pub fn r_hot(&self) -> Length {
        Length::from_cm(self.r[self.last])
    }

    pub fn cache(&self) -> &ObservableCache {
        &self.cache
    }

    pub(crate) fn commit(&mut self, commit: Commit) {
        self.mdot_in_prev = self.mdot_in();
        self.f = commit.f;
        self.first = commit.first;
        self.last = commit.last;
        self.f_in = commit.f_in;
        self.t += commit.tau;
        self.i_t += 1;
        self.cache.invalidate();
    }

    fn active(&self) -> impl Iterator<Item = usize> {
        self.first..=self.last
    }

    fn active_r(&self) -> &[f64] {
        &self.r[self.first..=self.last]
    }

    /// `W = 4π h³ Σ / (GM)²` over the active range.
    pub fn w(&self) -> &[f64] {
        self.cache.w.get_or_compute(|| {
            self.structure
                .w_range(&self.h, &self.f, self.first, self.last)
        })
    }

    /// Surface density (g/cm²).
    pub fn sigma(&self) -> &[f64] {
        self.cache.sigma.get_or_compute(|| {
            self.active()
                .map(|i| self.structure.sigma(self.f[i], self.h[i]))
                .collect()
        })
    }

    /// Half-thickness (cm).
    pub fn height(&self) -> &[f64] {
        self.cache.height.get_or_compute(|| {
            self.active()
                .map(|i| self.structure.height(self.f[i], self.h[i]))
                .collect()
        })
    }

    /// Photosphere temperature from viscous heating alone (K).
    pub fn tph_vis(&self) -> &[f64] {
        self.cache.tph_vis.get_or_compute(|| {
            self.active()
                .map(|i| {
                    let omega = self.gm * self.gm / self.h[i].powi(3);
                    let q_vis = 3.0 / (8.0 * PI) * self.f[i] * omega / self.r[i].powi(2);
                    (q_vis.max(0.0) / SIGMA_SB).powf(0.25)
                })
                .collect()
        })
    }

    /// Colour temperature of the X-ray emitting surface (K).
    pub fn tph_x(&self) -> &[f64] {
        self.cache.tph_x.get_or_compute(|| {
            let fc = self.config.flux.colour_factor;
            self.tph_vis().iter().map(|t| fc * t).collect()
        })
    }

    /// Irradiation factor.
    pub fn cirr(&self) -> &[f64] {
        self.cache.cirr.get_or_compute(|| {
            let cirr = self.config.irradiation.cirr;
            match self.config.irradiation.factor {
                IrradiationFactor::Const => vec![cirr; self.last - self.first + 1],
                IrradiationFactor::Square => self
                    .height()
                    .iter()
                    .zip(self.active_r())
                    .map(|(z, r)| cirr * (z / r).powi(2))
                    .collect(),
            }
        })
    }

    /// Irradiation flux from the central source (erg/(s·cm²)).
    pub fn qx(&self) -> &[f64] {
        self.cache.qx.get_or_compute(|| {
            let luminosity = self.eta * self.mdot_in().max(0.0) * C * C;
            self.cirr()
                .iter()
                .zip(self.active_r())
                .map(|(cirr, r)| cirr * luminosity / (4.0 * PI * r * r))
                .collect()
        })
    }

    /// Irradiation temperature (K).
    pub fn tirr(&self) -> &[f64] {
        self.cache.tirr.get_or_compute(|| {
            self.qx()
                .iter()
                .map(|q| (q / SIGMA_SB).powf(0.25))
                .collect()
        })
    }

    /// Photosphere temperature including irradiation (K).
    pub fn tph(&self) -> &[f64] {
        self.cache.tph.get_or_compute(|| {
            self.tph_vis()
                .iter()
                .zip(self.tirr())
                .map(|(tv, ti)| (tv.powi(4) + ti.powi(4)).powf(0.25))
                .collect()
        })
    }

    /// Trapezoid rule over the radii of the active range.
    pub fn integrate(&self, values: &[f64]) -> f64 {
        trapezoid(self.active_r(), values)
    }

    /// Mass of the hot disk (g).
    pub fn mdisk(&self) -> f64 {
        *self.cache.mdisk.get_or_compute(|| {
            let ring: Vec<f64> = self
                .sigma()
                .iter()
                .zip(self.active_r())
                .map(|(s, r)| s * 2.0 * PI * r)
                .collect();
            self.integrate(&ring)
        })
    }

    /// X-ray luminosity of both faces in the `[emin, emax]` band (erg/s).
    pub fn lx(&self) -> f64 {
        *self.cache.lx.get_or_compute(|| {
            let flux = &self.config.flux;
            let (nu_min, nu_max) = (flux.emin.to_hertz(), flux.emax.to_hertz());
            let ring: Vec<f64> = self
                .tph_x()
                .iter()
                .zip(self.active_r())
                .map(|(&t, &r)| 2.0 * PI * r * PI * planck_band(nu_min, nu_max, t))
                .collect();
            2.0 * self.integrate(&ring) / flux.colour_factor.powi(4)
        })
    }

    /// `∫ 2πR B_λ(Tph) dR` over the active range.
    fn i_lambda(&self, lambda: f64) -> f64 {
        let ring: Vec<f64> = self
            .tph()
            .iter()
            .zip(self.active_r())
            .map(|(&t, &r)| 2.0 * PI * r * planck_lambda(lambda, t))
            .collect();
        self.integrate(&ring)
    }

    /// Observed spectral flux density per unit wavelength (erg/(s·cm²·cm)).
    pub fn flux_lambda(&self, lambda: f64) -> f64 {
        self.i_lambda(lambda) * self.cos_i_over_d2
    }

    /// Observed spectral flux density per unit frequency at wavelength
    /// `lambda` (erg/(s·cm²·Hz)).
    pub fn flux(&self, lambda: f64) -> f64 {
        self.flux_lambda(lambda) * lambda * lambda / C
    }

    /// Magnitude at wavelength `lambda` for zero point `f0` (erg/(s·cm²·cm)).
    pub fn magnitude(&self, lambda: f64, f0: f64) -> f64 {
        -2.5 * (self.flux_lambda(lambda) / f0).log10()
    }

    /// Transmission-weighted mean `F_λ` (erg/(s·cm²·cm)).
    pub fn flux_passband(&self, passband: &Passband) -> f64 {
        passband.weighted_mean(|lambda| self.flux_lambda(lambda))
    }

    /// Memoised broad-band magnitude.
    pub fn band_magnitude(&self, band: Band) -> f64 {
        let index = Band::ALL.iter().position(|&b| b == band).unwrap_or(0);
        *self.cache.magnitudes[index]
            .get_or_compute(|| self.magnitude(band.wavelength(), band.zero_point()))
    }

    pub fn m_u(&self) -> f64 {
        self.band_magnitude(Band::U)
    }

    pub fn m_b(&self) -> f64 {
        self.band_magnitude(Band::B)
    }

    pub fn m_v(&self) -> f64 {
        self.band_magnitude(Band::V)
    }

    pub fn m_r(&self) -> f64 {
        self.band_magnitude(Band::R)
    }

    pub fn m_i(&self) -> f64 {
        self.band_magnitude(Band::I)
    }

    pub fn m_j(&self) -> f64 {
        self.band_magnitude(Band::J)
    }

    /// Global quantities at the current time, one output row.
    pub fn summary(&self) -> StepSummary {
        let out = self.last - self.first;
        let r_out = self.r[self.last];
        StepSummary {
            t: self.time(),
            mdot_in: self.mdot_in(),
            mdisk: self.mdisk(),
            r_hot: self.r_hot(),
            cirr_out: self.cirr()[out],
            h_to_r_out: self.height()[out] / r_out,
            teff_out: self.tph()[out],
            tirr_out: self.tirr()[out],
            qirr_to_qvis_out: (self.tirr()[out] / self.tph_vis()[out]).powi(4),
            lx: self.lx(),
            magnitudes: Band::ALL.map(|band| self.band_magnitude(band)),
            fnu: self
                .config
                .flux
                .lambdas
                .iter()
                .map(|lambda| self.flux(lambda.to_cm()))
                .collect(),
            passband_flux: self
                .config
                .flux
                .passbands
                .iter()
                .map(|p| self.flux_passband(p))
                .collect(),
        }
    }

    /// Radial structure of the active disk.
    pub fn profile(&self) -> RadialProfile {
        let range = self.first..=self.last;
        RadialProfile {
            t: self.time(),
            mdot_in: self.mdot_in(),
            h: self.h[range.clone()].to_vec(),
            r: self.r[range.clone()].to_vec(),
            f: self.f[range].to_vec(),
            w: self.w().to_vec(),
            sigma: self.sigma().to_vec(),
            tph: self.tph().to_vec(),
            tph_vis: self.tph_vis().to_vec(),
            tirr: self.tirr().to_vec(),
            cirr: self.cirr().to_vec(),
            qx: self.qx().to_vec(),
            height: self.height().to_vec(),
        }
    }
}

fn grid(scale: GridScale, h_in: f64, h_out: f64, nx: usize) -> Vec<f64> {
    let span = (nx - 1) as f64;
    let mut h: Vec<f64> = match scale {
        GridScale::Log => {
            let ratio = h_out / h_in;
            (0..nx).map(|i| h_in * ratio.powf(i as f64 / span)).collect()
        }
        GridScale::Linear => (0..nx)
            .map(|i| h_in + (h_out - h_in) * i as f64 / span)
            .collect(),
    };
    h[0] = h_in;
    h[nx - 1] = h_out;
    h
}

/// Global disk quantities at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSummary {
    pub t: Time,
    /// Accretion rate through the inner edge (g/s)
    pub mdot_in: f64,
    /// Hot disk mass (g)
    pub mdisk: f64,
    pub r_hot: Length,
    pub cirr_out: f64,
    pub h_to_r_out: f64,
    /// Photosphere temperature at the outer edge (K)
    pub teff_out: f64,
    /// Irradiation temperature at the outer edge (K)
    pub tirr_out: f64,
    pub qirr_to_qvis_out: f64,
    /// X-ray band luminosity (erg/s)
    pub lx: f64,
    /// U, B, V, R, I, J magnitudes
    pub magnitudes: [f64; 6],
    /// `F_ν` at the configured wavelengths (erg/(s·cm²·Hz))
    pub fnu: Vec<f64>,
    /// Mean `F_λ` in the configured passbands (erg/(s·cm²·cm))
    pub passband_flux: Vec<f64>,
}

/// Radial structure of the active disk at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialProfile {
    pub t: Time,
    pub mdot_in: f64,
    pub h: Vec<f64>,
    pub r: Vec<f64>,
    pub f: Vec<f64>,
    pub w: Vec<f64>,
    pub sigma: Vec<f64>,
    pub tph: Vec<f64>,
    pub tph_vis: Vec<f64>,
    pub tirr: Vec<f64>,
    pub cirr: Vec<f64>,
    pub qx: Vec<f64>,
    pub height: Vec<f64>,
}
