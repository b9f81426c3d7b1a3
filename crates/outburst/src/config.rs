//! Configuration of a disk evolution run.
//!
//! Parameters are grouped the way an astronomer describes an outburst: the
//! binary system, the disk and its initial state, self-irradiation, the
//! observer, and the numerical scheme. All groups carry defaults so a run can
//! be described by overriding only what differs; [`DiskConfig::validate`]
//! rejects inconsistent combinations before anything is built.

use serde::{Deserialize, Serialize};
use units::{Frequency, Length, Mass, MassRate, Temperature, Time};

use crate::binary;
use crate::constants::G;
use crate::diffusion::DEFAULT_MAX_ITERATIONS;
use crate::error::ConfigError;
use crate::opacity::OpacityLaw;
use crate::photometry::Passband;
use crate::wind::WindModel;

/// Complete, immutable description of a run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskConfig {
    pub binary: BinaryParams,
    pub disk: DiskParams,
    pub irradiation: IrradiationParams,
    pub flux: FluxParams,
    pub calculation: CalculationParams,
    pub wind: WindModel,
    /// Present for a magnetised neutron star accretor
    pub neutron_star: Option<NeutronStarParams>,
}

impl DiskConfig {
    /// Checks every parameter group and the constraints between them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.binary.validate()?;
        self.disk.validate()?;
        self.irradiation.validate(self.disk.boundary)?;
        self.flux.validate()?;
        self.calculation.validate()?;
        self.wind.validate()?;
        if let Some(ns) = &self.neutron_star {
            ns.validate()?;
        }

        let (rin, rout) = (self.inner_radius(), self.outer_radius());
        if !(rin.to_cm() > 0.0) {
            return Err(ConfigError::NotPositive {
                name: "rin",
                value: rin.to_cm(),
            });
        }
        if rin >= rout {
            return Err(ConfigError::InnerBeyondOuter {
                rin: rin.to_cm(),
                rout: rout.to_cm(),
            });
        }
        Ok(())
    }

    /// `G M_x` (cm³/s²).
    pub fn gm(&self) -> f64 {
        G * self.binary.mx.to_grams()
    }

    /// Inner disk radius: explicit, else the neutron star surface or ISCO,
    /// else the black hole ISCO.
    pub fn inner_radius(&self) -> Length {
        if let Some(rin) = self.binary.rin {
            return rin;
        }
        match &self.neutron_star {
            Some(ns) => ns.default_inner_radius(self.binary.mx, self.binary.kerr),
            None => binary::isco_radius(self.binary.mx, self.binary.kerr),
        }
    }

    /// Outer disk radius: explicit, else the tidal radius.
    pub fn outer_radius(&self) -> Length {
        self.binary.rout.unwrap_or_else(|| {
            binary::tidal_radius(self.binary.mx, self.binary.mopt, self.binary.period)
        })
    }

    /// Accretion efficiency `η` of the accretor.
    pub fn efficiency(&self) -> f64 {
        binary::efficiency(self.binary.mx, self.binary.kerr)
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Binary system and disk extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryParams {
    /// Shakura-Sunyaev viscosity parameter
    pub alpha: f64,
    /// Accretor mass
    pub mx: Mass,
    /// Dimensionless Kerr parameter of a black hole accretor
    pub kerr: f64,
    /// Companion (optical star) mass
    pub mopt: Mass,
    /// Orbital period
    pub period: Time,
    /// Inner disk radius; derived from the accretor when absent
    pub rin: Option<Length>,
    /// Outer disk radius; the tidal radius when absent
    pub rout: Option<Length>,
}

impl Default for BinaryParams {
    fn default() -> Self {
        Self {
            alpha: 0.25,
            mx: Mass::from_solar_masses(5.0),
            kerr: 0.0,
            mopt: Mass::from_solar_masses(0.5),
            period: Time::from_days(0.25),
            rin: None,
            rout: None,
        }
    }
}

impl BinaryParams {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("alpha", self.alpha)?;
        positive("Mx", self.mx.to_grams())?;
        positive("Mopt", self.mopt.to_grams())?;
        positive("period", self.period.to_seconds())?;
        if !(self.kerr.abs() <= 1.0) {
            return Err(ConfigError::OutOfUnitInterval {
                name: "|kerr|",
                value: self.kerr,
            });
        }
        Ok(())
    }
}

/// Which temperature sets the outer edge of the hot disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryCondition {
    /// Photosphere temperature must stay above `T_hot`
    #[default]
    Teff,
    /// Irradiation flux must stay above `σ T_hot⁴`
    Tirr,
}

/// Shape of the initial torque or surface density profile, in terms of
/// `ξ = (h - h_in) / (h_out - h_in)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InitialCondition {
    /// `F ∝ ξ^power`
    PowerF { power: f64 },
    /// `Σ ∝ ξ^power`
    PowerSigma { power: f64 },
    /// `F ∝ sin(ξ π/2)`
    SineF,
    /// `F ∝ exp(-(ξ - mu)² / 2 sigma²)`
    GaussF { mu: f64, sigma: f64 },
    /// Quasi-stationary decay profile `F ∝ f(h/h_out) ξ h_out/h`, where `f`
    /// solves the separated diffusion equation with `f(0) = 0` and
    /// `f'(1) = 0` (Lipunova & Shakura 2000)
    Quasistat,
}

impl InitialCondition {
    /// Short name used in messages and output headers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PowerF { .. } => "powerF",
            Self::PowerSigma { .. } => "powerSigma",
            Self::SineF => "sineF",
            Self::GaussF { .. } => "gaussF",
            Self::Quasistat => "quasistat",
        }
    }

    /// Whether the profile has a finite slope at the inner edge, so an
    /// initial accretion rate can fix its scale.
    pub fn supports_accretion_rate(&self) -> bool {
        matches!(self, Self::SineF | Self::Quasistat)
    }
}

impl Default for InitialCondition {
    fn default() -> Self {
        Self::PowerF { power: 6.0 }
    }
}

/// How the initial profile is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Normalization {
    /// Maximum viscous torque (dyn·cm)
    F0(f64),
    /// Total disk mass
    DiskMass(Mass),
    /// Accretion rate through the inner edge, for `SineF` and `Quasistat`
    /// profiles only
    AccretionRate(MassRate),
}

impl Default for Normalization {
    fn default() -> Self {
        Self::F0(2e37)
    }
}

/// Disk physics and initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskParams {
    pub opacity: OpacityLaw,
    /// Accretion rate onto the disk through its outer radius
    pub mdot_out: MassRate,
    pub boundary: BoundaryCondition,
    /// Threshold temperature of the outer boundary condition
    pub t_hot: Temperature,
    pub initial: InitialCondition,
    pub normalization: Normalization,
}

impl Default for DiskParams {
    fn default() -> Self {
        Self {
            opacity: OpacityLaw::Kramers,
            mdot_out: MassRate::zero(),
            boundary: BoundaryCondition::Teff,
            t_hot: Temperature::zero(),
            initial: InitialCondition::default(),
            normalization: Normalization::default(),
        }
    }
}

impl DiskParams {
    fn validate(&self) -> Result<(), ConfigError> {
        match self.initial {
            InitialCondition::GaussF { mu, sigma } => {
                if !(mu > 0.0 && mu <= 1.0) {
                    return Err(ConfigError::OutOfUnitInterval { name: "gauss mu", value: mu });
                }
                positive("gauss sigma", sigma)?;
            }
            InitialCondition::PowerF { power } | InitialCondition::PowerSigma { power } => {
                if !(power.is_finite() && power >= 0.0) {
                    return Err(ConfigError::NotPositive {
                        name: "power order",
                        value: power,
                    });
                }
            }
            InitialCondition::SineF | InitialCondition::Quasistat => {}
        }
        if matches!(self.normalization, Normalization::AccretionRate(_))
            && !self.initial.supports_accretion_rate()
        {
            return Err(ConfigError::AccretionRateNormalization(self.initial.name()));
        }
        match self.normalization {
            Normalization::F0(f0) => positive("F0", f0),
            Normalization::DiskMass(m) => positive("Mdisk0", m.to_grams()),
            Normalization::AccretionRate(mdot) => positive("Mdot0", mdot.to_grams_per_second()),
        }
    }
}

/// Dependence of the irradiation factor on the disk shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IrradiationFactor {
    /// `Cirr` independent of the disk shape
    #[default]
    Const,
    /// `Cirr (z/R)²`
    Square,
}

/// Self-irradiation of the disk by the central X-ray source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IrradiationParams {
    pub cirr: f64,
    pub factor: IrradiationFactor,
}

impl IrradiationParams {
    fn validate(&self, boundary: BoundaryCondition) -> Result<(), ConfigError> {
        if boundary == BoundaryCondition::Tirr && !(self.cirr > 0.0) {
            return Err(ConfigError::IrradiationRequired);
        }
        Ok(())
    }
}

/// Observer and spectral settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluxParams {
    /// Ratio of colour to effective temperature in the X-ray band
    pub colour_factor: f64,
    /// Lower edge of the X-ray band
    pub emin: Frequency,
    /// Upper edge of the X-ray band
    pub emax: Frequency,
    /// Inclination of the disk to the line of sight (degrees)
    pub inclination: f64,
    pub distance: Length,
    /// Wavelengths of the extra spectral flux densities in the summary
    pub lambdas: Vec<Length>,
    pub passbands: Vec<Passband>,
}

impl Default for FluxParams {
    fn default() -> Self {
        Self {
            colour_factor: 1.7,
            emin: Frequency::from_kev(1.0),
            emax: Frequency::from_kev(12.0),
            inclination: 0.0,
            distance: Length::from_kpc(10.0),
            lambdas: Vec::new(),
            passbands: Vec::new(),
        }
    }
}

impl FluxParams {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("colour factor", self.colour_factor)?;
        positive("distance", self.distance.to_cm())?;
        positive("emin", self.emin.to_hertz())?;
        if !(self.inclination >= 0.0 && self.inclination <= 90.0) {
            return Err(ConfigError::Inclination(self.inclination));
        }
        if self.emin >= self.emax {
            return Err(ConfigError::EmptyBand {
                emin: self.emin.to_hertz(),
                emax: self.emax.to_hertz(),
            });
        }
        for lambda in &self.lambdas {
            positive("lambda", lambda.to_cm())?;
        }
        Ok(())
    }

    pub fn cos_i(&self) -> f64 {
        self.inclination.to_radians().cos()
    }
}

/// Spacing of the angular momentum grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridScale {
    #[default]
    Log,
    Linear,
}

/// Numerical scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationParams {
    /// Duration of the run
    pub time: Time,
    /// Time step
    pub tau: Time,
    /// Number of grid points
    pub nx: usize,
    pub grid: GridScale,
    /// Convergence threshold of the diffusion solver
    pub eps: f64,
    /// Iteration cap of the diffusion solver
    pub max_iterations: usize,
}

impl Default for CalculationParams {
    fn default() -> Self {
        Self {
            time: Time::from_days(50.0),
            tau: Time::from_days(0.25),
            nx: 1000,
            grid: GridScale::Log,
            eps: 1e-6,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl CalculationParams {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("time", self.time.to_seconds())?;
        positive("tau", self.tau.to_seconds())?;
        positive("eps", self.eps)?;
        if self.nx < 3 {
            return Err(ConfigError::GridTooSmall(self.nx));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::NotPositive {
                name: "max_iterations",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Number of steps covering `time`.
    pub fn steps(&self) -> usize {
        (self.time.to_seconds() / self.tau.to_seconds()).round() as usize
    }
}

/// Structure of the neutron star that sets its radius and ISCO.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum NeutronStarProperties {
    /// Non-rotating star of fixed radius
    #[default]
    Dummy,
    /// Rotating star, fits of Sibgatullin & Sunyaev (2000)
    SibgatullinSunyaev2000 {
        /// Spin frequency (Hz)
        freqx: f64,
    },
}

impl NeutronStarProperties {
    /// Radius of the dummy star (cm).
    pub const DUMMY_RADIUS: f64 = 1e6;

    /// Stellar radius.
    pub fn radius(&self) -> Length {
        match *self {
            Self::Dummy => Length::from_cm(Self::DUMMY_RADIUS),
            Self::SibgatullinSunyaev2000 { freqx } => {
                let f = freqx / 1000.0;
                let km = 12.44 - 3.061 * f + 0.843 * f.powi(2) + 0.6 * f.powi(3) + 1.56 * f.powi(4);
                Length::from_km(km)
            }
        }
    }

    /// ISCO radius when the spin fit provides one.
    pub fn isco(&self) -> Option<Length> {
        match *self {
            Self::Dummy => None,
            Self::SibgatullinSunyaev2000 { freqx } => {
                let f = freqx / 1000.0;
                let gap_km = 1.44 - 3.061 * f + 0.843 * f.powi(2) + 0.6 * f.powi(3) - 0.22 * f.powi(4);
                Some(Length::from_km(gap_km) + self.radius())
            }
        }
    }

    /// Spin frequency (Hz), zero for the dummy star.
    pub fn spin_frequency(&self) -> f64 {
        match *self {
            Self::Dummy => 0.0,
            Self::SibgatullinSunyaev2000 { freqx } => freqx,
        }
    }
}

/// Coefficient `k_t` of the magnetic torque `k_t μ² / R_m³` at the inner edge.
///
/// The fastness `ω = (R_m / R_cor)^(3/2)` compares the spin of the star with
/// the Keplerian rotation at the magnetospheric radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TorqueCoefficient {
    /// Same coefficient everywhere; the torque acts on a propeller only
    Const { value: f64 },
    /// `inside` below corotation and `outside` beyond it, acting on both sides
    CorotationStep { inside: f64, outside: f64 },
    /// `inside` below corotation; beyond it rises from `inside` towards
    /// `outside` as `1 - 1/ω` (Romanova et al. 2018)
    Romanova2018 { inside: f64, outside: f64 },
}

impl Default for TorqueCoefficient {
    fn default() -> Self {
        Self::Const { value: 1.0 / 3.0 }
    }
}

impl TorqueCoefficient {
    /// Default step with `1/3` on both sides.
    pub fn corotation_step() -> Self {
        Self::CorotationStep {
            inside: 1.0 / 3.0,
            outside: 1.0 / 3.0,
        }
    }

    /// Default Romanova prescription with `1/3` on both sides.
    pub fn romanova2018() -> Self {
        Self::Romanova2018 {
            inside: 1.0 / 3.0,
            outside: 1.0 / 3.0,
        }
    }

    /// Coefficient at magnetospheric radius `r_m` for corotation radius
    /// `r_cor`, or `None` where no torque acts on the disk.
    pub fn at(&self, r_m: f64, r_cor: f64) -> Option<f64> {
        let beyond = r_m > r_cor;
        match *self {
            Self::Const { value } => beyond.then_some(value),
            Self::CorotationStep { inside, outside } => Some(if beyond { outside } else { inside }),
            Self::Romanova2018 { inside, outside } => {
                if !beyond {
                    return Some(inside);
                }
                let fastness = (r_m / r_cor).powf(1.5);
                Some(inside + (outside - inside) * (1.0 - 1.0 / fastness))
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Const { value } => positive("k_t", value),
            Self::CorotationStep { inside, outside } | Self::Romanova2018 { inside, outside } => {
                positive("k_t inside", inside)?;
                positive("k_t outside", outside)
            }
        }
    }
}

/// Magnetised neutron star accretor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeutronStarParams {
    pub properties: NeutronStarProperties,
    /// Magnetic dipole moment (G·cm³)
    pub magnetic_moment: f64,
    /// Lower bound of the magnetospheric radius; the inner disk radius when absent
    pub r_m_min: Option<Length>,
    /// Upper bound of the magnetospheric radius
    pub r_dead: Option<Length>,
    /// Torque coefficient of the magnetospheric boundary condition
    pub k_t: TorqueCoefficient,
    /// Ratio of the magnetospheric to the Alfvén radius
    pub xi: f64,
}

impl Default for NeutronStarParams {
    fn default() -> Self {
        Self {
            properties: NeutronStarProperties::Dummy,
            magnetic_moment: 1e27,
            r_m_min: None,
            r_dead: None,
            k_t: TorqueCoefficient::default(),
            xi: 0.7,
        }
    }
}

impl NeutronStarParams {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.magnetic_moment >= 0.0 && self.magnetic_moment.is_finite()) {
            return Err(ConfigError::NegativeMagneticMoment(self.magnetic_moment));
        }
        positive("xi", self.xi)?;
        self.k_t.validate()?;
        if let NeutronStarProperties::SibgatullinSunyaev2000 { freqx } = self.properties {
            positive("freqx", freqx)?;
        }
        if let Some(r) = self.r_m_min {
            positive("r_m_min", r.to_cm())?;
        }
        if let Some(r) = self.r_dead {
            positive("r_dead", r.to_cm())?;
        }
        Ok(())
    }

    /// Larger of the stellar radius and the ISCO.
    pub fn default_inner_radius(&self, mx: Mass, kerr: f64) -> Length {
        let surface = self.properties.radius();
        let isco = self
            .properties
            .isco()
            .unwrap_or_else(|| binary::isco_radius(mx, kerr));
        if isco > surface {
            isco
        } else {
            surface
        }
    }

    /// Corotation radius `(GM / (2π f)²)^(1/3)`; infinite for a non-rotating star.
    pub fn corotation_radius(&self, gm: f64) -> f64 {
        let omega = 2.0 * std::f64::consts::PI * self.properties.spin_frequency();
        if omega <= 0.0 {
            return f64::INFINITY;
        }
        (gm / (omega * omega)).cbrt()
    }
}
