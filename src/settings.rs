use crate::error::Result;
use crate::models::hydro::RadialProfile;
use crate::multiplicity::FluctuationMode;
use crate::thermo::Thermodynamics;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which freeze-out model variant the generator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelType {
    BlastWave,
    TiltedBlastWave,
    HadronGas,
    HydroProfile,
}

/// Geometry of the emitting fireball. Lengths and times in fm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FireballGeometry {
    /// Transverse radius of the cylinder.
    pub transverse_radius: f64,
    /// Freeze-out proper time tau0.
    pub proper_time: f64,
    /// Space-time rapidity range |eta| <= eta_max.
    pub eta_max: f64,
    /// Particle rapidity sampling range |y| <= rapidity_max.
    pub rapidity_max: f64,
    /// Surface value of the transverse flow rapidity, rho(r) = rho_max r/R.
    pub flow_rapidity_max: f64,
    /// Hypersurface tilt d(tau)/dr for the tilted blast-wave variant.
    /// Negative dSigma.P (back flow) only occurs for tilt > 1, since
    /// mT cosh(y - eta) >= pT bounds the surface integrand otherwise.
    pub tilt: f64,
    /// Mean exponential emission delay for the tilted variant; 0 disables it.
    pub emission_delay: f64,
    /// Half-length of the static hadron-gas source along the beam axis.
    pub half_length: f64,
    /// Lab time of the constant-time hadron-gas freeze-out surface.
    pub source_lifetime: f64,
}

impl Default for FireballGeometry {
    fn default() -> Self {
        Self {
            transverse_radius: 8.0,
            proper_time: 9.0,
            eta_max: 2.0,
            rapidity_max: 4.0,
            flow_rapidity_max: 0.9,
            tilt: 0.1,
            emission_delay: 0.0,
            half_length: 8.0,
            source_lifetime: 10.0,
        }
    }
}

/// Full configuration surface of the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: ModelType,
    pub fluctuations: FluctuationMode,
    /// Skip photon species during emission.
    pub disable_photons: bool,
    /// Samples per species in the offline calibration pass.
    pub n_calibration_samples: usize,
    /// Keep only (sign-flipped) back-flow contributions instead of zeroing
    /// them; never both policies at once.
    pub only_back_flow: bool,
    pub decay_disable_2_prong: bool,
    pub decay_disable_3_prong: bool,
    pub decay_no_weak: bool,
    /// Keep decayed parents in the finished event.
    pub decay_store_decayed: bool,
    /// Cap on rejection retries (emission and 3-body sampling). The retry
    /// loops terminate probabilistically; the cap turns a pathological
    /// configuration into a surfaced skip instead of a hang.
    pub max_rejection_attempts: usize,
    pub seed: Option<u64>,
    pub geometry: FireballGeometry,
    pub thermodynamics: Thermodynamics,
    /// Radial grid for the hydro-profile model; required by that model only.
    pub hydro_profile: Option<RadialProfile>,
}

impl Settings {
    /// Load settings from a JSON file. Omitted fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: ModelType::BlastWave,
            fluctuations: FluctuationMode::Poisson,
            disable_photons: false,
            n_calibration_samples: 500_000,
            only_back_flow: false,
            decay_disable_2_prong: false,
            decay_disable_3_prong: false,
            decay_no_weak: false,
            decay_store_decayed: true,
            max_rejection_attempts: 100_000,
            seed: None,
            geometry: FireballGeometry::default(),
            thermodynamics: Thermodynamics::default(),
            hydro_profile: None,
        }
    }
}
