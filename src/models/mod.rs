// Freeze-out model variants behind a single object-safe interface.
//
// Every variant follows the same recipe: draw a point uniformly over the
// model's sampling hyper-cube, map the unit interval onto an unbounded
// transverse momentum, and evaluate the Cooper-Frye integrand at that point.
// Variants differ only in their spatial support and flow velocity field.

pub mod blast_wave;
pub mod hadron_gas;
pub mod hydro;
pub mod tilted;

use crate::error::{Error, Result};
use crate::fourvec::FourVector;
use crate::settings::{ModelType, Settings};
use crate::species::ParticleSpecies;
use rand::{Rng, RngCore};

pub use blast_wave::BlastWave;
pub use hadron_gas::HadronGas;
pub use hydro::{HydroProfile, RadialProfile};
pub use tilted::TiltedBlastWave;

pub(crate) const TWO_PI: f64 = 2.0 * std::f64::consts::PI;
pub(crate) const TWO_PI_CUBED: f64 = TWO_PI * TWO_PI * TWO_PI;

/// One candidate emission: integrand weight plus the space-time point and
/// four-momentum it was evaluated at.
#[derive(Debug, Clone, Copy)]
pub struct IntegrandSample {
    pub weight: f64,
    pub position: FourVector,
    pub momentum: FourVector,
}

/// Strategy interface for the Cooper-Frye emission integrand.
///
/// Implementations are stateless apart from their parameters, so a single
/// model instance can be shared across workers behind an `Arc`.
pub trait FreezeoutModel: Send + Sync {
    /// Draw one candidate sample uniformly over the model's hyper-cube and
    /// return it with its integrand weight.
    fn sample_integrand(&self, species: &ParticleSpecies, rng: &mut dyn RngCore)
        -> IntegrandSample;

    /// Product of the coordinate ranges the uniform draw covers; converts a
    /// mean integrand value into a mean yield during calibration.
    fn hyper_cube_volume(&self) -> f64;

    fn name(&self) -> &'static str;
}

/// Build the configured model variant. Unknown or incomplete configurations
/// are fatal before any event runs.
pub fn build_model(settings: &Settings) -> Result<Box<dyn FreezeoutModel>> {
    let geo = &settings.geometry;
    if geo.transverse_radius <= 0.0 || geo.rapidity_max <= 0.0 {
        return Err(Error::Config(
            "fireball geometry must have positive radius and rapidity range".into(),
        ));
    }
    if settings.thermodynamics.temperature <= 0.0 {
        return Err(Error::Config("freeze-out temperature must be positive".into()));
    }
    match settings.model {
        ModelType::BlastWave => Ok(Box::new(BlastWave::new(
            *geo,
            settings.thermodynamics,
            settings.only_back_flow,
        ))),
        ModelType::TiltedBlastWave => Ok(Box::new(TiltedBlastWave::new(
            *geo,
            settings.thermodynamics,
            settings.only_back_flow,
        ))),
        ModelType::HadronGas => Ok(Box::new(HadronGas::new(
            *geo,
            settings.thermodynamics,
            settings.only_back_flow,
        ))),
        ModelType::HydroProfile => {
            let profile = settings.hydro_profile.clone().ok_or_else(|| {
                Error::Config("hydro-profile model requires a radial profile".into())
            })?;
            Ok(Box::new(HydroProfile::new(
                profile,
                *geo,
                settings.thermodynamics,
                settings.only_back_flow,
            )?))
        }
    }
}

/// Transverse-momentum draw shared by every variant: `pT = zeta/(1-zeta)`
/// maps the unit interval onto [0, inf) with Jacobian `1/(1-zeta)^2`.
pub(crate) struct MomentumDraw {
    pub momentum: FourVector,
    pub pt: f64,
    pub jacobian: f64,
    pub phi_p: f64,
    pub rapidity: f64,
    pub mt: f64,
}

pub(crate) fn draw_momentum(
    mass: f64,
    rapidity_max: f64,
    rng: &mut dyn RngCore,
) -> MomentumDraw {
    // zeta in [0, 1) keeps the denominator strictly positive
    let zeta: f64 = rng.gen();
    let pt = zeta / (1.0 - zeta);
    let jacobian = 1.0 / ((1.0 - zeta) * (1.0 - zeta));
    let phi_p = TWO_PI * rng.gen::<f64>();
    let rapidity = rapidity_max * (2.0 * rng.gen::<f64>() - 1.0);
    let mt = (mass * mass + pt * pt).sqrt();
    let momentum = FourVector::new(
        mt * rapidity.cosh(),
        pt * phi_p.cos(),
        pt * phi_p.sin(),
        mt * rapidity.sinh(),
    );
    MomentumDraw {
        momentum,
        pt,
        jacobian,
        phi_p,
        rapidity,
        mt,
    }
}

/// Evaluate the Cooper-Frye weight
/// `g pT dPt (dSigma.P) / ((2pi)^3 (stat + exp((P.U - mu)/T)))`
/// with the back-flow policy applied to `dsp = dSigma.P`.
///
/// Default policy zeroes negative contributions; `only_back_flow` instead
/// keeps exclusively the sign-flipped negative ones. Never both.
pub(crate) fn cooper_frye_weight(
    species: &ParticleSpecies,
    pt: f64,
    jacobian: f64,
    dsp: f64,
    pu: f64,
    mu: f64,
    temperature: f64,
    only_back_flow: bool,
) -> f64 {
    let dsp = if only_back_flow {
        if dsp < 0.0 {
            -dsp
        } else {
            return 0.0;
        }
    } else if dsp < 0.0 {
        return 0.0;
    } else {
        dsp
    };
    let denom = species.statistics + ((pu - mu) / temperature).exp();
    if denom <= 0.0 {
        // Bose occupation blows up when mu reaches the local energy; treat
        // the point as outside the physical support
        return 0.0;
    }
    let weight = species.degeneracy * pt * jacobian * dsp / (TWO_PI_CUBED * denom);
    if weight.is_finite() {
        weight
    } else {
        0.0
    }
}
