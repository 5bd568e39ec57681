// Freeze-out from a tabulated hydrodynamic profile: temperature and
// transverse flow rapidity are looked up on a radial grid instead of being
// parametrized, everything else follows the blast-wave recipe.

use super::{cooper_frye_weight, draw_momentum, FreezeoutModel, IntegrandSample, TWO_PI};
use crate::error::{Error, Result};
use crate::fourvec::FourVector;
use crate::settings::FireballGeometry;
use crate::species::ParticleSpecies;
use crate::thermo::Thermodynamics;
use crate::utilities::interpolate_linear;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Radial grid of local freeze-out conditions, typically extracted from a
/// hydrodynamic evolution. Grids must be equally sized, non-empty, and
/// ordered in radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadialProfile {
    pub radius: Vec<f64>,
    pub temperature: Vec<f64>,
    pub flow_rapidity: Vec<f64>,
}

impl RadialProfile {
    pub fn validate(&self) -> Result<()> {
        if self.radius.is_empty() {
            return Err(Error::Config("radial profile is empty".into()));
        }
        if self.radius.len() != self.temperature.len()
            || self.radius.len() != self.flow_rapidity.len()
        {
            return Err(Error::Config(
                "radial profile grids have mismatched lengths".into(),
            ));
        }
        if !self.radius.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::Config(
                "radial profile grid must be strictly increasing".into(),
            ));
        }
        if self.temperature.iter().any(|&t| !(t.is_finite() && t > 0.0)) {
            return Err(Error::Config(
                "radial profile temperatures must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn outer_radius(&self) -> f64 {
        *self.radius.last().unwrap_or(&0.0)
    }
}

#[derive(Debug, Clone)]
pub struct HydroProfile {
    profile: RadialProfile,
    geometry: FireballGeometry,
    thermo: Thermodynamics,
    only_back_flow: bool,
}

impl HydroProfile {
    pub fn new(
        profile: RadialProfile,
        geometry: FireballGeometry,
        thermo: Thermodynamics,
        only_back_flow: bool,
    ) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            profile,
            geometry,
            thermo,
            only_back_flow,
        })
    }
}

impl FreezeoutModel for HydroProfile {
    fn sample_integrand(
        &self,
        species: &ParticleSpecies,
        rng: &mut dyn RngCore,
    ) -> IntegrandSample {
        let geo = &self.geometry;
        let r_max = self.profile.outer_radius();

        let r = r_max * rng.gen::<f64>();
        let phi_s = TWO_PI * rng.gen::<f64>();
        let eta = geo.eta_max * (2.0 * rng.gen::<f64>() - 1.0);

        let draw = draw_momentum(species.mass, geo.rapidity_max, rng);

        // Local conditions from the grid
        let temperature = interpolate_linear(&self.profile.radius, &self.profile.temperature, r);
        let rho = interpolate_linear(&self.profile.radius, &self.profile.flow_rapidity, r);

        let pu = draw.mt * rho.cosh() * (draw.rapidity - eta).cosh()
            - draw.pt * rho.sinh() * (draw.phi_p - phi_s).cos();
        let dsp = geo.proper_time * r * draw.mt * (draw.rapidity - eta).cosh();

        let mu = self.thermo.chemical_potential(species);
        let weight = cooper_frye_weight(
            species,
            draw.pt,
            draw.jacobian,
            dsp,
            pu,
            mu,
            temperature,
            self.only_back_flow,
        );

        let position = FourVector::new(
            geo.proper_time * eta.cosh(),
            r * phi_s.cos(),
            r * phi_s.sin(),
            geo.proper_time * eta.sinh(),
        );
        IntegrandSample {
            weight,
            position,
            momentum: draw.momentum,
        }
    }

    fn hyper_cube_volume(&self) -> f64 {
        let geo = &self.geometry;
        self.profile.outer_radius()
            * TWO_PI
            * (2.0 * geo.eta_max)
            * TWO_PI
            * (2.0 * geo.rapidity_max)
    }

    fn name(&self) -> &'static str {
        "hydro-profile"
    }
}
