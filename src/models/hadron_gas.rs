// Static hadron-gas source: a thermal cylinder at rest, frozen out on a
// constant lab-time surface. No geometric flow, so P.U reduces to the
// particle energy and dSigma.P to E times the cylindrical volume measure.

use super::{cooper_frye_weight, draw_momentum, FreezeoutModel, IntegrandSample, TWO_PI};
use crate::fourvec::FourVector;
use crate::settings::FireballGeometry;
use crate::species::ParticleSpecies;
use crate::thermo::Thermodynamics;
use rand::{Rng, RngCore};

#[derive(Debug, Clone)]
pub struct HadronGas {
    geometry: FireballGeometry,
    thermo: Thermodynamics,
    only_back_flow: bool,
}

impl HadronGas {
    pub fn new(geometry: FireballGeometry, thermo: Thermodynamics, only_back_flow: bool) -> Self {
        Self {
            geometry,
            thermo,
            only_back_flow,
        }
    }
}

impl FreezeoutModel for HadronGas {
    fn sample_integrand(
        &self,
        species: &ParticleSpecies,
        rng: &mut dyn RngCore,
    ) -> IntegrandSample {
        let geo = &self.geometry;

        let r = geo.transverse_radius * rng.gen::<f64>();
        let phi_s = TWO_PI * rng.gen::<f64>();
        let z = geo.half_length * (2.0 * rng.gen::<f64>() - 1.0);

        let draw = draw_momentum(species.mass, geo.rapidity_max, rng);

        // Rest-frame fluid: P.U = E, dSigma.P = E r dr dphi dz
        let energy = draw.momentum.t;
        let dsp = r * energy;

        let mu = self.thermo.chemical_potential(species);
        let weight = cooper_frye_weight(
            species,
            draw.pt,
            draw.jacobian,
            dsp,
            energy,
            mu,
            self.thermo.temperature,
            self.only_back_flow,
        );

        let position = FourVector::new(geo.source_lifetime, r * phi_s.cos(), r * phi_s.sin(), z);
        IntegrandSample {
            weight,
            position,
            momentum: draw.momentum,
        }
    }

    fn hyper_cube_volume(&self) -> f64 {
        let geo = &self.geometry;
        geo.transverse_radius
            * TWO_PI
            * (2.0 * geo.half_length)
            * TWO_PI
            * (2.0 * geo.rapidity_max)
    }

    fn name(&self) -> &'static str {
        "hadron-gas"
    }
}
