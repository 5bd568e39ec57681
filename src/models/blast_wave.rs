// Boost-invariant blast-wave freeze-out: emission from a cylinder at
// constant proper time, with a transverse flow rapidity growing linearly
// with radius and longitudinal flow fixed by the space-time rapidity.

use super::{cooper_frye_weight, draw_momentum, FreezeoutModel, IntegrandSample, TWO_PI};
use crate::fourvec::FourVector;
use crate::settings::FireballGeometry;
use crate::species::ParticleSpecies;
use crate::thermo::Thermodynamics;
use rand::{Rng, RngCore};

#[derive(Debug, Clone)]
pub struct BlastWave {
    geometry: FireballGeometry,
    thermo: Thermodynamics,
    only_back_flow: bool,
}

impl BlastWave {
    pub fn new(geometry: FireballGeometry, thermo: Thermodynamics, only_back_flow: bool) -> Self {
        Self {
            geometry,
            thermo,
            only_back_flow,
        }
    }
}

impl FreezeoutModel for BlastWave {
    fn sample_integrand(
        &self,
        species: &ParticleSpecies,
        rng: &mut dyn RngCore,
    ) -> IntegrandSample {
        let geo = &self.geometry;

        // Spatial coordinates, uniform over the cylinder parametrization
        let r = geo.transverse_radius * rng.gen::<f64>();
        let phi_s = TWO_PI * rng.gen::<f64>();
        let eta = geo.eta_max * (2.0 * rng.gen::<f64>() - 1.0);

        let draw = draw_momentum(species.mass, geo.rapidity_max, rng);

        // Hubble-like transverse flow profile
        let rho = geo.flow_rapidity_max * r / geo.transverse_radius;
        let pu = draw.mt * rho.cosh() * (draw.rapidity - eta).cosh()
            - draw.pt * rho.sinh() * (draw.phi_p - phi_s).cos();
        // Constant-tau surface: dSigma.P = tau r mT cosh(y - eta) dr dphi deta
        let dsp = geo.proper_time * r * draw.mt * (draw.rapidity - eta).cosh();

        let mu = self.thermo.chemical_potential(species);
        let weight = cooper_frye_weight(
            species,
            draw.pt,
            draw.jacobian,
            dsp,
            pu,
            mu,
            self.thermo.temperature,
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
        // (r, phi_s, eta, zeta, phi_p, y); the zeta range is the unit interval
        geo.transverse_radius * TWO_PI * (2.0 * geo.eta_max) * TWO_PI * (2.0 * geo.rapidity_max)
    }

    fn name(&self) -> &'static str {
        "blast-wave"
    }
}
