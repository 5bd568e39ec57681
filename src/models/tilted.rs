// Tilted-hypersurface blast wave: the freeze-out proper time grows with
// radius, which tilts the hypersurface normal and lets dSigma.P go negative
// (back flow). Optionally each emission is delayed by an exponential proper
// time, modelling late surface evaporation.

use super::{cooper_frye_weight, draw_momentum, FreezeoutModel, IntegrandSample, TWO_PI};
use crate::fourvec::FourVector;
use crate::settings::FireballGeometry;
use crate::species::ParticleSpecies;
use crate::thermo::Thermodynamics;
use rand::{Rng, RngCore};

#[derive(Debug, Clone)]
pub struct TiltedBlastWave {
    geometry: FireballGeometry,
    thermo: Thermodynamics,
    only_back_flow: bool,
}

impl TiltedBlastWave {
    pub fn new(geometry: FireballGeometry, thermo: Thermodynamics, only_back_flow: bool) -> Self {
        Self {
            geometry,
            thermo,
            only_back_flow,
        }
    }
}

impl FreezeoutModel for TiltedBlastWave {
    fn sample_integrand(
        &self,
        species: &ParticleSpecies,
        rng: &mut dyn RngCore,
    ) -> IntegrandSample {
        let geo = &self.geometry;

        let r = geo.transverse_radius * rng.gen::<f64>();
        let phi_s = TWO_PI * rng.gen::<f64>();
        let eta = geo.eta_max * (2.0 * rng.gen::<f64>() - 1.0);

        let draw = draw_momentum(species.mass, geo.rapidity_max, rng);

        let rho = geo.flow_rapidity_max * r / geo.transverse_radius;
        let pu = draw.mt * rho.cosh() * (draw.rapidity - eta).cosh()
            - draw.pt * rho.sinh() * (draw.phi_p - phi_s).cos();

        // Surface tau(r) = tau0 + tilt * r; the radial gradient enters the
        // normal and can flip the sign of dSigma.P
        let tau_r = geo.proper_time + geo.tilt * r;
        let dsp = tau_r
            * r
            * (draw.mt * (draw.rapidity - eta).cosh()
                - geo.tilt * draw.pt * (draw.phi_p - phi_s).cos());

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

        // Optional exponential emission delay along the flow line
        let tau_emit = if geo.emission_delay > 0.0 {
            tau_r - geo.emission_delay * (1.0 - rng.gen::<f64>()).ln()
        } else {
            tau_r
        };
        let position = FourVector::new(
            tau_emit * eta.cosh(),
            r * phi_s.cos(),
            r * phi_s.sin(),
            tau_emit * eta.sinh(),
        );
        IntegrandSample {
            weight,
            position,
            momentum: draw.momentum,
        }
    }

    fn hyper_cube_volume(&self) -> f64 {
        let geo = &self.geometry;
        geo.transverse_radius * TWO_PI * (2.0 * geo.eta_max) * TWO_PI * (2.0 * geo.rapidity_max)
    }

    fn name(&self) -> &'static str {
        "tilted-blast-wave"
    }
}
