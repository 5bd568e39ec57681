// Thermodynamic potentials at freeze-out: temperature plus the chemical
// potentials conjugate to each conserved charge. Pure lookup, no state.

use crate::species::ParticleSpecies;
use serde::{Deserialize, Serialize};

/// Freeze-out temperature and per-charge chemical potentials, all in GeV.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Thermodynamics {
    pub temperature: f64,
    pub mu_baryon: f64,
    pub mu_isospin: f64,
    pub mu_strange: f64,
    pub mu_charm: f64,
}

impl Thermodynamics {
    /// Chemical potential of a species: the charge-weighted sum of the
    /// potentials, mu = B*mu_B + I3*mu_I3 + S*mu_S + C*mu_C.
    pub fn chemical_potential(&self, species: &ParticleSpecies) -> f64 {
        species.baryon * self.mu_baryon
            + species.isospin3 * self.mu_isospin
            + species.strangeness * self.mu_strange
            + species.charm * self.mu_charm
    }
}

impl Default for Thermodynamics {
    /// Chemical freeze-out values for top RHIC energy.
    fn default() -> Self {
        Self {
            temperature: 0.1656,
            mu_baryon: 0.0285,
            mu_isospin: -0.0009,
            mu_strange: 0.0069,
            mu_charm: 0.0,
        }
    }
}
