// Rejection-based phase-space emission against the Cooper-Frye integrand,
// plus the offline Monte Carlo calibration that produces the per-species
// integrand bounds and mean yields.

use crate::error::{Error, Result};
use crate::models::FreezeoutModel;
use crate::multiplicity::{MultiplicityRow, MultiplicityTable};
use crate::particle::Particle;
use crate::species::{SpeciesDatabase, SpeciesId};
use log::{debug, warn};
use rand::{Rng, RngCore};

/// One accepted emission, with the weight and retry count kept for
/// diagnostics and soundness checks.
#[derive(Debug, Clone)]
pub struct Emission {
    pub particle: Particle,
    pub weight: f64,
    pub attempts: usize,
}

/// Draw freeze-out samples until one passes `U(0,1) * bound < weight`.
///
/// `bound` must upper-bound the integrand over the model's hyper-cube or the
/// accepted distribution is biased; a stale bound is reported with a warning
/// when an accepted weight exceeds it. The loop terminates probabilistically;
/// `max_attempts` turns a pathological configuration into a surfaced
/// `RejectionExhausted` instead of a hang, and the caller skips the particle.
pub fn emit(
    model: &dyn FreezeoutModel,
    species_id: SpeciesId,
    db: &SpeciesDatabase,
    bound: f64,
    max_attempts: usize,
    rng: &mut dyn RngCore,
) -> Result<Emission> {
    let species = db.get(species_id);
    for attempt in 1..=max_attempts {
        let sample = model.sample_integrand(species, rng);
        if rng.gen::<f64>() * bound < sample.weight {
            if sample.weight > bound {
                warn!(
                    "integrand weight {:.6e} exceeds calibrated bound {:.6e} for '{}'; \
                     recalibration needed",
                    sample.weight, bound, species.name
                );
            }
            return Ok(Emission {
                particle: Particle::new(species_id, sample.momentum, sample.position),
                weight: sample.weight,
                attempts: attempt,
            });
        }
    }
    Err(Error::RejectionExhausted {
        context: "emission",
        attempts: max_attempts,
    })
}

/// Offline calibration: for every species draw `n_samples` points uniformly
/// over the model's hyper-cube, tracking the running integrand maximum and
/// the running mean scaled by the hyper-cube volume.
///
/// Run once before generation (or replaced by a table import); generation
/// never runs against an uncalibrated table.
pub fn calibrate(
    model: &dyn FreezeoutModel,
    db: &SpeciesDatabase,
    n_samples: usize,
    rng: &mut dyn RngCore,
) -> Result<MultiplicityTable> {
    if n_samples == 0 {
        return Err(Error::Config(
            "calibration sample count must be positive".into(),
        ));
    }
    let volume = model.hyper_cube_volume();
    let mut rows = Vec::with_capacity(db.len());
    for (_, species) in db.iter() {
        let mut max_integrand: f64 = 0.0;
        let mut sum = 0.0;
        for _ in 0..n_samples {
            let w = model.sample_integrand(species, rng).weight;
            if w > max_integrand {
                max_integrand = w;
            }
            sum += w;
        }
        let mean_yield = sum / n_samples as f64 * volume;
        debug!(
            "calibrated '{}' on {}: max integrand {:.6e}, mean yield {:.4}",
            species.name,
            model.name(),
            max_integrand,
            mean_yield
        );
        rows.push(MultiplicityRow {
            name: species.name.clone(),
            max_integrand,
            mean_yield,
        });
    }
    Ok(MultiplicityTable::new(rows))
}
