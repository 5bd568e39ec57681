// Event assembly: one generator context owns the RNG stream, particle pool,
// freeze-out model, and calibrated multiplicity table, and turns them into
// finished events one at a time.

use crate::decay::{run_cascade, DecayConfig};
use crate::emission;
use crate::error::{Error, Result};
use crate::models::{build_model, FreezeoutModel};
use crate::multiplicity::{sample_multiplicity, MultiplicityTable};
use crate::particle::Particle;
use crate::pool::{ParticleIdx, ParticlePool};
use crate::settings::Settings;
use crate::species::SpeciesDatabase;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// One finished trial: the particle list snapshot in deterministic order
/// (emission order per species, then decay order).
///
/// `Particle::parent` entries are rewritten to index into `particles`; a
/// child whose parent was dropped from the event (`decay_store_decayed`
/// unset) carries `None`.
#[derive(Debug, Clone)]
pub struct Event {
    pub event_id: u64,
    pub particles: Vec<Particle>,
}

impl Event {
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Per-run generation context.
///
/// Owns a single deterministic RNG stream, the particle pool, and the event
/// scratch list; shares the read-only species database by `Arc`. For
/// parallel scaling, construct one generator per worker with distinct seeds;
/// no state is shared between them apart from the database.
pub struct EventGenerator {
    settings: Settings,
    decay_cfg: DecayConfig,
    model: Box<dyn FreezeoutModel>,
    db: Arc<SpeciesDatabase>,
    table: MultiplicityTable,
    pool: ParticlePool,
    scratch: Vec<ParticleIdx>,
    rng: StdRng,
    next_event_id: u64,
}

impl EventGenerator {
    /// Build a generator around an existing multiplicity table (for example
    /// one imported from a previous calibration run). The table must match
    /// the database; generation never runs uncalibrated.
    pub fn new(
        settings: Settings,
        db: Arc<SpeciesDatabase>,
        table: MultiplicityTable,
    ) -> Result<Self> {
        if db.is_empty() {
            return Err(Error::Config("species database is empty".into()));
        }
        if settings.max_rejection_attempts == 0 {
            return Err(Error::Config(
                "max_rejection_attempts must be positive".into(),
            ));
        }
        table.validate_against(&db)?;
        let model = build_model(&settings)?;
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            "event generator ready: model {}, {} species",
            model.name(),
            db.len()
        );
        Ok(Self {
            decay_cfg: DecayConfig::from_settings(&settings),
            settings,
            model,
            db,
            table,
            pool: ParticlePool::new(),
            scratch: Vec::new(),
            rng,
            next_event_id: 0,
        })
    }

    /// Build a generator by running the offline calibration pass first. A
    /// failed calibration yields no generator and no partial table.
    pub fn with_calibration(settings: Settings, db: Arc<SpeciesDatabase>) -> Result<Self> {
        if db.is_empty() {
            return Err(Error::Config("species database is empty".into()));
        }
        let model = build_model(&settings)?;
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ 0x5ca1_ab1e),
            None => StdRng::from_entropy(),
        };
        info!(
            "calibrating {} with {} samples per species",
            model.name(),
            settings.n_calibration_samples
        );
        let table = emission::calibrate(
            model.as_ref(),
            &db,
            settings.n_calibration_samples,
            &mut rng,
        )?;
        Self::new(settings, db, table)
    }

    pub fn multiplicity_table(&self) -> &MultiplicityTable {
        &self.table
    }

    pub fn species_database(&self) -> &SpeciesDatabase {
        &self.db
    }

    /// Generate one event: reset the pool, draw per-species multiplicities,
    /// emit that many particles per species through the rejection sampler,
    /// cascade the unstable ones, and hand back a snapshot.
    pub fn generate_event(&mut self) -> Result<Event> {
        self.pool.reset();
        self.scratch.clear();

        for (id, species) in self.db.iter() {
            if self.settings.disable_photons && species.is_photon() {
                continue;
            }
            let row = self.table.row(id);
            let n = sample_multiplicity(row.mean_yield, self.settings.fluctuations, &mut self.rng);
            for _ in 0..n {
                match emission::emit(
                    self.model.as_ref(),
                    id,
                    &self.db,
                    row.max_integrand,
                    self.settings.max_rejection_attempts,
                    &mut self.rng,
                ) {
                    Ok(emission) => {
                        let idx = self.pool.acquire(emission.particle);
                        self.scratch.push(idx);
                    }
                    Err(Error::RejectionExhausted { attempts, .. }) => {
                        // Skip this particle rather than loop forever
                        warn!(
                            "emission of '{}' gave up after {attempts} attempts; skipping",
                            species.name
                        );
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        run_cascade(
            &mut self.scratch,
            &mut self.pool,
            &self.db,
            &self.decay_cfg,
            &mut self.rng,
        );

        // Pool indices are private to this generator; the snapshot rewrites
        // parent back-references to positions in the particle list, dropping
        // those whose parent was removed from the event
        let mut position_of = vec![usize::MAX; self.pool.len()];
        for (pos, &idx) in self.scratch.iter().enumerate() {
            position_of[idx] = pos;
        }
        let particles = self
            .scratch
            .iter()
            .map(|&idx| {
                let mut p = self.pool.get(idx).clone();
                p.parent = p.parent.and_then(|parent_idx| {
                    let pos = position_of[parent_idx];
                    (pos != usize::MAX).then_some(pos)
                });
                p
            })
            .collect();
        let event = Event {
            event_id: self.next_event_id,
            particles,
        };
        self.next_event_id += 1;
        debug!("event {} finished with {} particles", event.event_id, event.len());
        Ok(event)
    }

    /// Restart the generation stream from a fresh seed. The multiplicity
    /// table is untouched; only subsequent draws change.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
