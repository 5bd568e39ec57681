//! Monte Carlo generator for thermal heavy-ion freeze-out events.
//!
//! The crate samples particle four-momenta and positions from a Cooper-Frye
//! freeze-out distribution (several interchangeable hypersurface/flow
//! variants), draws per-event multiplicities from calibrated mean yields,
//! and cascades unstable particles through relativistic 2- and 3-body
//! decays. One [`EventGenerator`] per worker owns its RNG stream, particle
//! pool, and event scratch space; only the species database is shared.

pub mod decay;
pub mod emission;
pub mod error;
pub mod event;
pub mod fourvec;
pub mod models;
pub mod multiplicity;
pub mod particle;
pub mod pool;
pub mod settings;
pub mod species;
pub mod thermo;
pub mod utilities;

pub use error::{Error, Result};
pub use event::{Event, EventGenerator};
pub use fourvec::FourVector;
pub use models::{build_model, FreezeoutModel, IntegrandSample};
pub use multiplicity::{sample_multiplicity, FluctuationMode, MultiplicityTable};
pub use particle::{Particle, ParticleStatus};
pub use pool::{ParticleIdx, ParticlePool};
pub use settings::{FireballGeometry, ModelType, Settings};
pub use species::{builtin_species, ParticleSpecies, SpeciesDatabase, SpeciesId};
pub use thermo::Thermodynamics;
