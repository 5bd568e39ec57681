// Particle species reference data: masses, quantum numbers, decay tables.
//
// Loaded once at startup (from JSON or the built-in table) and never mutated
// during generation; the generator shares it by immutable reference.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Index of a species in the database, stable for the lifetime of the run.
pub type SpeciesId = usize;

/// Lifetime (fm/c) above which a decay is classified as weak and skipped
/// when weak decays are disabled. Strong resonance lifetimes are O(1-100)
/// fm/c; anything beyond this is electromagnetic or weak.
pub const WEAK_LIFETIME_THRESHOLD: f64 = 250.0;

fn infinite_lifetime() -> f64 {
    f64::INFINITY
}

// serde calls the skip predicate with a reference
fn is_infinite(v: &f64) -> bool {
    v.is_infinite()
}

/// One decay mode: branching ratio plus the ids of 2 or 3 daughters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayChannel {
    pub branching_ratio: f64,
    pub daughters: Vec<SpeciesId>,
}

/// Immutable per-species reference data.
///
/// Masses in GeV, lifetimes in fm/c. `statistics` is +1 for Fermi-Dirac and
/// -1 for Bose-Einstein occupation numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSpecies {
    pub name: String,
    pub mass: f64,
    /// Spin degeneracy g = 2J + 1.
    pub degeneracy: f64,
    /// +1.0 Fermi-Dirac, -1.0 Bose-Einstein.
    pub statistics: f64,
    pub baryon: f64,
    pub isospin3: f64,
    pub strangeness: f64,
    pub charm: f64,
    /// Mean proper lifetime in fm/c; infinite for stable species.
    #[serde(default = "infinite_lifetime", skip_serializing_if = "is_infinite")]
    pub lifetime: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decay_table: Vec<DecayChannel>,
}

impl ParticleSpecies {
    pub fn is_stable(&self) -> bool {
        self.decay_table.is_empty()
    }

    pub fn is_photon(&self) -> bool {
        self.mass == 0.0 && self.name == "gam"
    }

    /// Weak (or electromagnetic) decays live long enough that detectors see
    /// the parent; they can be switched off wholesale.
    pub fn decays_weakly(&self) -> bool {
        !self.is_stable() && self.lifetime > WEAK_LIFETIME_THRESHOLD
    }
}

/// Ordered species list with name lookup. The ordering defines the id space
/// used by decay tables and the multiplicity table.
#[derive(Debug, Clone)]
pub struct SpeciesDatabase {
    species: Vec<ParticleSpecies>,
    index: HashMap<String, SpeciesId>,
}

impl SpeciesDatabase {
    /// Build a database from a species list, validating every decay table.
    ///
    /// Malformed decay tables (wrong daughter count, unknown daughter id,
    /// negative or non-finite branching ratio, duplicate names) are fatal
    /// startup errors, never per-decay runtime faults.
    pub fn new(species: Vec<ParticleSpecies>) -> Result<Self> {
        let mut index = HashMap::with_capacity(species.len());
        for (id, s) in species.iter().enumerate() {
            if index.insert(s.name.clone(), id).is_some() {
                return Err(Error::Config(format!(
                    "duplicate species name '{}'",
                    s.name
                )));
            }
            if !(s.mass.is_finite() && s.mass >= 0.0) {
                return Err(Error::Config(format!(
                    "species '{}' has invalid mass {}",
                    s.name, s.mass
                )));
            }
        }
        for s in &species {
            for channel in &s.decay_table {
                if channel.daughters.len() < 2 || channel.daughters.len() > 3 {
                    return Err(Error::MalformedDecay {
                        species: s.name.clone(),
                        detail: format!(
                            "channel has {} daughters, expected 2 or 3",
                            channel.daughters.len()
                        ),
                    });
                }
                if !channel.branching_ratio.is_finite() || channel.branching_ratio < 0.0 {
                    return Err(Error::MalformedDecay {
                        species: s.name.clone(),
                        detail: format!("invalid branching ratio {}", channel.branching_ratio),
                    });
                }
                for &d in &channel.daughters {
                    if d >= species.len() {
                        return Err(Error::MalformedDecay {
                            species: s.name.clone(),
                            detail: format!("unknown daughter species id {d}"),
                        });
                    }
                }
            }
        }
        Ok(Self { species, index })
    }

    /// Load a species list from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let species: Vec<ParticleSpecies> = serde_json::from_str(&text)?;
        Self::new(species)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, id: SpeciesId) -> &ParticleSpecies {
        &self.species[id]
    }

    pub fn id_of(&self, name: &str) -> Option<SpeciesId> {
        self.index.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &ParticleSpecies)> {
        self.species.iter().enumerate()
    }
}

/// Small built-in hadron table covering the common final-state species plus
/// a few strongly decaying resonances. Enough to exercise emission, 2-body
/// and 3-body cascades without an external database file.
pub fn builtin_species() -> &'static SpeciesDatabase {
    static BUILTIN: Lazy<SpeciesDatabase> = Lazy::new(|| {
        build_builtin().unwrap_or_else(|e| panic!("built-in species table is invalid: {e}"))
    });
    &BUILTIN
}

fn build_builtin() -> Result<SpeciesDatabase> {
    // (name, mass GeV, g, statistics, B, I3, S, C, lifetime fm/c)
    let base: &[(&str, f64, f64, f64, f64, f64, f64, f64, f64)] = &[
        ("gam", 0.0, 2.0, -1.0, 0.0, 0.0, 0.0, 0.0, f64::INFINITY),
        ("pi0", 0.13498, 1.0, -1.0, 0.0, 0.0, 0.0, 0.0, 2.51e7),
        ("pip", 0.13957, 1.0, -1.0, 0.0, 1.0, 0.0, 0.0, f64::INFINITY),
        ("pim", 0.13957, 1.0, -1.0, 0.0, -1.0, 0.0, 0.0, f64::INFINITY),
        ("Kap", 0.49368, 1.0, -1.0, 0.0, 0.5, 1.0, 0.0, f64::INFINITY),
        ("Kam", 0.49368, 1.0, -1.0, 0.0, -0.5, -1.0, 0.0, f64::INFINITY),
        ("pro", 0.93827, 2.0, 1.0, 1.0, 0.5, 0.0, 0.0, f64::INFINITY),
        ("neu", 0.93957, 2.0, 1.0, 1.0, -0.5, 0.0, 0.0, f64::INFINITY),
        ("rho0", 0.77549, 3.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.33),
        ("rhop", 0.77511, 3.0, -1.0, 0.0, 1.0, 0.0, 0.0, 1.33),
        ("rhom", 0.77511, 3.0, -1.0, 0.0, -1.0, 0.0, 0.0, 1.33),
        ("omega", 0.78265, 3.0, -1.0, 0.0, 0.0, 0.0, 0.0, 23.2),
        ("Dlpp", 1.232, 4.0, 1.0, 1.0, 1.5, 0.0, 0.0, 1.69),
    ];

    let mut species: Vec<ParticleSpecies> = base
        .iter()
        .map(|&(name, mass, g, stat, b, i3, s, c, tau)| ParticleSpecies {
            name: name.to_string(),
            mass,
            degeneracy: g,
            statistics: stat,
            baryon: b,
            isospin3: i3,
            strangeness: s,
            charm: c,
            lifetime: tau,
            decay_table: Vec::new(),
        })
        .collect();

    let id = |name: &str| -> SpeciesId {
        base.iter()
            .position(|&(n, ..)| n == name)
            .unwrap_or_else(|| panic!("unknown built-in species '{name}'"))
    };

    let channels: &[(&str, f64, &[&str])] = &[
        ("pi0", 0.988, &["gam", "gam"]),
        ("rho0", 1.0, &["pip", "pim"]),
        ("rhop", 1.0, &["pip", "pi0"]),
        ("rhom", 1.0, &["pim", "pi0"]),
        ("omega", 0.892, &["pip", "pim", "pi0"]),
        ("omega", 0.084, &["pi0", "gam"]),
        ("Dlpp", 1.0, &["pro", "pip"]),
    ];
    for &(parent, ratio, daughters) in channels {
        let daughters = daughters.iter().map(|d| id(d)).collect();
        species[id(parent)].decay_table.push(DecayChannel {
            branching_ratio: ratio,
            daughters,
        });
    }

    SpeciesDatabase::new(species)
}
