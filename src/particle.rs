use crate::fourvec::FourVector;
use crate::pool::ParticleIdx;
use crate::species::SpeciesId;

/// Live/decayed flag. Decayed particles stay in the event for bookkeeping
/// but are never revisited by the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleStatus {
    Live,
    Decayed,
}

/// One particle instance inside an event.
///
/// Holds an id into the species database rather than a reference, and an
/// index-based parent back-reference, so instances stay valid across pool
/// growth and carry no lifetimes.
#[derive(Debug, Clone)]
pub struct Particle {
    pub species: SpeciesId,
    pub momentum: FourVector,
    pub position: FourVector,
    pub status: ParticleStatus,
    /// Index of the parent in the particle pool; None for primary emissions.
    /// Finished events rewrite this to the parent's position in their own
    /// particle list (None if the parent was dropped).
    pub parent: Option<ParticleIdx>,
}

impl Particle {
    pub fn new(species: SpeciesId, momentum: FourVector, position: FourVector) -> Self {
        Self {
            species,
            momentum,
            position,
            status: ParticleStatus::Live,
            parent: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.status == ParticleStatus::Live
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_construction() {
        let p = Particle::new(
            3,
            FourVector::new(1.0, 0.1, 0.2, 0.3),
            FourVector::zero(),
        );
        assert_eq!(p.species, 3);
        assert!(p.is_live());
        assert!(p.parent.is_none());
    }

    #[test]
    fn test_status_flag() {
        let mut p = Particle::new(0, FourVector::at_rest(1.0), FourVector::zero());
        p.status = ParticleStatus::Decayed;
        assert!(!p.is_live());
    }
}
