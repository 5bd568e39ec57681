// Reusable per-run particle storage.
//
// Events acquire slots during emission and decay and release them all at
// once via reset(), so backing storage is allocated once and reused across
// many events. Slots are addressed by index: growth never invalidates an
// index handed out earlier in the same event.

use crate::particle::Particle;

/// Index of a slot in the pool, valid until the next `reset()`.
pub type ParticleIdx = usize;

#[derive(Debug, Default)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    cursor: usize,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Store a particle in the next free slot and return its index.
    pub fn acquire(&mut self, particle: Particle) -> ParticleIdx {
        let idx = self.cursor;
        if idx < self.slots.len() {
            self.slots[idx] = particle;
        } else {
            self.slots.push(particle);
        }
        self.cursor += 1;
        idx
    }

    pub fn get(&self, idx: ParticleIdx) -> &Particle {
        debug_assert!(idx < self.cursor, "stale particle index {idx}");
        &self.slots[idx]
    }

    pub fn get_mut(&mut self, idx: ParticleIdx) -> &mut Particle {
        debug_assert!(idx < self.cursor, "stale particle index {idx}");
        &mut self.slots[idx]
    }

    /// Number of live slots acquired since the last reset.
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Logically empty the pool without freeing backing storage. Indices
    /// acquired before the reset must not be used afterwards.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
