// Relativistic 2-/3-body decay cascade.
//
// Each live unstable particle rolls its decay table once; selected channels
// produce daughters with exact relativistic kinematics in the parent rest
// frame, boosted to the lab, at a vertex advanced along the parent
// trajectory by an exponentially sampled proper time.

use crate::fourvec::FourVector;
use crate::models::TWO_PI;
use crate::particle::{Particle, ParticleStatus};
use crate::pool::{ParticleIdx, ParticlePool};
use crate::settings::Settings;
use crate::species::{DecayChannel, ParticleSpecies, SpeciesDatabase};
use log::warn;
use nalgebra::{Rotation3, Vector3};
use rand::Rng;

/// A parent whose sampled invariant mass falls below the daughter mass sum
/// is clamped to this multiple of the sum before phase space is computed.
/// Numerical stabilization for far-off-shell resonances, not an error.
const DEGENERATE_MASS_FACTOR: f64 = 1.02;

/// Decay-related switches extracted from [`Settings`].
#[derive(Debug, Clone, Copy)]
pub struct DecayConfig {
    pub disable_2_prong: bool,
    pub disable_3_prong: bool,
    pub no_weak: bool,
    pub store_decayed: bool,
    pub max_attempts: usize,
}

impl DecayConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            disable_2_prong: settings.decay_disable_2_prong,
            disable_3_prong: settings.decay_disable_3_prong,
            no_weak: settings.decay_no_weak,
            store_decayed: settings.decay_store_decayed,
            max_attempts: settings.max_rejection_attempts,
        }
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            disable_2_prong: false,
            disable_3_prong: false,
            no_weak: false,
            store_decayed: true,
            max_attempts: 100_000,
        }
    }
}

/// Cascade every unstable particle in `event` until only stable (or
/// undecayable) particles remain live. Children are appended to the event in
/// decay order and processed themselves, so the walk is a worklist over a
/// growing list; decayed parents are flagged and never revisited.
///
/// With `store_decayed` unset, decayed parents are dropped from the event
/// after the cascade (their pool slots stay valid until the next reset).
pub fn run_cascade<R: Rng + ?Sized>(
    event: &mut Vec<ParticleIdx>,
    pool: &mut ParticlePool,
    db: &SpeciesDatabase,
    cfg: &DecayConfig,
    rng: &mut R,
) {
    let mut i = 0;
    while i < event.len() {
        let idx = event[i];
        i += 1;
        let parent = pool.get(idx).clone();
        if !parent.is_live() {
            continue;
        }
        let species = db.get(parent.species);
        if species.is_stable() {
            continue;
        }
        if cfg.no_weak && species.decays_weakly() {
            continue;
        }
        let Some(channel) = select_channel(species, cfg, rng) else {
            continue;
        };
        // Daughter lists were validated at startup to hold 2 or 3 entries
        let momenta: Vec<FourVector> = match channel.daughters.len() {
            2 => {
                let m1 = db.get(channel.daughters[0]).mass;
                let m2 = db.get(channel.daughters[1]).mass;
                let (p1, p2) = decay_two_body(&parent.momentum, m1, m2, rng);
                vec![p1, p2]
            }
            _ => {
                let m1 = db.get(channel.daughters[0]).mass;
                let m2 = db.get(channel.daughters[1]).mass;
                let m3 = db.get(channel.daughters[2]).mass;
                match decay_three_body(&parent.momentum, m1, m2, m3, cfg.max_attempts, rng) {
                    Some(p) => p.to_vec(),
                    None => {
                        warn!(
                            "3-body phase space exhausted after {} attempts for '{}'; \
                             leaving parent undecayed",
                            cfg.max_attempts, species.name
                        );
                        continue;
                    }
                }
            }
        };
        let vertex = decay_vertex(&parent, species.lifetime, rng);
        pool.get_mut(idx).status = ParticleStatus::Decayed;
        for (momentum, &daughter) in momenta.into_iter().zip(&channel.daughters) {
            let child = Particle {
                species: daughter,
                momentum,
                position: vertex,
                status: ParticleStatus::Live,
                parent: Some(idx),
            };
            event.push(pool.acquire(child));
        }
    }
    if !cfg.store_decayed {
        event.retain(|&idx| pool.get(idx).is_live());
    }
}

/// Roulette selection over the decay table. Ratios summing to less than one
/// leave a "no decay" residual; sums beyond one are treated as weights and
/// normalized. A drawn channel whose prong count is disabled also counts as
/// no decay.
fn select_channel<'a, R: Rng + ?Sized>(
    species: &'a ParticleSpecies,
    cfg: &DecayConfig,
    rng: &mut R,
) -> Option<&'a DecayChannel> {
    let total: f64 = species
        .decay_table
        .iter()
        .map(|c| c.branching_ratio)
        .sum();
    if total <= 0.0 {
        return None;
    }
    let mut u = rng.gen::<f64>() * total.max(1.0);
    for channel in &species.decay_table {
        if u < channel.branching_ratio {
            let prongs = channel.daughters.len();
            if (prongs == 2 && cfg.disable_2_prong) || (prongs == 3 && cfg.disable_3_prong) {
                return None;
            }
            return Some(channel);
        }
        u -= channel.branching_ratio;
    }
    None
}

/// Two-body decay: isotropic in the parent rest frame with the momentum
/// magnitude fixed by the masses, then boosted by the parent velocity.
pub fn decay_two_body<R: Rng + ?Sized>(
    parent: &FourVector,
    m1: f64,
    m2: f64,
    rng: &mut R,
) -> (FourVector, FourVector) {
    let mut m = parent.mass();
    let msum = m1 + m2;
    if m < msum {
        m = DEGENERATE_MASS_FACTOR * msum;
    }
    let mdiff = m1 - m2;
    let p_star = ((m * m - msum * msum) * (m * m - mdiff * mdiff)).sqrt() / (2.0 * m);

    let cos_theta = 2.0 * rng.gen::<f64>() - 1.0;
    let phi = TWO_PI * rng.gen::<f64>();
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
    let axis = Vector3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);

    let e1 = (m1 * m1 + p_star * p_star).sqrt();
    let e2 = (m2 * m2 + p_star * p_star).sqrt();
    let beta = parent.velocity();
    (
        FourVector::from_parts(e1, axis * p_star).boosted(beta),
        FourVector::from_parts(e2, -axis * p_star).boosted(beta),
    )
}

/// Three-body decay: daughter energies rejection-sampled uniformly over
/// their kinematic ranges until the implied opening angle closes the
/// momentum triangle, then the decay plane is given a random orientation.
/// Returns None when the attempt cap is exhausted.
pub fn decay_three_body<R: Rng + ?Sized>(
    parent: &FourVector,
    m1: f64,
    m2: f64,
    m3: f64,
    max_attempts: usize,
    rng: &mut R,
) -> Option<[FourVector; 3]> {
    let mut m = parent.mass();
    let msum = m1 + m2 + m3;
    if m < msum {
        m = DEGENERATE_MASS_FACTOR * msum;
    }
    let e1_max = (m * m + m1 * m1 - (m2 + m3) * (m2 + m3)) / (2.0 * m);
    let e2_max = (m * m + m2 * m2 - (m1 + m3) * (m1 + m3)) / (2.0 * m);

    for _ in 0..max_attempts {
        let e1 = m1 + rng.gen::<f64>() * (e1_max - m1);
        let e2 = m2 + rng.gen::<f64>() * (e2_max - m2);
        let e3 = m - e1 - e2;
        if e3 <= m3 {
            continue;
        }
        let p1 = (e1 * e1 - m1 * m1).sqrt();
        let p2 = (e2 * e2 - m2 * m2).sqrt();
        if p1 <= 0.0 || p2 <= 0.0 {
            continue;
        }
        let p3_sq = e3 * e3 - m3 * m3;
        // Momentum balance: p3 = -(p1 + p2) fixes the opening angle
        let cos12 = (p3_sq - p1 * p1 - p2 * p2) / (2.0 * p1 * p2);
        if !(-1.0..=1.0).contains(&cos12) {
            continue;
        }
        let sin12 = (1.0 - cos12 * cos12).sqrt();

        let v1 = Vector3::new(0.0, 0.0, p1);
        let v2 = Vector3::new(p2 * sin12, 0.0, p2 * cos12);
        let v3 = -(v1 + v2);

        // Random Euler orientation of the decay plane
        let phi = TWO_PI * rng.gen::<f64>();
        let xi = TWO_PI * rng.gen::<f64>();
        let theta = (2.0 * rng.gen::<f64>() - 1.0).acos();
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), phi)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), theta)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), xi);

        let beta = parent.velocity();
        return Some([
            FourVector::from_parts(e1, rot * v1).boosted(beta),
            FourVector::from_parts(e2, rot * v2).boosted(beta),
            FourVector::from_parts(e3, rot * v3).boosted(beta),
        ]);
    }
    None
}

/// Advance the parent trajectory by a lab-frame decay time `t = -tau gamma
/// ln U` (inverse-CDF sampling of the exponential decay law, time-dilated).
fn decay_vertex<R: Rng + ?Sized>(parent: &Particle, lifetime: f64, rng: &mut R) -> FourVector {
    if !lifetime.is_finite() || lifetime <= 0.0 {
        return parent.position;
    }
    // 1 - U(0,1) lies in (0, 1], keeping the logarithm finite
    let u = 1.0 - rng.gen::<f64>();
    let dt = -lifetime * parent.momentum.gamma() * u.ln();
    let beta = parent.momentum.velocity();
    FourVector::from_parts(parent.position.t + dt, parent.position.xyz + beta * dt)
}
