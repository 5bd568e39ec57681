// Minkowski four-vectors with the (+,-,-,-) metric.
//
// Used both for four-momenta (t = energy) and four-positions (t = lab time).
// Units follow the natural-unit convention of the generator: energies and
// masses in GeV, lengths and times in fm.

use nalgebra::Vector3;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourVector {
    /// Time-like component (energy for momenta, lab time for positions).
    pub t: f64,
    /// Space-like components.
    pub xyz: Vector3<f64>,
}

impl FourVector {
    pub fn new(t: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            t,
            xyz: Vector3::new(x, y, z),
        }
    }

    pub fn from_parts(t: f64, xyz: Vector3<f64>) -> Self {
        Self { t, xyz }
    }

    pub fn zero() -> Self {
        Self {
            t: 0.0,
            xyz: Vector3::zeros(),
        }
    }

    /// Four-momentum of a particle of mass `m` at rest.
    pub fn at_rest(m: f64) -> Self {
        Self {
            t: m,
            xyz: Vector3::zeros(),
        }
    }

    /// Minkowski inner product p·q = p0 q0 - p·q.
    pub fn dot(&self, other: &FourVector) -> f64 {
        self.t * other.t - self.xyz.dot(&other.xyz)
    }

    /// Invariant mass sqrt(p·p), clamped to zero for slightly space-like
    /// arguments produced by rounding.
    pub fn mass(&self) -> f64 {
        self.dot(self).max(0.0).sqrt()
    }

    /// Three-velocity beta = p/E. Zero for a vanishing time component.
    pub fn velocity(&self) -> Vector3<f64> {
        if self.t.abs() < f64::EPSILON {
            Vector3::zeros()
        } else {
            self.xyz / self.t
        }
    }

    /// Lorentz factor E/m. Falls back to 1 for a degenerate (massless or
    /// space-like) argument, which the decay code treats as "no time dilation".
    pub fn gamma(&self) -> f64 {
        let m = self.mass();
        if m > 0.0 {
            self.t / m
        } else {
            1.0
        }
    }

    /// Active Lorentz boost with velocity `beta`: takes a vector expressed in
    /// a frame moving with -beta into the observer frame. Boosting a rest-frame
    /// decay product with the parent's velocity yields its lab-frame momentum.
    pub fn boosted(&self, beta: Vector3<f64>) -> Self {
        let b2 = beta.norm_squared();
        if b2 < 1e-30 {
            return *self;
        }
        let gamma = 1.0 / (1.0 - b2).sqrt();
        let bp = beta.dot(&self.xyz);
        // (gamma - 1) / b2 written as gamma^2 / (gamma + 1) to stay finite
        // for small velocities.
        let coef = gamma * gamma / (gamma + 1.0) * bp + gamma * self.t;
        Self {
            t: gamma * (self.t + bp),
            xyz: self.xyz + beta * coef,
        }
    }

    /// Transverse momentum sqrt(px^2 + py^2).
    pub fn perp(&self) -> f64 {
        self.xyz.xy().norm()
    }

    /// Longitudinal rapidity 0.5 ln((E + pz)/(E - pz)).
    pub fn rapidity(&self) -> f64 {
        0.5 * ((self.t + self.xyz.z) / (self.t - self.xyz.z)).ln()
    }
}

impl Add for FourVector {
    type Output = FourVector;

    fn add(self, rhs: FourVector) -> FourVector {
        FourVector {
            t: self.t + rhs.t,
            xyz: self.xyz + rhs.xyz,
        }
    }
}

impl Sub for FourVector {
    type Output = FourVector;

    fn sub(self, rhs: FourVector) -> FourVector {
        FourVector {
            t: self.t - rhs.t,
            xyz: self.xyz - rhs.xyz,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_signature() {
        let p = FourVector::new(2.0, 1.0, 0.0, 0.0);
        assert_eq!(p.dot(&p), 3.0);
        let q = FourVector::new(1.0, 0.0, 1.0, 0.0);
        assert_eq!(p.dot(&q), 2.0);
    }

    #[test]
    fn test_invariant_mass_at_rest() {
        let p = FourVector::at_rest(0.938);
        assert!((p.mass() - 0.938).abs() < 1e-15);
    }

    #[test]
    fn test_boost_preserves_mass() {
        let p = FourVector::at_rest(0.775);
        let beta = Vector3::new(0.3, -0.2, 0.5);
        let boosted = p.boosted(beta);
        assert!((boosted.mass() - 0.775).abs() < 1e-12, "m = {}", boosted.mass());
        assert!(boosted.t > p.t);
    }

    #[test]
    fn test_boost_round_trip() {
        let p = FourVector::new(1.5, 0.1, 0.2, 0.3);
        let beta = Vector3::new(0.0, 0.4, -0.1);
        let back = p.boosted(beta).boosted(-beta);
        assert!((back.t - p.t).abs() < 1e-12);
        assert!((back.xyz - p.xyz).norm() < 1e-12);
    }

    #[test]
    fn test_boost_of_rest_frame_gives_velocity() {
        let m = 1.2;
        let beta = Vector3::new(0.6, 0.0, 0.0);
        let p = FourVector::at_rest(m).boosted(beta);
        assert!((p.velocity() - beta).norm() < 1e-12);
        let gamma = 1.0 / (1.0 - beta.norm_squared()).sqrt();
        assert!((p.gamma() - gamma).abs() < 1e-12);
    }

    #[test]
    fn test_rapidity_and_perp() {
        let p = FourVector::new(2.0, 0.3, 0.4, 1.0);
        assert!((p.perp() - 0.5).abs() < 1e-15);
        let y = p.rapidity();
        assert!((y - 0.5 * (3.0f64 / 1.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_add_sub() {
        let a = FourVector::new(1.0, 2.0, 3.0, 4.0);
        let b = FourVector::new(0.5, 0.5, 0.5, 0.5);
        let s = a + b;
        assert_eq!(s.t, 1.5);
        assert_eq!((s - b).xyz, a.xyz);
    }
}
