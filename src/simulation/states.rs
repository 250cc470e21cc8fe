//! Core state types for the five-body simulation.
//!
//! - `Body`   one point mass (position, velocity, mass) using `NVec3`
//! - `System` the fixed array of `N_BODIES` bodies, index 0 is the sun
//!
//! Storage is inline (`[Body; N_BODIES]`), so a `System` never allocates.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

/// Number of bodies in the kernel (sun + four jovian planets).
pub const N_BODIES: usize = 5;

/// Number of unordered pairs `{i, j}`, `i < j`.
pub const PAIRS: usize = N_BODIES * (N_BODIES - 1) / 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64, // mass
}

impl Body {
    pub fn new(x: [f64; 3], v: [f64; 3], m: f64) -> Self {
        Self {
            x: NVec3::from(x),
            v: NVec3::from(v),
            m,
        }
    }

    /// Momentum m * v.
    #[inline]
    pub fn momentum(&self) -> NVec3 {
        self.v * self.m
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct System {
    pub bodies: [Body; N_BODIES], // index 0 is the central body
}

impl System {
    /// Total momentum `sum m_k * v_k` over every body, sun included.
    pub fn total_momentum(&self) -> NVec3 {
        self.bodies
            .iter()
            .fold(NVec3::zeros(), |p, b| p + b.momentum())
    }
}
