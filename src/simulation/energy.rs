//! Total-energy diagnostic.
//!
//! E = sum_i 1/2 m_i |v_i|^2  -  sum_{i<j} m_i m_j / |x_i - x_j|
//!
//! Pairs are visited once each, `i` ascending outer and `j = i+1..` inner, with
//! the kinetic term of body `i` added just before its pair terms. Every layout
//! in `variants` follows the same order so results agree bit-for-bit.

use crate::simulation::states::{System, N_BODIES};

/// Kinetic plus potential energy of `sys`. Read-only.
pub fn energy(sys: &System) -> f64 {
    let b = &sys.bodies;
    let mut e = 0.0;

    for i in 0..N_BODIES {
        let bi = &b[i];
        e += 0.5 * bi.m * bi.v.norm_squared();
        for bj in &b[i + 1..] {
            let d = bi.x - bj.x;
            e -= bi.m * bj.m / d.norm();
        }
    }
    e
}

/// Kinetic part only.
pub fn kinetic_energy(sys: &System) -> f64 {
    sys.bodies
        .iter()
        .fold(0.0, |ke, b| ke + 0.5 * b.m * b.v.norm_squared())
}

/// Potential part only (negative).
pub fn potential_energy(sys: &System) -> f64 {
    let b = &sys.bodies;
    let mut pe = 0.0;
    for i in 0..N_BODIES {
        for j in (i + 1)..N_BODIES {
            pe -= b[i].m * b[j].m / (b[i].x - b[j].x).norm();
        }
    }
    pe
}
