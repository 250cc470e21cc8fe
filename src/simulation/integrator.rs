//! Fixed-step symplectic Euler integrator for the five-body system
//!
//! One step ("advance") is a kick phase followed by a drift phase per body:
//! for body `i`, every partner `j > i` is visited once, both velocities are
//! updated from the same pair term (equal and opposite, each scaled by the
//! partner's mass), then `x_i += v_i * dt` with the freshly kicked velocity.
//! Pairs are never evaluated twice, so a step costs N(N-1)/2 interactions.
//!
//! The `Integrator` trait is the contract every layout in `variants` satisfies.

use super::energy::energy;
use super::states::System;

/// A drop-in implementation of the kernel: its own storage layout plus
/// `advance` and `energy` over that layout.
pub trait Integrator {
    /// Short token used to select the variant.
    fn name(&self) -> &'static str;

    /// Advance the state by one step of size `dt`.
    fn advance(&mut self, dt: f64);

    /// Advance `steps` times.
    fn advance_n(&mut self, steps: u64, dt: f64) {
        for _ in 0..steps {
            self.advance(dt);
        }
    }

    /// Total energy of the current state.
    fn energy(&self) -> f64;

    /// Copy the current state back into the canonical layout.
    fn snapshot(&self) -> System;
}

/// Advance `sys` by one step of size `dt` in place.
///
/// Sign convention: `d = x_i - x_j`, `v_i -= d m_j mag`, `v_j += d m_i mag`,
/// with `mag = dt / |d|^3`.
pub fn advance(sys: &mut System, dt: f64) {
    let n = sys.bodies.len();

    for i in 0..n {
        // bi: left side of every pair, tail: its partners j > i
        let (head, tail) = sys.bodies.split_at_mut(i + 1);
        let bi = &mut head[i];

        // Kick
        for bj in tail.iter_mut() {
            let d = bi.x - bj.x;
            let mag = magnitude(d.norm_squared(), dt);

            bi.v -= d * (bj.m * mag);
            bj.v += d * (bi.m * mag);
        }

        // Drift
        bi.x += bi.v * dt;
    }
}

/// dt / |d|^3 from the squared distance.
#[inline(always)]
pub fn magnitude(d2: f64, dt: f64) -> f64 {
    dt / (d2 * d2.sqrt())
}

/// Array-of-structs kernel over the canonical `System`; the baseline every
/// other variant is measured against.
#[derive(Debug, Clone)]
pub struct ReferenceKernel {
    system: System,
}

impl ReferenceKernel {
    pub fn from_system(system: &System) -> Self {
        Self { system: *system }
    }
}

impl Integrator for ReferenceKernel {
    fn name(&self) -> &'static str {
        "reference"
    }

    #[inline]
    fn advance(&mut self, dt: f64) {
        advance(&mut self.system, dt);
    }

    fn energy(&self) -> f64 {
        energy(&self.system)
    }

    fn snapshot(&self) -> System {
        self.system
    }
}
