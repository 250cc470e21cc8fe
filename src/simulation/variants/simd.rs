//! Two-lane vectorized kernel.
//!
//! A step runs in three passes over the `PAIRS` unordered pairs (numbered
//! `k` in `(i, j)` lexicographic order):
//! 1. store every positional delta `d_k = x_i - x_j`,
//! 2. evaluate `mag_k = dt / |d_k|^3` two pairs at a time in `F64x2` lanes,
//!    using `rsqrt` with `refinements` Newton steps instead of `sqrt` and a
//!    division,
//! 3. kick both bodies of each pair in `k` order, then drift every body.
//!
//! Drifting after all kicks matches the reference order because a body is
//! never read again once all its pairs have been kicked.

use crate::simulation::integrator::Integrator;
use crate::simulation::lanes::F64x2;
use crate::simulation::params::DEFAULT_REFINEMENTS;
use crate::simulation::states::{Body, System, N_BODIES, PAIRS};

const _: () = assert!(PAIRS % 2 == 0, "pairs are evaluated two per vector");

#[derive(Debug, Clone)]
pub struct SimdKernel {
    x: [[f64; 3]; N_BODIES],
    v: [[f64; 3]; N_BODIES],
    mass: [f64; N_BODIES],
    refinements: u32,
}

impl SimdKernel {
    pub fn from_system(sys: &System) -> Self {
        Self::with_refinements(sys, DEFAULT_REFINEMENTS)
    }

    pub fn with_refinements(sys: &System, refinements: u32) -> Self {
        Self {
            x: sys.bodies.map(|b| [b.x.x, b.x.y, b.x.z]),
            v: sys.bodies.map(|b| [b.v.x, b.v.y, b.v.z]),
            mass: sys.bodies.map(|b| b.m),
            refinements,
        }
    }

    pub fn refinements(&self) -> u32 {
        self.refinements
    }
}

impl Integrator for SimdKernel {
    fn name(&self) -> &'static str {
        "simd"
    }

    fn advance(&mut self, dt: f64) {
        let mut dx = [0.0; PAIRS];
        let mut dy = [0.0; PAIRS];
        let mut dz = [0.0; PAIRS];
        let mut mag = [0.0; PAIRS];

        let mut k = 0;
        for i in 0..N_BODIES {
            for j in (i + 1)..N_BODIES {
                dx[k] = self.x[i][0] - self.x[j][0];
                dy[k] = self.x[i][1] - self.x[j][1];
                dz[k] = self.x[i][2] - self.x[j][2];
                k += 1;
            }
        }

        let vdt = F64x2::splat(dt);
        for k in (0..PAIRS).step_by(2) {
            let x = F64x2::new(dx[k], dx[k + 1]);
            let y = F64x2::new(dy[k], dy[k + 1]);
            let z = F64x2::new(dz[k], dz[k + 1]);

            let d2 = x * x + y * y + z * z;
            let inv_d = d2.rsqrt(self.refinements);
            (vdt / d2 * inv_d).write_to_slice(&mut mag[k..]);
        }

        let mut k = 0;
        for i in 0..N_BODIES {
            for j in (i + 1)..N_BODIES {
                let jm = self.mass[j] * mag[k];
                self.v[i][0] -= dx[k] * jm;
                self.v[i][1] -= dy[k] * jm;
                self.v[i][2] -= dz[k] * jm;

                let im = self.mass[i] * mag[k];
                self.v[j][0] += dx[k] * im;
                self.v[j][1] += dy[k] * im;
                self.v[j][2] += dz[k] * im;
                k += 1;
            }
        }

        for (x, v) in self.x.iter_mut().zip(self.v.iter()) {
            x[0] += v[0] * dt;
            x[1] += v[1] * dt;
            x[2] += v[2] * dt;
        }
    }

    fn energy(&self) -> f64 {
        let mut e = 0.0;
        for i in 0..N_BODIES {
            let v = &self.v[i];
            e += 0.5 * self.mass[i] * (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]);
            for j in (i + 1)..N_BODIES {
                let dx = self.x[i][0] - self.x[j][0];
                let dy = self.x[i][1] - self.x[j][1];
                let dz = self.x[i][2] - self.x[j][2];
                e -= self.mass[i] * self.mass[j] / (dx * dx + dy * dy + dz * dz).sqrt();
            }
        }
        e
    }

    fn snapshot(&self) -> System {
        let bodies: [Body; N_BODIES] =
            std::array::from_fn(|i| Body::new(self.x[i], self.v[i], self.mass[i]));
        System { bodies }
    }
}
