//! Flat packed layout: all 35 scalars in one `[f64; 35]`, body `k` at offset
//! `7 * k` with fields in the order x, y, z, vx, vy, vz, mass.
//!
//! The hot loop reads and writes through `get`/`set`, which skip bounds
//! checks. Every index is `body * STRIDE + field` with `body < N_BODIES` and
//! `field < STRIDE`, so it is always below `LEN`.

use crate::simulation::integrator::{magnitude, Integrator};
use crate::simulation::states::{Body, System, N_BODIES};

const STRIDE: usize = 7;
const LEN: usize = N_BODIES * STRIDE;

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;
const VX: usize = 3;
const VY: usize = 4;
const VZ: usize = 5;
const MASS: usize = 6;

#[derive(Debug, Clone)]
pub struct FlatKernel {
    buf: [f64; LEN],
}

#[inline(always)]
fn get(buf: &[f64; LEN], body: usize, field: usize) -> f64 {
    let k = body * STRIDE + field;
    debug_assert!(k < LEN);
    // SAFETY: callers pass body < N_BODIES and one of the field offsets above.
    unsafe { *buf.get_unchecked(k) }
}

#[inline(always)]
fn set(buf: &mut [f64; LEN], body: usize, field: usize, val: f64) {
    let k = body * STRIDE + field;
    debug_assert!(k < LEN);
    // SAFETY: see `get`.
    unsafe { *buf.get_unchecked_mut(k) = val }
}

impl FlatKernel {
    pub fn from_system(sys: &System) -> Self {
        let mut buf = [0.0; LEN];
        for (k, b) in sys.bodies.iter().enumerate() {
            let o = k * STRIDE;
            buf[o + X] = b.x.x;
            buf[o + Y] = b.x.y;
            buf[o + Z] = b.x.z;
            buf[o + VX] = b.v.x;
            buf[o + VY] = b.v.y;
            buf[o + VZ] = b.v.z;
            buf[o + MASS] = b.m;
        }
        Self { buf }
    }
}

impl Integrator for FlatKernel {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn advance(&mut self, dt: f64) {
        let b = &mut self.buf;

        for i in 0..N_BODIES {
            let (ix, iy, iz, imass) = (get(b, i, X), get(b, i, Y), get(b, i, Z), get(b, i, MASS));
            let (mut ivx, mut ivy, mut ivz) = (get(b, i, VX), get(b, i, VY), get(b, i, VZ));

            for j in (i + 1)..N_BODIES {
                let dx = ix - get(b, j, X);
                let dy = iy - get(b, j, Y);
                let dz = iz - get(b, j, Z);
                let mag = magnitude(dx * dx + dy * dy + dz * dz, dt);

                let jm = get(b, j, MASS) * mag;
                ivx -= dx * jm;
                ivy -= dy * jm;
                ivz -= dz * jm;

                let im = imass * mag;
                let (jvx, jvy, jvz) = (get(b, j, VX), get(b, j, VY), get(b, j, VZ));
                set(b, j, VX, jvx + dx * im);
                set(b, j, VY, jvy + dy * im);
                set(b, j, VZ, jvz + dz * im);
            }

            set(b, i, VX, ivx);
            set(b, i, VY, ivy);
            set(b, i, VZ, ivz);
            set(b, i, X, ix + ivx * dt);
            set(b, i, Y, iy + ivy * dt);
            set(b, i, Z, iz + ivz * dt);
        }
    }

    fn energy(&self) -> f64 {
        let b = &self.buf;
        let mut e = 0.0;

        for i in 0..N_BODIES {
            let (vx, vy, vz) = (get(b, i, VX), get(b, i, VY), get(b, i, VZ));
            let imass = get(b, i, MASS);
            e += 0.5 * imass * (vx * vx + vy * vy + vz * vz);

            for j in (i + 1)..N_BODIES {
                let dx = get(b, i, X) - get(b, j, X);
                let dy = get(b, i, Y) - get(b, j, Y);
                let dz = get(b, i, Z) - get(b, j, Z);
                e -= imass * get(b, j, MASS) / (dx * dx + dy * dy + dz * dz).sqrt();
            }
        }
        e
    }

    fn snapshot(&self) -> System {
        let b = &self.buf;
        let mut bodies = [Body::new([0.0; 3], [0.0; 3], 0.0); N_BODIES];
        for (k, body) in bodies.iter_mut().enumerate() {
            *body = Body::new(
                [get(b, k, X), get(b, k, Y), get(b, k, Z)],
                [get(b, k, VX), get(b, k, VY), get(b, k, VZ)],
                get(b, k, MASS),
            );
        }
        System { bodies }
    }
}
