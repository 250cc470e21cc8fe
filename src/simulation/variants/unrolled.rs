//! Goto-style kernel: both pair loops fused into one `loop` with explicit
//! loop-carried indices `(i, j)`. Body `i` lives in locals for its whole
//! inner run and is written back (and drifted) once when `j` runs off the
//! end. The last body has no partners left, so it is only drifted.

use crate::simulation::integrator::{magnitude, Integrator};
use crate::simulation::states::{Body, System, N_BODIES};

/// Plain value body, seven scalars laid out contiguously.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C)]
struct Planet {
    x: f64,
    y: f64,
    z: f64,
    vx: f64,
    vy: f64,
    vz: f64,
    mass: f64,
}

#[derive(Debug, Clone)]
pub struct UnrolledKernel {
    bodies: [Planet; N_BODIES],
}

impl UnrolledKernel {
    pub fn from_system(sys: &System) -> Self {
        let bodies = sys.bodies.map(|b| Planet {
            x: b.x.x,
            y: b.x.y,
            z: b.x.z,
            vx: b.v.x,
            vy: b.v.y,
            vz: b.v.z,
            mass: b.m,
        });
        Self { bodies }
    }
}

impl Integrator for UnrolledKernel {
    fn name(&self) -> &'static str {
        "unrolled"
    }

    #[inline]
    fn advance(&mut self, dt: f64) {
        let b = &mut self.bodies;
        let last = N_BODIES - 1;

        let mut i = 0;
        let mut j = 1;
        let mut bi = b[0];

        loop {
            let bj = &mut b[j];
            let dx = bi.x - bj.x;
            let dy = bi.y - bj.y;
            let dz = bi.z - bj.z;
            let mag = magnitude(dx * dx + dy * dy + dz * dz, dt);

            let jm = bj.mass * mag;
            bi.vx -= dx * jm;
            bi.vy -= dy * jm;
            bi.vz -= dz * jm;

            let im = bi.mass * mag;
            bj.vx += dx * im;
            bj.vy += dy * im;
            bj.vz += dz * im;

            j += 1;
            if j < N_BODIES {
                continue;
            }

            bi.x += bi.vx * dt;
            bi.y += bi.vy * dt;
            bi.z += bi.vz * dt;
            b[i] = bi;

            i += 1;
            if i < last {
                j = i + 1;
                bi = b[i];
                continue;
            }
            break;
        }

        let bl = &mut b[last];
        bl.x += bl.vx * dt;
        bl.y += bl.vy * dt;
        bl.z += bl.vz * dt;
    }

    fn energy(&self) -> f64 {
        let b = &self.bodies;
        let mut e = 0.0;

        let mut i = 0;
        loop {
            let bi = b[i];
            e += 0.5 * bi.mass * (bi.vx * bi.vx + bi.vy * bi.vy + bi.vz * bi.vz);

            let mut j = i + 1;
            while j < N_BODIES {
                let dx = bi.x - b[j].x;
                let dy = bi.y - b[j].y;
                let dz = bi.z - b[j].z;
                e -= bi.mass * b[j].mass / (dx * dx + dy * dy + dz * dz).sqrt();
                j += 1;
            }

            i += 1;
            if i == N_BODIES {
                break;
            }
        }
        e
    }

    fn snapshot(&self) -> System {
        let bodies = self
            .bodies
            .map(|p| Body::new([p.x, p.y, p.z], [p.vx, p.vy, p.vz], p.mass));
        System { bodies }
    }
}
