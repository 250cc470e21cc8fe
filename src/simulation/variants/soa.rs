//! Struct-of-arrays layout: one `[f64; N_BODIES]` per scalar field.

use crate::simulation::integrator::{magnitude, Integrator};
use crate::simulation::states::{Body, System, N_BODIES};

#[derive(Debug, Clone)]
pub struct SoaKernel {
    x: [f64; N_BODIES],
    y: [f64; N_BODIES],
    z: [f64; N_BODIES],
    vx: [f64; N_BODIES],
    vy: [f64; N_BODIES],
    vz: [f64; N_BODIES],
    mass: [f64; N_BODIES],
}

impl SoaKernel {
    pub fn from_system(sys: &System) -> Self {
        let mut k = Self {
            x: [0.0; N_BODIES],
            y: [0.0; N_BODIES],
            z: [0.0; N_BODIES],
            vx: [0.0; N_BODIES],
            vy: [0.0; N_BODIES],
            vz: [0.0; N_BODIES],
            mass: [0.0; N_BODIES],
        };
        for (i, b) in sys.bodies.iter().enumerate() {
            k.x[i] = b.x.x;
            k.y[i] = b.x.y;
            k.z[i] = b.x.z;
            k.vx[i] = b.v.x;
            k.vy[i] = b.v.y;
            k.vz[i] = b.v.z;
            k.mass[i] = b.m;
        }
        k
    }
}

impl Integrator for SoaKernel {
    fn name(&self) -> &'static str {
        "soa"
    }

    fn advance(&mut self, dt: f64) {
        for i in 0..N_BODIES {
            for j in (i + 1)..N_BODIES {
                let dx = self.x[i] - self.x[j];
                let dy = self.y[i] - self.y[j];
                let dz = self.z[i] - self.z[j];
                let mag = magnitude(dx * dx + dy * dy + dz * dz, dt);

                let jm = self.mass[j] * mag;
                self.vx[i] -= dx * jm;
                self.vy[i] -= dy * jm;
                self.vz[i] -= dz * jm;

                let im = self.mass[i] * mag;
                self.vx[j] += dx * im;
                self.vy[j] += dy * im;
                self.vz[j] += dz * im;
            }
            self.x[i] += self.vx[i] * dt;
            self.y[i] += self.vy[i] * dt;
            self.z[i] += self.vz[i] * dt;
        }
    }

    fn energy(&self) -> f64 {
        let mut e = 0.0;
        for i in 0..N_BODIES {
            let v2 = self.vx[i] * self.vx[i] + self.vy[i] * self.vy[i] + self.vz[i] * self.vz[i];
            e += 0.5 * self.mass[i] * v2;
            for j in (i + 1)..N_BODIES {
                let dx = self.x[i] - self.x[j];
                let dy = self.y[i] - self.y[j];
                let dz = self.z[i] - self.z[j];
                e -= self.mass[i] * self.mass[j] / (dx * dx + dy * dy + dz * dz).sqrt();
            }
        }
        e
    }

    fn snapshot(&self) -> System {
        let bodies: [Body; N_BODIES] = std::array::from_fn(|i| {
            Body::new(
                [self.x[i], self.y[i], self.z[i]],
                [self.vx[i], self.vy[i], self.vz[i]],
                self.mass[i],
            )
        });
        System { bodies }
    }
}
