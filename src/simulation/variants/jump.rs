//! State-machine kernel.
//!
//! Energy and advance are written as labelled states of a single `loop` +
//! `match`, with "calls" emulated by pushing the return state onto a small
//! fixed call stack and "returns" by popping it. A whole run (energy, N
//! advances, energy) executes inside one machine without a function call per
//! step. Body `i` is held in registers while its partners are visited.

use crate::simulation::integrator::{magnitude, Integrator};
use crate::simulation::states::{Body, System, N_BODIES};

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;
const VX: usize = 3;
const VY: usize = 4;
const VZ: usize = 5;
const MASS: usize = 6;

type Bodies = [[f64; 7]; N_BODIES];

/// Deepest nesting is Finished + three program calls + one inner return.
const STACK_DEPTH: usize = 8;

/// Energies recorded by one machine run, at most one per `Energy` call.
const MAX_RECORDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Finished,
    Energy,
    EnergyOuter,
    EnergyKinetic,
    EnergyPair,
    Advance,
    AdvanceOuter,
    AdvancePair,
    LoadBodyI,
}

struct CallStack {
    ops: [Op; STACK_DEPTH],
    sp: usize,
}

impl CallStack {
    fn new() -> Self {
        Self {
            ops: [Op::Finished; STACK_DEPTH],
            sp: 0,
        }
    }

    #[inline(always)]
    fn push(&mut self, op: Op) {
        debug_assert!(self.sp < STACK_DEPTH, "call stack overflow");
        self.ops[self.sp] = op;
        self.sp += 1;
    }

    #[inline(always)]
    fn pop(&mut self) -> Op {
        if self.sp == 0 {
            return Op::Finished;
        }
        self.sp -= 1;
        self.ops[self.sp]
    }
}

/// Energies produced by the `Energy` calls of one run, in call order.
#[derive(Debug, Clone, Copy, Default)]
struct Recorded {
    values: [f64; MAX_RECORDS],
    len: usize,
}

impl Recorded {
    fn push(&mut self, e: f64) {
        if self.len < MAX_RECORDS {
            self.values[self.len] = e;
            self.len += 1;
        }
    }
}

/// Run `program` (executed left to right) over `b`. Every `Advance` in the
/// program performs `steps` advances of size `dt`.
fn execute(b: &mut Bodies, program: &[Op], steps: u64, dt: f64) -> Recorded {
    let mut stack = CallStack::new();
    for &op in program.iter().rev() {
        stack.push(op);
    }

    let mut out = Recorded::default();
    let last = N_BODIES - 1;

    // registers
    let (mut i, mut j) = (0usize, 0usize);
    let (mut ix, mut iy, mut iz) = (0.0, 0.0, 0.0);
    let (mut ivx, mut ivy, mut ivz) = (0.0, 0.0, 0.0);
    let mut imass = 0.0;
    let mut e = 0.0;
    let mut remaining = 0u64;

    let mut op = stack.pop();
    loop {
        match op {
            Op::Energy => {
                e = 0.0;
                i = 0;
                op = Op::EnergyOuter;
            }
            Op::EnergyOuter => {
                stack.push(Op::EnergyKinetic);
                op = Op::LoadBodyI;
            }
            Op::EnergyKinetic => {
                e += 0.5 * imass * (ivx * ivx + ivy * ivy + ivz * ivz);
                op = Op::EnergyPair;
            }
            Op::EnergyPair => {
                if j < N_BODIES {
                    let bj = &b[j];
                    let dx = ix - bj[X];
                    let dy = iy - bj[Y];
                    let dz = iz - bj[Z];
                    e -= imass * bj[MASS] / (dx * dx + dy * dy + dz * dz).sqrt();
                    j += 1;
                } else {
                    i += 1;
                    if i < N_BODIES {
                        op = Op::EnergyOuter;
                    } else {
                        out.push(e);
                        op = stack.pop();
                    }
                }
            }
            Op::Advance => {
                if remaining == 0 {
                    remaining = steps;
                }
                if remaining == 0 {
                    op = stack.pop();
                } else {
                    i = 0;
                    op = Op::AdvanceOuter;
                }
            }
            Op::AdvanceOuter => {
                stack.push(Op::AdvancePair);
                op = Op::LoadBodyI;
            }
            Op::AdvancePair => {
                let bj = &mut b[j];
                let dx = ix - bj[X];
                let dy = iy - bj[Y];
                let dz = iz - bj[Z];
                let mag = magnitude(dx * dx + dy * dy + dz * dz, dt);

                let jm = bj[MASS] * mag;
                ivx -= dx * jm;
                ivy -= dy * jm;
                ivz -= dz * jm;

                let im = imass * mag;
                bj[VX] += dx * im;
                bj[VY] += dy * im;
                bj[VZ] += dz * im;

                j += 1;
                if j < N_BODIES {
                    continue;
                }

                let bi = &mut b[i];
                bi[VX] = ivx;
                bi[VY] = ivy;
                bi[VZ] = ivz;
                bi[X] = ix + ivx * dt;
                bi[Y] = iy + ivy * dt;
                bi[Z] = iz + ivz * dt;

                i += 1;
                if i < last {
                    op = Op::AdvanceOuter;
                    continue;
                }

                let bl = &mut b[last];
                bl[X] += bl[VX] * dt;
                bl[Y] += bl[VY] * dt;
                bl[Z] += bl[VZ] * dt;

                remaining -= 1;
                op = if remaining > 0 { Op::Advance } else { stack.pop() };
            }
            Op::LoadBodyI => {
                let bi = &b[i];
                j = i + 1;
                ix = bi[X];
                iy = bi[Y];
                iz = bi[Z];
                ivx = bi[VX];
                ivy = bi[VY];
                ivz = bi[VZ];
                imass = bi[MASS];
                op = stack.pop();
            }
            Op::Finished => break,
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct JumpKernel {
    bodies: Bodies,
}

impl JumpKernel {
    pub fn from_system(sys: &System) -> Self {
        let bodies = sys
            .bodies
            .map(|b| [b.x.x, b.x.y, b.x.z, b.v.x, b.v.y, b.v.z, b.m]);
        Self { bodies }
    }

    /// Energy before, `steps` advances, energy after: all in one machine run.
    pub fn run(&mut self, steps: u64, dt: f64) -> (f64, f64) {
        let rec = execute(
            &mut self.bodies,
            &[Op::Energy, Op::Advance, Op::Energy],
            steps,
            dt,
        );
        debug_assert_eq!(rec.len, 2);
        (rec.values[0], rec.values[1])
    }
}

impl Integrator for JumpKernel {
    fn name(&self) -> &'static str {
        "jump"
    }

    fn advance(&mut self, dt: f64) {
        execute(&mut self.bodies, &[Op::Advance], 1, dt);
    }

    fn advance_n(&mut self, steps: u64, dt: f64) {
        execute(&mut self.bodies, &[Op::Advance], steps, dt);
    }

    fn energy(&self) -> f64 {
        let mut b = self.bodies;
        execute(&mut b, &[Op::Energy], 0, 0.0).values[0]
    }

    fn snapshot(&self) -> System {
        let bodies = self
            .bodies
            .map(|p| Body::new([p[X], p[Y], p[Z]], [p[VX], p[VY], p[VZ]], p[MASS]));
        System { bodies }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::DT;
    use crate::simulation::scenario::construct;

    #[test]
    fn records_one_energy_per_call() {
        let mut b = JumpKernel::from_system(&construct()).bodies;
        let rec = execute(&mut b, &[Op::Energy, Op::Advance, Op::Advance, Op::Energy], 5, DT);
        assert_eq!(rec.len, 2);
        assert!(rec.values[0] < 0.0 && rec.values[1] < 0.0);
    }

    #[test]
    fn chained_advance_calls_accumulate() {
        let sys = construct();

        let mut twice = JumpKernel::from_system(&sys).bodies;
        execute(&mut twice, &[Op::Advance, Op::Advance], 3, DT);

        let mut once = JumpKernel::from_system(&sys).bodies;
        execute(&mut once, &[Op::Advance], 6, DT);

        assert_eq!(twice, once);
    }

    #[test]
    fn zero_steps_leaves_state_untouched() {
        let sys = construct();
        let mut k = JumpKernel::from_system(&sys);
        k.advance_n(0, DT);
        assert_eq!(k.snapshot(), sys);
    }
}
