//! Physical and numerical parameters for the kernel
//!
//! Constants are fixed by the reference data table. `KernelParams` carries the
//! two runtime knobs a caller may change:
//! - the step size `dt`,
//! - the number of Newton refinements used by the SIMD reciprocal square root

use std::f64::consts::PI;

/// Solar mass in natural units (G = 1, lengths in AU, time in years).
pub const SOLAR_MASS: f64 = 4.0 * PI * PI;

/// Velocities in the table are given per day.
pub const DAYS_PER_YEAR: f64 = 365.24;

/// Canonical step size.
pub const DT: f64 = 0.01;

/// Refinement iterations the SIMD kernel uses unless told otherwise.
pub const DEFAULT_REFINEMENTS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelParams {
    pub dt: f64, // time step
    pub refinements: u32, // newton steps after the rsqrt estimate
}

impl Default for KernelParams {
    fn default() -> Self {
        Self {
            dt: DT,
            refinements: DEFAULT_REFINEMENTS,
        }
    }
}
