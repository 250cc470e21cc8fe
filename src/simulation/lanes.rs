//! Two-lane `f64` vector used by the SIMD kernel.
//!
//! Plain arithmetic is written lane-wise so the compiler is free to map it onto
//! whatever 128-bit unit the target has. The one operation with no portable
//! scalar equivalent is the fast reciprocal square root estimate: on x86_64 it
//! comes from SSE `rsqrtps` (about 12 correct bits) and is then sharpened by
//! Newton-Raphson steps; on other targets the estimate is the exact
//! `1 / sqrt(x)` and refinement is a no-op in exact arithmetic.

use std::ops::{Add, Div, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct F64x2(pub f64, pub f64);

impl F64x2 {
    #[inline(always)]
    pub fn new(a: f64, b: f64) -> Self {
        F64x2(a, b)
    }

    #[inline(always)]
    pub fn splat(x: f64) -> Self {
        F64x2(x, x)
    }

    #[inline(always)]
    pub fn sqrt(self) -> Self {
        F64x2(self.0.sqrt(), self.1.sqrt())
    }

    #[inline(always)]
    pub fn to_array(self) -> [f64; 2] {
        [self.0, self.1]
    }

    /// Write both lanes to `out[0]` and `out[1]`.
    #[inline(always)]
    pub fn write_to_slice(self, out: &mut [f64]) {
        out[0] = self.0;
        out[1] = self.1;
    }

    /// Approximate `1 / sqrt(self)` followed by `refinements` Newton steps
    /// `y <- 1.5 y - (0.5 x y) y^2`.
    ///
    /// Relative error per lane is below 4e-4 with no refinement, 1e-6 with
    /// one and 1e-12 with two (x86_64); elsewhere the estimate is exact.
    #[inline(always)]
    pub fn rsqrt(self, refinements: u32) -> Self {
        let half_x = F64x2::splat(0.5) * self;
        let three_halves = F64x2::splat(1.5);

        let mut y = self.rsqrt_estimate();
        for _ in 0..refinements {
            y = y * three_halves - half_x * y * (y * y);
        }
        y
    }

    #[cfg(target_arch = "x86_64")]
    #[inline(always)]
    fn rsqrt_estimate(self) -> Self {
        use std::arch::x86_64::{_mm_cvtpd_ps, _mm_cvtps_pd, _mm_rsqrt_ps, _mm_set_pd, _mm_storeu_pd};

        let mut out = [0.0f64; 2];
        // SAFETY: sse and sse2 are part of the x86_64 baseline, and `out` has
        // room for the two lanes `_mm_storeu_pd` writes (unaligned store).
        unsafe {
            let x = _mm_set_pd(self.1, self.0);
            let est = _mm_cvtps_pd(_mm_rsqrt_ps(_mm_cvtpd_ps(x)));
            _mm_storeu_pd(out.as_mut_ptr(), est);
        }
        F64x2(out[0], out[1])
    }

    #[cfg(not(target_arch = "x86_64"))]
    #[inline(always)]
    fn rsqrt_estimate(self) -> Self {
        F64x2::splat(1.0) / self.sqrt()
    }
}

impl Add for F64x2 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        F64x2(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for F64x2 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        F64x2(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Mul for F64x2 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        F64x2(self.0 * rhs.0, self.1 * rhs.1)
    }
}

impl Div for F64x2 {
    type Output = Self;
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        F64x2(self.0 / rhs.0, self.1 / rhs.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_rel_err(x: F64x2, refinements: u32) -> f64 {
        let got = x.rsqrt(refinements).to_array();
        let want = [1.0 / x.0.sqrt(), 1.0 / x.1.sqrt()];
        got.iter()
            .zip(want.iter())
            .map(|(g, w)| ((g - w) / w).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn lanewise_arithmetic() {
        let a = F64x2::new(1.0, 4.0);
        let b = F64x2::new(2.0, 8.0);
        assert_eq!((a + b).to_array(), [3.0, 12.0]);
        assert_eq!((b - a).to_array(), [1.0, 4.0]);
        assert_eq!((a * b).to_array(), [2.0, 32.0]);
        assert_eq!((b / a).to_array(), [2.0, 2.0]);
        assert_eq!(a.sqrt().to_array(), [1.0, 2.0]);
    }

    #[test]
    fn rsqrt_estimate_is_close() {
        // squared distances seen by the kernel span roughly 1..1000 AU^2
        for &(a, b) in &[(1.0, 2.0), (25.0, 90.5), (387.2, 911.0), (0.3, 7.7)] {
            let x = F64x2::new(a, b);
            assert!(max_rel_err(x, 0) < 4e-4, "estimate too coarse for {:?}", x);
        }
    }

    #[test]
    fn newton_refinement_converges() {
        let x = F64x2::new(23.4567, 612.25);
        assert!(max_rel_err(x, 1) < 1e-6);
        assert!(max_rel_err(x, 2) < 1e-12);
        assert!(max_rel_err(x, 3) <= max_rel_err(x, 2) + 1e-15);
    }

    #[test]
    fn write_to_slice_fills_two_lanes() {
        let mut out = [0.0; 4];
        F64x2::new(5.0, 6.0).write_to_slice(&mut out[2..]);
        assert_eq!(out, [0.0, 0.0, 5.0, 6.0]);
    }
}
