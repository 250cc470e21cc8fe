//! Timing harness over the kernel variants.
//!
//! A run is: construct -> energy -> `iterations` advances -> energy, with only
//! the advance loop timed. `bench_variants` repeats that `count` times per
//! variant and compares mean times against the reference kernel.

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::error::Error;
use crate::simulation::engine::Variant;
use crate::simulation::params::KernelParams;
use crate::simulation::scenario::construct;

/// Outcome of one run of one variant.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub variant: Variant,
    pub iterations: u64,
    pub initial_energy: f64,
    pub final_energy: f64,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Final minus initial energy.
    pub fn drift(&self) -> f64 {
        self.final_energy - self.initial_energy
    }
}

/// Timing statistics of `count` runs of one variant.
#[derive(Debug, Clone)]
pub struct BenchSummary {
    pub variant: Variant,
    pub runs: u32,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub ratio: f64, // mean / baseline mean
    pub final_energy: f64,
}

/// Resolve variant names, reporting and skipping the ones that match nothing.
pub fn resolve_variants<S: AsRef<str>>(names: &[S]) -> (Vec<Variant>, Vec<Error>) {
    let mut found = Vec::with_capacity(names.len());
    let mut rejected = Vec::new();

    for name in names {
        match name.as_ref().parse::<Variant>() {
            Ok(v) => found.push(v),
            Err(e) => {
                warn!("{e}");
                rejected.push(e);
            }
        }
    }
    (found, rejected)
}

/// Run one variant from a freshly constructed system.
pub fn run_variant(variant: Variant, params: &KernelParams, iterations: u64) -> RunReport {
    let sys = construct();
    let mut kernel = variant.build(&sys, params);

    let initial_energy = kernel.energy();

    let t0 = Instant::now();
    kernel.advance_n(iterations, params.dt);
    let elapsed = t0.elapsed();

    let final_energy = kernel.energy();

    info!(
        "{variant}: {iterations} steps in {:.3} ms",
        elapsed.as_secs_f64() * 1000.0
    );

    RunReport {
        variant,
        iterations,
        initial_energy,
        final_energy,
        elapsed,
    }
}

/// Print one run the way the classic benchmark does: two energies, then time.
pub fn print_report(report: &RunReport) {
    println!("{}", report.variant);
    println!("{:.9}", report.initial_energy);
    println!("{:.9}", report.final_energy);
    println!("Millis: {}", report.elapsed.as_millis());
}

/// Run every variant `count` times and summarize. The baseline for `ratio` is
/// `reference` when it is among `variants`, otherwise the first variant.
pub fn bench_variants(
    variants: &[Variant],
    params: &KernelParams,
    iterations: u64,
    count: u32,
) -> Vec<BenchSummary> {
    let count = count.max(1);
    let mut out = Vec::with_capacity(variants.len());

    for &variant in variants {
        let mut times = Vec::with_capacity(count as usize);
        let mut final_energy = 0.0;

        for run in 0..count {
            let report = run_variant(variant, params, iterations);
            debug!("{variant} run {run}: {:.3} ms", report.millis());
            final_energy = report.final_energy;
            times.push(report.millis());
        }

        let mean_ms = times.iter().sum::<f64>() / times.len() as f64;
        let min_ms = times.iter().copied().fold(f64::INFINITY, f64::min);
        let max_ms = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        out.push(BenchSummary {
            variant,
            runs: count,
            mean_ms,
            min_ms,
            max_ms,
            ratio: 1.0,
            final_energy,
        });
    }

    let baseline = out
        .iter()
        .find(|s| s.variant == Variant::Reference)
        .or_else(|| out.first())
        .map(|s| s.mean_ms);

    if let Some(base) = baseline {
        for s in out.iter_mut() {
            s.ratio = if base > 0.0 { s.mean_ms / base } else { 1.0 };
        }
    }
    out
}

/// Print a summary table, one row per variant.
pub fn print_summary(summaries: &[BenchSummary]) {
    println!(
        "{:>10} | {:>4} | {:>12} | {:>12} | {:>12} | {:>6} | {:>13}",
        "variant", "runs", "mean ms", "min ms", "max ms", "ratio", "energy"
    );
    println!("{}", "-".repeat(88));
    for s in summaries {
        println!(
            "{:>10} | {:>4} | {:>12.3} | {:>12.3} | {:>12.3} | {:>6.2} | {:>13.9}",
            s.variant.name(),
            s.runs,
            s.mean_ms,
            s.min_ms,
            s.max_ms,
            s.ratio,
            s.final_energy
        );
    }
}
