//! Configuration types for loading benchmark runs from YAML.
//!
//! A run configuration consists of:
//!
//! - [`KernelConfig`]  – numerical knobs passed to every kernel
//! - [`HarnessConfig`] – which variants to run, how many steps, how often
//! - [`RunConfig`]     – top-level wrapper used to load a run from YAML
//!
//! # YAML format
//! Every field is optional; missing ones take the defaults shown here:
//!
//! ```yaml
//! kernel:
//!   dt: 0.01              # step size
//!   refinements: 2        # newton steps after the rsqrt estimate (simd only)
//!
//! harness:
//!   iterations: 1000      # advances per run
//!   count: 1              # runs per variant
//!   variants: [reference, flat, soa, unrolled, jump, simd]
//! ```
//!
//! Variant names stay strings here and are resolved by the harness, so one
//! misspelled name is reported and skipped instead of rejecting the file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::simulation::engine::Variant;
use crate::simulation::params::{KernelParams, DEFAULT_REFINEMENTS, DT};

/// Upper bound on newton refinements; two already reach double precision.
pub const MAX_REFINEMENTS: u32 = 8;

/// Numerical settings shared by all kernels
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct KernelConfig {
    pub dt: f64, // time step size
    pub refinements: u32, // rsqrt refinement iterations
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            dt: DT,
            refinements: DEFAULT_REFINEMENTS,
        }
    }
}

/// What the harness runs
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HarnessConfig {
    pub iterations: u64, // number of advance calls per run
    pub count: u32, // how many times each variant is run
    pub variants: Vec<String>, // names, resolved with `Variant::from_str`
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            count: 1,
            variants: Variant::ALL.iter().map(|v| v.name().to_string()).collect(),
        }
    }
}

/// Top-level run configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub kernel: KernelConfig,
    pub harness: HarnessConfig,
}

impl RunConfig {
    /// Read and validate a YAML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let cfg: RunConfig = serde_yaml::from_reader(BufReader::new(file))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: RunConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let dt = self.kernel.dt;
        if !dt.is_finite() || dt <= 0.0 {
            return Err(Error::InvalidConfig(format!("dt must be finite and > 0, got {dt}")));
        }
        if self.kernel.refinements > MAX_REFINEMENTS {
            return Err(Error::InvalidConfig(format!(
                "refinements must be <= {MAX_REFINEMENTS}, got {}",
                self.kernel.refinements
            )));
        }
        if self.harness.count == 0 {
            return Err(Error::InvalidConfig("count must be >= 1".into()));
        }
        Ok(())
    }

    pub fn kernel_params(&self) -> KernelParams {
        KernelParams {
            dt: self.kernel.dt,
            refinements: self.kernel.refinements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_takes_defaults() {
        let cfg = RunConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg, RunConfig::default());
        assert_eq!(cfg.kernel.dt, 0.01);
        assert_eq!(cfg.harness.variants.len(), Variant::ALL.len());
    }

    #[test]
    fn partial_document_overrides_only_given_fields() {
        let cfg = RunConfig::from_yaml_str(
            "harness:\n  iterations: 50000000\n  variants: [simd, jump]\n",
        )
        .unwrap();
        assert_eq!(cfg.harness.iterations, 50_000_000);
        assert_eq!(cfg.harness.count, 1);
        assert_eq!(cfg.harness.variants, vec!["simd", "jump"]);
        assert_eq!(cfg.kernel, KernelConfig::default());
    }

    #[test]
    fn unknown_variant_names_survive_parsing() {
        let cfg = RunConfig::from_yaml_str("harness:\n  variants: [bogus]\n").unwrap();
        assert_eq!(cfg.harness.variants, vec!["bogus"]);
    }

    #[test]
    fn non_positive_dt_rejected() {
        let err = RunConfig::from_yaml_str("kernel:\n  dt: 0.0\n").unwrap_err();
        assert!(err.to_string().contains("dt"));
    }

    #[test]
    fn zero_count_rejected() {
        let err = RunConfig::from_yaml_str("harness:\n  count: 0\n").unwrap_err();
        assert!(err.to_string().contains("count"));
    }

    #[test]
    fn too_many_refinements_rejected() {
        let err = RunConfig::from_yaml_str("kernel:\n  refinements: 9\n").unwrap_err();
        assert!(err.to_string().contains("refinements"));
    }
}
