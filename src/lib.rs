pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, System, NVec3, N_BODIES, PAIRS};
pub use simulation::params::{KernelParams, DT, SOLAR_MASS, DAYS_PER_YEAR};
pub use simulation::scenario::construct;
pub use simulation::energy::energy;
pub use simulation::integrator::{advance, Integrator, ReferenceKernel};
pub use simulation::variants::{FlatKernel, JumpKernel, SimdKernel, SoaKernel, UnrolledKernel};
pub use simulation::engine::Variant;

pub use configuration::config::{RunConfig, KernelConfig, HarnessConfig};

pub use benchmark::benchmark::{bench_variants, print_report, print_summary, resolve_variants, run_variant, RunReport, BenchSummary};

pub use error::{Error, Result};
