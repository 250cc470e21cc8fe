//! Alternate layouts of the kernel. Each one satisfies `Integrator` and
//! matches the reference energy to 9 decimal places.

pub mod flat;
pub mod jump;
pub mod simd;
pub mod soa;
pub mod unrolled;

pub use flat::FlatKernel;
pub use jump::JumpKernel;
pub use simd::SimdKernel;
pub use soa::SoaKernel;
pub use unrolled::UnrolledKernel;
