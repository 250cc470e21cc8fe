pub mod states;
pub mod params;
pub mod scenario;
pub mod energy;
pub mod integrator;
pub mod lanes;
pub mod variants;
pub mod engine;
