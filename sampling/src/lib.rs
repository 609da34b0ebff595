pub mod distributions;
pub mod source;

pub use distributions::{CoefficientDistribution, CoefficientSampler, SamplingError};
pub use rand_core::RngCore;
pub use source::Source;
