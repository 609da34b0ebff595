use crate::source::Source;
use rand::distr::uniform::Error as UniformError;
use rand::distr::Uniform;
use rand_distr::{Binomial, BinomialError, Distribution};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplingError {
    #[error("uniform modulus must be at least 2, got {0}")]
    InvalidModulus(u64),
    #[error("centered binomial parameter must be positive")]
    InvalidEta,
    #[error(transparent)]
    Uniform(#[from] UniformError),
    #[error(transparent)]
    Binomial(#[from] BinomialError),
}

/// Law of the coefficients of a random polynomial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoefficientDistribution {
    /// Uniform over the centered residues `[-(q/2), q - q/2)`.
    Uniform { q: u64 },
    /// Difference of two `Binomial(eta, 1/2)` draws, in `[-eta, eta]`.
    CenteredBinomial { eta: u32 },
    /// Uniform over `{-1, 0, 1}`.
    Ternary,
}

impl CoefficientDistribution {
    pub fn sampler(&self) -> Result<CoefficientSampler, SamplingError> {
        Ok(match *self {
            CoefficientDistribution::Uniform { q } => {
                if q < 2 {
                    return Err(SamplingError::InvalidModulus(q));
                }
                let lo: i64 = -((q / 2) as i64);
                CoefficientSampler::Uniform(Uniform::new(lo, lo + q as i64)?)
            }
            CoefficientDistribution::CenteredBinomial { eta } => {
                if eta == 0 {
                    return Err(SamplingError::InvalidEta);
                }
                CoefficientSampler::CenteredBinomial {
                    binomial: Binomial::new(2 * eta as u64, 0.5)?,
                    eta: eta as i64,
                }
            }
            CoefficientDistribution::Ternary => CoefficientSampler::Uniform(Uniform::new_inclusive(-1, 1)?),
        })
    }

    /// Overwrites `a` with independent draws.
    pub fn fill(&self, source: &mut Source, a: &mut [i64]) -> Result<(), SamplingError> {
        let sampler: CoefficientSampler = self.sampler()?;
        a.iter_mut().for_each(|x| *x = sampler.sample(source));
        Ok(())
    }
}

/// Prepared sampler of a [CoefficientDistribution].
#[derive(Clone, Debug)]
pub enum CoefficientSampler {
    Uniform(Uniform<i64>),
    CenteredBinomial { binomial: Binomial, eta: i64 },
}

impl Distribution<i64> for CoefficientSampler {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        match self {
            CoefficientSampler::Uniform(u) => u.sample(rng),
            CoefficientSampler::CenteredBinomial { binomial, eta } => binomial.sample(rng) as i64 - eta,
        }
    }
}
