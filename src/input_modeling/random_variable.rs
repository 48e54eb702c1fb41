//! Random variables drive synthetic schedule generation.  Deterministic
//! behavior is simply a random variable with a single value of probability
//! 1, expressed here with the `Constant` variant.

use rand::distributions::Distribution;
use serde::{Deserialize, Serialize};
use rand_distr::{Exp, Gamma, Normal, Triangular, Uniform, Weibull};

use super::UniformRNG;
use crate::utils::errors::SimulationError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Continuous {
    Constant { value: f64 },
    Exp { lambda: f64 },
    Gamma { shape: f64, scale: f64 },
    Normal { mean: f64, std_dev: f64 },
    Triangular { min: f64, max: f64, mode: f64 },
    Uniform { min: f64, max: f64 },
    Weibull { shape: f64, scale: f64 },
}

impl Continuous {
    /// The generation of random variates drives stochastic schedules.  This
    /// function requires a random number generator, and produces a f64
    /// random variate.
    pub fn random_variate(&mut self, uniform_rng: &mut UniformRNG) -> Result<f64, SimulationError> {
        match self {
            Continuous::Constant { value } => Ok(*value),
            Continuous::Exp { lambda } => Ok(Exp::new(*lambda)?.sample(uniform_rng.rng())),
            Continuous::Gamma { shape, scale } => {
                Ok(Gamma::new(*shape, *scale)?.sample(uniform_rng.rng()))
            }
            Continuous::Normal { mean, std_dev } => {
                Ok(Normal::new(*mean, *std_dev)?.sample(uniform_rng.rng()))
            }
            Continuous::Triangular { min, max, mode } => {
                Ok(Triangular::new(*min, *max, *mode)?.sample(uniform_rng.rng()))
            }
            Continuous::Uniform { min, max } => {
                Ok(Uniform::new(*min, *max).sample(uniform_rng.rng()))
            }
            Continuous::Weibull { shape, scale } => {
                Ok(Weibull::new(*shape, *scale)?.sample(uniform_rng.rng()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_variates_are_deterministic() {
        let mut rng = UniformRNG::default();
        let mut constant = Continuous::Constant { value: 2.5 };
        assert_eq!(constant.random_variate(&mut rng).unwrap(), 2.5);
        assert_eq!(constant.random_variate(&mut rng).unwrap(), 2.5);
    }

    #[test]
    fn exponential_sample_mean_is_close() {
        let mut rng = UniformRNG::new(7);
        let mut exponential = Continuous::Exp { lambda: 0.5 };
        let mean = (0..10000)
            .map(|_| exponential.random_variate(&mut rng).unwrap())
            .sum::<f64>()
            / 10000.0;
        assert!((mean - 2.0).abs() < 0.1);
    }

    #[test]
    fn invalid_parameters_are_reported() {
        let mut rng = UniformRNG::default();
        let mut exponential = Continuous::Exp { lambda: -1.0 };
        assert!(matches!(
            exponential.random_variate(&mut rng),
            Err(SimulationError::ExpError(_))
        ));
    }
}
