//! Linear congruential random stream.

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Draws are reduced into `[0, DRAW_RANGE)`.
pub const DRAW_RANGE: u64 = 100;

/// Parameters of `x <- (a*x + c) mod M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LcgParams {
    /// Multiplier `a`.
    pub multiplier: u64,
    /// Increment `c`.
    pub increment: u64,
    /// Modulus `M`, must be positive.
    pub modulus: u64,
}

impl LcgParams {
    pub const fn new(multiplier: u64, increment: u64, modulus: u64) -> Self {
        Self {
            multiplier,
            increment,
            modulus,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.modulus == 0 {
            return Err(ConfigError::ZeroModulus);
        }
        Ok(())
    }
}

/// An endless, restartable stream of draws in `[0, 99]`.
///
/// The seed itself is never emitted: each draw is taken after advancing the
/// state once. Intermediate products are computed in 128 bits so any `u64`
/// parameters are safe.
#[derive(Debug, Clone)]
pub struct RandomStream {
    params: LcgParams,
    state: u64,
}

impl RandomStream {
    pub fn new(params: LcgParams, seed: u64) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            state: seed,
        })
    }

    /// The first `count` draws for `seed`.
    pub fn draws(params: LcgParams, seed: u64, count: usize) -> Result<Vec<u32>, ConfigError> {
        Ok(Self::new(params, seed)?.take(count).collect())
    }

    /// Current generator state (the last raw value, before reduction).
    pub fn state(&self) -> u64 {
        self.state
    }

    fn advance(&mut self) -> u64 {
        let LcgParams {
            multiplier,
            increment,
            modulus,
        } = self.params;
        let next = (u128::from(multiplier) * u128::from(self.state) + u128::from(increment))
            % u128::from(modulus);
        // next < modulus <= u64::MAX
        self.state = next as u64;
        self.state
    }
}

impl Iterator for RandomStream {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some((self.advance() % DRAW_RANGE) as u32)
    }
}
