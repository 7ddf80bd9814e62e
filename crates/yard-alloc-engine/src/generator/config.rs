// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use super::err::{RatioOutOfRangeError, YardGenConfigBuildError};
use rand::Rng;

/// Configuration for synthetic yard generation.
#[derive(Debug, Clone, PartialEq)]
pub struct YardGenConfig {
    pub(crate) fill_ratio: f64,
    pub(crate) forty_share: f64,
    pub(crate) full_share: f64,
    pub(crate) max_attempts: usize,
    pub(crate) seed: u64,
}

impl Default for YardGenConfig {
    fn default() -> Self {
        Self {
            fill_ratio: 0.4,
            forty_share: 0.3,
            full_share: 0.6,
            max_attempts: 10_000,
            seed: 42,
        }
    }
}

#[inline]
fn ratio(name: &'static str, value: f64) -> Result<f64, RatioOutOfRangeError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(RatioOutOfRangeError::new(name, value))
    }
}

impl YardGenConfig {
    pub fn new(
        fill_ratio: f64,
        forty_share: f64,
        full_share: f64,
        max_attempts: usize,
        seed: u64,
    ) -> Result<Self, YardGenConfigBuildError> {
        if max_attempts == 0 {
            return Err(YardGenConfigBuildError::ZeroAttempts);
        }
        Ok(Self {
            fill_ratio: ratio("fill_ratio", fill_ratio)?,
            forty_share: ratio("forty_share", forty_share)?,
            full_share: ratio("full_share", full_share)?,
            max_attempts,
            seed,
        })
    }

    /// Share of catalog cells to cover before generation stops.
    #[inline]
    pub fn fill_ratio(&self) -> f64 {
        self.fill_ratio
    }
    /// Probability that a proposed container is 40ft.
    #[inline]
    pub fn forty_share(&self) -> f64 {
        self.forty_share
    }
    /// Probability that a proposed container is full.
    #[inline]
    pub fn full_share(&self) -> f64 {
        self.full_share
    }
    #[inline]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Builder for `YardGenConfig`.
#[derive(Debug, Clone, PartialEq)]
pub struct YardGenConfigBuilder {
    fill_ratio: f64,
    forty_share: f64,
    full_share: f64,
    max_attempts: usize,
    seed: u64,
}

impl Default for YardGenConfigBuilder {
    fn default() -> Self {
        let defaults = YardGenConfig::default();
        Self {
            fill_ratio: defaults.fill_ratio,
            forty_share: defaults.forty_share,
            full_share: defaults.full_share,
            max_attempts: defaults.max_attempts,
            seed: rand::rng().random(),
        }
    }
}

impl YardGenConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn fill_ratio(mut self, v: f64) -> Self {
        self.fill_ratio = v;
        self
    }
    #[inline]
    pub fn forty_share(mut self, v: f64) -> Self {
        self.forty_share = v;
        self
    }
    #[inline]
    pub fn full_share(mut self, v: f64) -> Self {
        self.full_share = v;
        self
    }
    #[inline]
    pub fn max_attempts(mut self, v: usize) -> Self {
        self.max_attempts = v;
        self
    }
    #[inline]
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    pub fn build(self) -> Result<YardGenConfig, YardGenConfigBuildError> {
        YardGenConfig::new(
            self.fill_ratio,
            self.forty_share,
            self.full_share,
            self.max_attempts,
            self.seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accepts_bounds() {
        let config = YardGenConfigBuilder::new()
            .fill_ratio(1.0)
            .forty_share(0.0)
            .full_share(0.5)
            .max_attempts(1)
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(config.fill_ratio(), 1.0);
        assert_eq!(config.forty_share(), 0.0);
        assert_eq!(config.seed(), 7);
    }

    #[test]
    fn test_builder_rejects_ratio_outside_unit_interval() {
        let err = YardGenConfigBuilder::new()
            .forty_share(1.5)
            .build()
            .unwrap_err();
        match err {
            YardGenConfigBuildError::RatioOutOfRange(e) => {
                assert_eq!(e.name(), "forty_share");
                assert_eq!(e.value(), 1.5);
            }
            other => panic!("unexpected error {:?}", other),
        }

        assert!(YardGenConfigBuilder::new().fill_ratio(-0.1).build().is_err());
        assert!(YardGenConfigBuilder::new().full_share(f64::NAN).build().is_err());
    }

    #[test]
    fn test_builder_rejects_zero_attempts() {
        assert_eq!(
            YardGenConfigBuilder::new().max_attempts(0).build(),
            Err(YardGenConfigBuildError::ZeroAttempts)
        );
    }
}
