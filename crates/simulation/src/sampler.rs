//! Sources of standard-normal draws.
//!
//! The engine only depends on [`NormalSource`]; the concrete sampler is
//! picked by the caller. Seeded samplers make runs reproducible, the
//! entropy-seeded default does not.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// Trait for anything that yields independent N(0, 1) draws.
pub trait NormalSource {
    /// Returns the next standard-normal draw.
    fn sample(&mut self) -> f64;
}

impl<S: NormalSource + ?Sized> NormalSource for Box<S> {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

/// Box-Muller sampler over a uniform random source.
///
/// Each call draws `u1, u2` and returns `sqrt(-2 ln u1) * cos(2π u2)`.
/// The `sin` companion is thrown away unless the companion cache is
/// enabled, in which case it is returned by the following call.
#[derive(Debug, Clone)]
pub struct BoxMullerSampler<R: Rng> {
    rng: R,
    cache_companion: bool,
    spare: Option<f64>,
}

impl<R: Rng> BoxMullerSampler<R> {
    /// Creates a sampler over the given uniform source.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            cache_companion: false,
            spare: None,
        }
    }

    /// Keeps the `sin` variate for the next call, halving uniform draws.
    #[must_use]
    pub fn with_companion_cache(mut self) -> Self {
        self.cache_companion = true;
        self
    }

    /// Draws from `(0, 1)`, rejecting exact zeros so `ln` stays finite.
    fn open_uniform(&mut self) -> f64 {
        loop {
            let u: f64 = self.rng.random();
            if u > 0.0 {
                return u;
            }
        }
    }
}

impl BoxMullerSampler<StdRng> {
    /// Sampler seeded from OS entropy. Not reproducible.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic sampler for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> NormalSource for BoxMullerSampler<R> {
    fn sample(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }

        let u1 = self.open_uniform();
        let u2: f64 = self.rng.random();

        let radius = (-2.0 * u1.ln()).sqrt();
        let theta = TAU * u2;

        if self.cache_companion {
            self.spare = Some(radius * theta.sin());
        }
        radius * theta.cos()
    }
}

/// Sampler backed by `rand_distr`'s ziggurat `StandardNormal`.
#[derive(Debug, Clone)]
pub struct ZigguratSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> ZigguratSampler<R> {
    /// Creates a sampler over the given uniform source.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NormalSource for ZigguratSampler<R> {
    fn sample(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    draws: Vec<f64>,
    cursor: usize,
}

impl FixedSequence {
    /// Creates a sequence that starts at the first draw.
    ///
    /// # Panics
    ///
    /// Panics if `draws` is empty.
    #[must_use]
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws.into();
        assert!(!draws.is_empty(), "FixedSequence needs at least one draw");
        Self { draws, cursor: 0 }
    }
}

impl NormalSource for FixedSequence {
    fn sample(&mut self) -> f64 {
        let z = self.draws[self.cursor];
        self.cursor = (self.cursor + 1) % self.draws.len();
        z
    }
}

/// Sampler selection exposed to configuration and the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SamplerKind {
    /// Box-Muller, companion variate discarded.
    #[default]
    BoxMuller,
    /// Box-Muller with the companion variate cached.
    BoxMullerCached,
    /// Ziggurat method from `rand_distr`.
    Ziggurat,
}

impl SamplerKind {
    /// Builds a sampler of this kind, seeded when `seed` is given.
    #[must_use]
    pub fn build(self, seed: Option<u64>) -> Box<dyn NormalSource + Send> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        match self {
            Self::BoxMuller => Box::new(BoxMullerSampler::new(rng)),
            Self::BoxMullerCached => Box::new(BoxMullerSampler::new(rng).with_companion_cache()),
            Self::Ziggurat => Box::new(ZigguratSampler::new(rng)),
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BoxMuller => "box-muller",
            Self::BoxMullerCached => "box-muller-cached",
            Self::Ziggurat => "ziggurat",
        }
    }
}

impl fmt::Display for SamplerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SamplerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box-muller" | "boxmuller" => Ok(Self::BoxMuller),
            "box-muller-cached" | "cached" => Ok(Self::BoxMullerCached),
            "ziggurat" => Ok(Self::Ziggurat),
            other => Err(format!(
                "unknown sampler `{other}` (expected box-muller, box-muller-cached or ziggurat)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    /// Uniform source replaying scripted 64-bit words.
    struct ScriptedRng {
        words: Vec<u64>,
        cursor: usize,
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let word = self.words[self.cursor % self.words.len()];
            self.cursor += 1;
            word
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for chunk in dst.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    fn moments(sampler: &mut impl NormalSource, n: usize) -> (f64, f64) {
        let draws: Vec<f64> = (0..n).map(|_| sampler.sample()).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / n as f64;
        (mean, var)
    }

    #[test]
    fn test_box_muller_moments() {
        let mut sampler = BoxMullerSampler::seeded(7);
        let (mean, var) = moments(&mut sampler, 200_000);
        assert!(mean.abs() < 0.02, "mean {mean}");
        assert!((var - 1.0).abs() < 0.02, "variance {var}");
    }

    #[test]
    fn test_cached_box_muller_moments() {
        let mut sampler = BoxMullerSampler::seeded(11).with_companion_cache();
        let (mean, var) = moments(&mut sampler, 200_000);
        assert!(mean.abs() < 0.02, "mean {mean}");
        assert!((var - 1.0).abs() < 0.02, "variance {var}");
    }

    #[test]
    fn test_ziggurat_moments() {
        let mut sampler = ZigguratSampler::new(StdRng::seed_from_u64(3));
        let (mean, var) = moments(&mut sampler, 200_000);
        assert!(mean.abs() < 0.02, "mean {mean}");
        assert!((var - 1.0).abs() < 0.02, "variance {var}");
    }

    #[test]
    fn test_zero_uniform_is_redrawn() {
        // 0 -> u1 rejected; 1 << 63 -> u1 = 0.5; 0 -> u2 = 0.0
        let rng = ScriptedRng {
            words: vec![0, 1 << 63, 0],
            cursor: 0,
        };
        let mut sampler = BoxMullerSampler::new(rng);
        let z = sampler.sample();
        let expected = (2.0 * std::f64::consts::LN_2).sqrt();
        assert!(z.is_finite());
        assert!((z - expected).abs() < 1e-12, "got {z}");
    }

    #[test]
    fn test_companion_cache_returns_sin_variate() {
        // u1 = 0.5, u2 = 0.25 -> cos term ~ 0, sin term = radius
        let rng = ScriptedRng {
            words: vec![1 << 63, 1 << 62],
            cursor: 0,
        };
        let mut sampler = BoxMullerSampler::new(rng).with_companion_cache();
        let radius = (2.0 * std::f64::consts::LN_2).sqrt();

        let first = sampler.sample();
        let second = sampler.sample();
        assert!(first.abs() < 1e-12);
        assert!((second - radius).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_samplers_are_reproducible() {
        let mut a = BoxMullerSampler::seeded(42);
        let mut b = BoxMullerSampler::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.sample().to_bits(), b.sample().to_bits());
        }
    }

    #[test]
    fn test_fixed_sequence_wraps() {
        let mut seq = FixedSequence::new(vec![1.0, -1.0]);
        assert_eq!(seq.sample(), 1.0);
        assert_eq!(seq.sample(), -1.0);
        assert_eq!(seq.sample(), 1.0);
    }

    #[test]
    #[should_panic(expected = "at least one draw")]
    fn test_fixed_sequence_rejects_empty_draws() {
        let _ = FixedSequence::new(Vec::new());
    }

    #[test]
    fn test_sampler_kind_parsing() {
        assert_eq!("box-muller".parse::<SamplerKind>(), Ok(SamplerKind::BoxMuller));
        assert_eq!(" Ziggurat ".parse::<SamplerKind>(), Ok(SamplerKind::Ziggurat));
        assert_eq!("cached".parse::<SamplerKind>(), Ok(SamplerKind::BoxMullerCached));
        assert!("sobol".parse::<SamplerKind>().is_err());

        for kind in [
            SamplerKind::BoxMuller,
            SamplerKind::BoxMullerCached,
            SamplerKind::Ziggurat,
        ] {
            assert_eq!(kind.to_string().parse::<SamplerKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_built_samplers_honour_seed() {
        for kind in [
            SamplerKind::BoxMuller,
            SamplerKind::BoxMullerCached,
            SamplerKind::Ziggurat,
        ] {
            let mut a = kind.build(Some(9));
            let mut b = kind.build(Some(9));
            for _ in 0..10 {
                assert_eq!(a.sample().to_bits(), b.sample().to_bits());
            }
        }
    }
}
