//! Utility functions for random number generation and vote arithmetic.

use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Fast RNG suitable for no_std environments.
pub type FastRng = Xoshiro256PlusPlus;

/// # Overview
///
/// Creates a fast RNG seeded from a u64 value.
///
/// # Examples
///
/// ```
/// use tsetlin_pairwise::utils::rng_from_seed;
///
/// let mut rng = rng_from_seed(42);
/// ```
#[inline]
pub fn rng_from_seed(seed: u64) -> FastRng {
    use rand::SeedableRng;
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// # Overview
///
/// Creates a fast RNG with entropy from thread-local RNG.
///
/// # Examples
///
/// ```
/// use tsetlin_pairwise::utils::rng_from_entropy;
///
/// let mut rng = rng_from_entropy();
/// ```
#[cfg(feature = "std")]
#[inline]
pub fn rng_from_entropy() -> FastRng {
    use rand::SeedableRng;
    Xoshiro256PlusPlus::from_rng(&mut rand::rng())
}

/// # Overview
///
/// Performs a Bernoulli trial with given probability.
///
/// `probability <= 0` never succeeds, `probability >= 1` always does.
#[inline]
pub fn bernoulli<R: Rng>(rng: &mut R, probability: f64) -> bool {
    rng.random::<f64>() < probability
}

/// # Overview
///
/// Shuffles a slice in-place using Fisher-Yates algorithm.
#[inline]
pub fn shuffle<T, R: Rng>(slice: &mut [T], rng: &mut R) {
    let len = slice.len();
    for i in (1..len).rev() {
        let j = rng.random_range(0..=i as u64) as usize;
        slice.swap(i, j);
    }
}

/// # Overview
///
/// Clamps a vote sum to `[-t, t]`.
///
/// # Examples
///
/// ```
/// use tsetlin_pairwise::utils::clip_margin;
///
/// assert_eq!(clip_margin(42, 10), 10);
/// assert_eq!(clip_margin(-42, 10), -10);
/// assert_eq!(clip_margin(3, 10), 3);
/// ```
#[inline]
pub fn clip_margin(votes: i32, t: i32) -> i32 {
    votes.clamp(-t, t)
}

/// # Overview
///
/// Index of the first maximum. Ties resolve to the lowest index; an empty
/// slice yields 0.
///
/// # Examples
///
/// ```
/// use tsetlin_pairwise::utils::argmax;
///
/// assert_eq!(argmax(&[3, 3, 1]), 0);
/// assert_eq!(argmax(&[1, 5, 5]), 1);
/// ```
#[inline]
pub fn argmax(values: &[i32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
