use std::sync::Mutex;
use std::sync::OnceLock;
use std::sync::PoisonError;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Number of distinct values a single draw from the generator can take.
const DRAW_RANGE: u128 = 1 << 64;

/// Uniform integer generator used to seed boards.
///
/// Not suitable for anything security related.
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from the wall clock
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();

        debug!(seed, "Seeding random source");

        Self::from_seed(seed)
    }

    /// A full range draw
    pub fn random(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Returns a value in `0..n`, every value equally likely.
    ///
    /// Draws that land at or above the largest multiple of `n` fitting in the draw range are
    /// thrown away, otherwise the low values would come up more often than the high ones.
    ///
    /// # Panics
    ///
    /// If `n == 0`.
    pub fn uniform(&mut self, n: u64) -> u64 {
        assert!(n > 0, "uniform range must be non-empty");

        let n = n as u128;
        let limit = DRAW_RANGE - DRAW_RANGE % n;

        loop {
            let draw = self.random() as u128;
            if draw < limit {
                return (draw % n) as u64;
            }
        }
    }
}

fn shared() -> &'static Mutex<RandomSource> {
    static SOURCE: OnceLock<Mutex<RandomSource>> = OnceLock::new();
    SOURCE.get_or_init(|| Mutex::new(RandomSource::from_time()))
}

/// A full range draw from the process-wide source, which is seeded on first use.
pub fn random() -> u64 {
    shared()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .random()
}

/// Like [`RandomSource::uniform`], but drawing from the process-wide source.
pub fn uniform(n: u64) -> u64 {
    shared()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .uniform(n)
}
