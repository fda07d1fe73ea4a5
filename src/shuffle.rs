//! Shuffle engine: uniform permutation with a bounded retry heuristic
//! that avoids orders looking too much like the previous one.

use std::time::SystemTime;

use crate::config::ShuffleSettings;

/// Small xorshift64* generator.
///
/// Good enough for shuffling a standup roster, and seedable so tests are
/// deterministic. Seeded from system time in production.
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Seed from the system clock
    pub fn from_entropy() -> Self {
        let seed = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9e37_79b9_7f4a_7c15);
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        // xorshift gets stuck on an all-zero state
        Self {
            state: seed | 0x1,
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Index in `0..n`. Caller guarantees n > 0.
    fn next_below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

/// Count slots where the candidate kept the original entry.
///
/// Entries compare by display name, so duplicates that swap places still
/// count as fixed points.
pub fn fixed_points(original: &[String], candidate: &[String]) -> usize {
    original
        .iter()
        .zip(candidate.iter())
        .filter(|(a, b)| a == b)
        .count()
}

/// Fisher-Yates, in place
fn permute(names: &mut [String], rng: &mut Rng) {
    for i in (1..names.len()).rev() {
        let j = rng.next_below(i + 1);
        names.swap(i, j);
    }
}

/// Produce a new order for `names`.
///
/// Retries while more than `max_fixed_ratio` of the entries land in their
/// original position, up to `max_attempts` attempts total. The last attempt
/// is accepted no matter how it looks; this is best-effort de-biasing, not
/// a derangement guarantee. Lists shorter than two entries come back as-is.
pub fn shuffled(names: &[String], rng: &mut Rng, settings: &ShuffleSettings) -> Vec<String> {
    if names.len() < 2 {
        return names.to_vec();
    }

    let max_attempts = settings.max_attempts.max(1);
    let limit = settings.max_fixed_ratio * names.len() as f64;

    let mut candidate = names.to_vec();
    for attempt in 1..=max_attempts {
        permute(&mut candidate, rng);
        let fixed = fixed_points(names, &candidate);
        if fixed as f64 <= limit {
            break;
        }
        tracing::debug!(
            "shuffle attempt {} left {} of {} entries in place",
            attempt,
            fixed,
            names.len()
        );
    }
    candidate
}
