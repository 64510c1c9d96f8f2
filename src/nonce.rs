use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NONCE_MIN: u32 = 1;
const NONCE_MAX: u32 = 99_999_999;

/// The nonce and timestamp sent with one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub nonce: String,
    pub timestamp: String,
}

/// Nonce source seeded once per client.
#[derive(Debug, Clone)]
pub struct NonceGenerator {
    rng: StdRng,
}

impl NonceGenerator {
    pub fn new() -> Self {
        NonceGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Returns an 8-digit zero-padded decimal in `[1, 99999999]`.
    pub fn generate(&mut self) -> String {
        format!("{:08}", self.rng.gen_range(NONCE_MIN..=NONCE_MAX))
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds since the Unix epoch, rounded up.
pub fn timestamp_now() -> u64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    ceil_secs(elapsed)
}

fn ceil_secs(elapsed: Duration) -> u64 {
    if elapsed.subsec_nanos() > 0 {
        elapsed.as_secs() + 1
    } else {
        elapsed.as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_format() {
        let mut generator = NonceGenerator::new();
        for _ in 0..1000 {
            let nonce = generator.generate();
            assert_eq!(nonce.len(), 8);
            assert!(nonce.bytes().all(|b| b.is_ascii_digit()));
            let value: u32 = nonce.parse().unwrap();
            assert!((NONCE_MIN..=NONCE_MAX).contains(&value));
        }
    }

    #[test]
    fn timestamp_is_ceiling_of_now() {
        let before = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
        let ts = timestamp_now();
        let after = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();

        if ceil_secs(before) == ceil_secs(after) {
            assert_eq!(ts, ceil_secs(before));
        } else {
            // the clock crossed a whole second between the reads
            assert!(ts == ceil_secs(before) || ts == ceil_secs(after));
        }
    }

    #[test]
    fn partial_seconds_round_up() {
        assert_eq!(ceil_secs(Duration::new(1_700_000_000, 0)), 1_700_000_000);
        assert_eq!(ceil_secs(Duration::new(1_700_000_000, 1)), 1_700_000_001);
        assert_eq!(ceil_secs(Duration::new(1_700_000_000, 999_999_999)), 1_700_000_001);
    }
}
