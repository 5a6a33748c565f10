//! Seed selection for the command-line front ends. The library itself never reads the clock.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    /// `--seed` when given, otherwise a fresh runtime seed.
    pub fn resolve(cli_seed: Option<u64>) -> Self {
        cli_seed.map_or_else(|| Self::Generated(runtime_seed()), Self::Cli)
    }

    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            Self::Cli(_) => "cli",
            Self::Generated(_) => "generated",
        }
    }
}

static RUNTIME_SEEDS_ISSUED: AtomicU64 = AtomicU64::new(0);

/// Wall-clock nanoseconds, process id and a per-process counter, finalized with splitmix64.
pub fn runtime_seed() -> u64 {
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_nanos());
    let issued = RUNTIME_SEEDS_ISSUED.fetch_add(1, Ordering::Relaxed);
    let folded_nanos = (nanos as u64) ^ ((nanos >> 64) as u64);
    splitmix64(folded_nanos ^ u64::from(process::id()).rotate_left(17) ^ issued.rotate_left(7))
}

fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_seed_is_kept() {
        let choice = SeedChoice::resolve(Some(4_242));
        assert_eq!(choice, SeedChoice::Cli(4_242));
        assert_eq!(choice.value(), 4_242);
        assert_eq!(choice.source(), "cli");
    }

    #[test]
    fn absent_seed_is_generated() {
        let choice = SeedChoice::resolve(None);
        assert!(matches!(choice, SeedChoice::Generated(_)));
        assert_eq!(choice.source(), "generated");
    }

    #[test]
    fn consecutive_runtime_seeds_differ() {
        assert_ne!(runtime_seed(), runtime_seed());
    }
}
