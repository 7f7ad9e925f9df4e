// Crack an MT19937 seed

use rayon::prelude::*;

use crate::{Error, Mt19937, Result};

/// How far back, in seconds, to look for the seed by default.
pub const DEFAULT_SEED_WINDOW: u32 = 10_000;

/// Find the seed used to generate the given random number.
/// We assume the MT19937 RNG was seeded with a monotonically increasing counter
/// (e.g., UNIX timestamp) and we assume the counter has increased by at most
/// `window` since the random number was generated.
pub fn break_time_dependent_mt19937_seed(
    target_random_number: u32,
    current_counter: u32,
    window: u32,
) -> Result<u32> {
    (0..=window)
        .into_par_iter()
        .filter_map(|elapsed| current_counter.checked_sub(elapsed))
        .find_first(|&candidate_seed| {
            Mt19937::new(candidate_seed).generate() == target_random_number
        })
        .ok_or(Error::KeyNotFound)
}
