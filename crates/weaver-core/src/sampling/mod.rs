//! Seeded item selection. Every draw builds its own generator from the seed string, so no
//! random state is shared between unrelated picks.

mod history;
mod picker;
mod store;

pub use history::{HistoryPolicy, UsageHistory, UsageRecord};
pub use picker::{DailyPick, DailyPicker};
pub use store::{HistoryError, HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore};

use std::collections::HashSet;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use tracing::warn;

/// Stable 64-bit seed derived from the first eight bytes of the SHA-256 digest.
pub fn seed_from_str(seed: &str) -> u64 {
    let digest = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Seed string for the pick of `key` on `date`.
pub fn daily_seed(date: NaiveDate, key: &str) -> String {
    format!("{}:{}", date.format("%Y-%m-%d"), key)
}

fn draw_index(seed: &str, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let mut rng = StdRng::seed_from_u64(seed_from_str(seed));
    Some(rng.gen_range(0..len))
}

/// Picks one item of `pool`. Same seed and pool always give the same item.
pub fn sample<'a, T>(seed: &str, pool: &'a [T]) -> Option<&'a T> {
    draw_index(seed, pool.len()).map(|index| &pool[index])
}

/// Outcome of a history-aware draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample<'a, T> {
    pub item: &'a T,
    /// Every item was recently used, so the draw went over the unfiltered pool.
    pub fallback: bool,
}

/// Draws from the items of `pool` not in `recent`, or from the whole pool when that
/// leaves nothing.
pub fn sample_with_history<'a, T>(
    seed: &str,
    pool: &'a [T],
    recent: &HashSet<String>,
) -> Option<Sample<'a, T>>
where
    T: AsRef<str>,
{
    let candidates: Vec<&'a T> = pool
        .iter()
        .filter(|item| !recent.contains(item.as_ref()))
        .collect();

    if candidates.is_empty() {
        let item = sample(seed, pool)?;
        warn!(
            seed,
            pool = pool.len(),
            "every pooled item was used recently; drawing from the full pool"
        );
        return Some(Sample {
            item,
            fallback: true,
        });
    }

    let index = draw_index(seed, candidates.len())?;
    Some(Sample {
        item: candidates[index],
        fallback: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn pool() -> Vec<String> {
        vec![
            "밤편지".to_string(),
            "야생화".to_string(),
            "좋은 날".to_string(),
        ]
    }

    #[test]
    fn same_seed_same_item() {
        let pool = pool();
        let first = sample("2025-03-14:평온", &pool).expect("pool not empty");
        for _ in 0..20 {
            assert_eq!(sample("2025-03-14:평온", &pool), Some(first));
        }
    }

    #[test]
    fn seed_derivation_is_stable() {
        assert_eq!(seed_from_str("2025-03-14"), seed_from_str("2025-03-14"));
        assert_ne!(seed_from_str("2025-03-14"), seed_from_str("2025-03-15"));
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let empty: Vec<String> = Vec::new();
        assert!(sample("seed", &empty).is_none());
        assert!(sample_with_history("seed", &empty, &HashSet::new()).is_none());
    }

    #[test]
    fn distinct_seeds_spread_roughly_uniformly() {
        let pool = pool();
        let draws = 3000;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for i in 0..draws {
            let item = sample(&format!("seed-{i}"), &pool).expect("pool not empty");
            *counts.entry(item.as_str()).or_default() += 1;
        }

        assert_eq!(counts.len(), pool.len());
        for count in counts.values() {
            assert!(
                (850..=1150).contains(count),
                "expected ~1000 draws per item, got {count}"
            );
        }
    }

    #[test]
    fn history_filter_never_returns_recent_items() {
        let pool = pool();
        let recent: HashSet<String> = ["밤편지", "야생화"].iter().map(|s| s.to_string()).collect();
        for i in 0..200 {
            let drawn = sample_with_history(&format!("day-{i}"), &pool, &recent)
                .expect("pool not empty");
            assert_eq!(drawn.item, "좋은 날");
            assert!(!drawn.fallback);
        }
    }

    #[test]
    fn history_filter_falls_back_when_everything_was_used() {
        let pool = pool();
        let recent: HashSet<String> = pool.iter().cloned().collect();
        let drawn = sample_with_history("2025-03-14", &pool, &recent).expect("falls back");

        assert!(drawn.fallback);
        assert_eq!(Some(drawn.item), sample("2025-03-14", &pool));
    }
}
