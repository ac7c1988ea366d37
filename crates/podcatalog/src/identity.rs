//! Identifier normalization and dedup helpers shared by both flows.
//!
//! The legacy matching schema stores "no identifier" as either `NULL` or `0`.
//! Everything in this crate funnels raw identifiers through [`known_id`] so the
//! two are treated identically.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Normalizes a raw external identifier: `None` and `0` both mean absent.
pub fn known_id(raw: Option<i64>) -> Option<i64> {
    raw.filter(|id| *id != 0)
}

/// Returns the first known identifier in precedence order.
pub fn coalesce_ids<I>(candidates: I) -> Option<i64>
where
    I: IntoIterator<Item = Option<i64>>,
{
    candidates.into_iter().find_map(known_id)
}

/// Returns the first candidate that is non-empty after trimming, trimmed.
pub fn first_non_blank<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Set of external identifiers already emitted during one crawl run.
///
/// Owned by a single crawl; never shared between runs.
#[derive(Debug, Default)]
pub struct SeenIds {
    ids: HashSet<i64>,
}

impl SeenIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id` and returns `true` on its first sighting.
    pub fn first_sighting(&mut self, id: i64) -> bool {
        self.ids.insert(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Keeps exactly one item per partition key: the one with the smallest order key.
///
/// Output is sorted by order key so the result does not depend on input order.
pub fn first_per_key<T, K, O, FK, FO>(items: Vec<T>, partition: FK, order: FO) -> Vec<T>
where
    K: Eq + Hash,
    O: Ord + Copy,
    FK: Fn(&T) -> K,
    FO: Fn(&T) -> O,
{
    let mut winners: HashMap<K, T> = HashMap::new();
    for item in items {
        let key = partition(&item);
        match winners.get(&key) {
            Some(current) if order(current) <= order(&item) => {}
            _ => {
                winners.insert(key, item);
            }
        }
    }

    let mut kept: Vec<T> = winners.into_values().collect();
    kept.sort_by_key(|item| order(item));
    kept
}
