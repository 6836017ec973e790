use std::cmp::Ordering;
use std::collections::HashMap;

use crate::stats::RankedEntry;

/// The `n` keys with the highest counts, highest first.
///
/// Equal counts are ordered by key ascending, so the result does not depend
/// on the map's iteration order.
pub fn get_top_n(counts: &HashMap<String, u64>, n: usize) -> Vec<RankedEntry> {
    ranked(counts, n, |a, b| b.cmp(&a))
}

/// The `n` keys with the lowest counts, lowest first. Ties as in [`get_top_n`].
pub fn get_bottom_n(counts: &HashMap<String, u64>, n: usize) -> Vec<RankedEntry> {
    ranked(counts, n, |a, b| a.cmp(&b))
}

fn ranked(
    counts: &HashMap<String, u64>,
    n: usize,
    by_count: impl Fn(u64, u64) -> Ordering,
) -> Vec<RankedEntry> {
    if n == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(&String, u64)> = counts.iter().map(|(k, &c)| (k, c)).collect();
    entries.sort_unstable_by(|a, b| by_count(a.1, b.1).then_with(|| a.0.cmp(b.0)));

    entries
        .into_iter()
        .take(n)
        .map(|(key, count)| RankedEntry {
            key: key.clone(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(k, c)| (k.to_string(), *c)).collect()
    }

    fn keys(entries: &[RankedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_top_n_sorted_descending() {
        let map = counts(&[("/a", 10), ("/b", 30), ("/c", 20)]);
        let top2 = get_top_n(&map, 2);
        assert_eq!(
            top2,
            vec![
                RankedEntry { key: "/b".into(), count: 30 },
                RankedEntry { key: "/c".into(), count: 20 },
            ]
        );
    }

    #[test]
    fn test_top_n_boundaries() {
        assert!(get_top_n(&HashMap::new(), 5).is_empty());

        let map = counts(&[("/a", 1), ("/b", 2)]);
        assert!(get_top_n(&map, 0).is_empty());
        assert_eq!(get_top_n(&map, 10).len(), 2);
    }

    #[test]
    fn test_ties_break_by_key() {
        let map = counts(&[("/z", 5), ("/m", 5), ("/a", 5), ("/top", 9)]);
        assert_eq!(keys(&get_top_n(&map, 4)), vec!["/top", "/a", "/m", "/z"]);
    }

    #[test]
    fn test_top_n_is_repeatable_and_non_mutating() {
        let map = counts(&[("x", 3), ("y", 3), ("z", 1), ("w", 7)]);
        let before = map.clone();
        let first = get_top_n(&map, 3);
        let second = get_top_n(&map, 3);
        assert_eq!(first, second);
        assert_eq!(map, before);
    }

    #[test]
    fn test_bottom_n_sorted_ascending() {
        let map = counts(&[("/a", 10), ("/b", 30), ("/c", 20), ("/d", 10)]);
        assert_eq!(keys(&get_bottom_n(&map, 3)), vec!["/a", "/d", "/c"]);
        assert!(get_bottom_n(&map, 0).is_empty());
    }
}
