//! Pure rating aggregation.
//!
//! Ratings live on the document as a principal-id → value mapping; the
//! derived `count`/`avg` pair is re-derived from that mapping on every
//! mutation instead of being maintained incrementally, so the aggregates
//! can never drift from the authoritative entries.

use std::collections::BTreeMap;

/// Derived aggregate over a document's ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    /// Number of distinct principals that rated.
    pub count: u32,
    /// Mean rating rounded to 2 decimals, `0.0` when `count` is zero.
    pub avg: f64,
}

/// Aggregates a ratings mapping into its derived summary.
///
/// No side effects; callers persist the result alongside the mapping in
/// the same mutation.
#[must_use]
pub fn aggregate(ratings: &BTreeMap<String, u8>) -> RatingSummary {
    let count = ratings.len() as u32;
    if count == 0 {
        return RatingSummary { count: 0, avg: 0.0 };
    }

    let total: u32 = ratings.values().map(|v| u32::from(*v)).sum();
    let avg = (f64::from(total) / f64::from(count) * 100.0).round() / 100.0;

    RatingSummary { count, avg }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(entries: &[(&str, u8)]) -> BTreeMap<String, u8> {
        entries
            .iter()
            .map(|(id, value)| (id.to_string(), *value))
            .collect()
    }

    #[test]
    fn empty_mapping_aggregates_to_zero() {
        let summary = aggregate(&BTreeMap::new());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg, 0.0);
    }

    #[test]
    fn single_rating() {
        let summary = aggregate(&ratings(&[("a", 4)]));
        assert_eq!(summary.count, 1);
        assert_eq!(summary.avg, 4.0);
    }

    #[test]
    fn mean_rounds_to_two_decimals() {
        // 4 + 5 + 5 = 14, 14 / 3 = 4.666... -> 4.67
        let summary = aggregate(&ratings(&[("a", 4), ("b", 5), ("c", 5)]));
        assert_eq!(summary.count, 3);
        assert_eq!(summary.avg, 4.67);

        // 1 + 2 = 3, 3 / 2 = 1.5
        let summary = aggregate(&ratings(&[("a", 1), ("b", 2)]));
        assert_eq!(summary.avg, 1.5);
    }

    #[test]
    fn one_entry_per_principal() {
        let mut map = ratings(&[("a", 3)]);
        map.insert("a".into(), 5);

        let summary = aggregate(&map);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.avg, 5.0);
    }
}
