//! Grouping and summary-statistic helpers shared by the analyzers.
//!
//! Every grouping here preserves first-encounter order so that ties are
//! broken deterministically and serialized output never depends on hash
//! iteration order.

use crate::models::LabelCount;
use std::collections::HashMap;

/// Ordered occurrence counter.
///
/// Labels are kept in the order they were first seen.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    entries: Vec<LabelCount>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every label yielded by the iterator.
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tally = Self::new();
        for label in labels {
            tally.add(label);
        }
        tally
    }

    pub fn add(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(LabelCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, label: &str) -> usize {
        self.index
            .get(label)
            .map(|&i| self.entries[i].count)
            .unwrap_or(0)
    }

    /// The most frequent label; the earliest seen wins a tie.
    pub fn top(&self) -> Option<LabelCount> {
        let mut best: Option<&LabelCount> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.count > b.count) {
                best = Some(entry);
            }
        }
        best.cloned()
    }

    /// The `n` most frequent labels, descending, ties in encounter order.
    pub fn top_n(&self, n: usize) -> Vec<LabelCount> {
        let mut sorted = self.entries.clone();
        // sort_by_key is stable, so encounter order survives among equal counts
        sorted.sort_by_key(|e| std::cmp::Reverse(e.count));
        sorted.truncate(n);
        sorted
    }
}

/// Group items by a string key, preserving first-encounter order of keys
/// and original order within each group.
pub fn group_by_key<'a, T, F>(items: &'a [T], key: F) -> Vec<(String, Vec<&'a T>)>
where
    F: Fn(&T) -> &str,
{
    let mut groups: Vec<(String, Vec<&T>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let k = key(item);
        match index.get(k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(k.to_string(), groups.len());
                groups.push((k.to_string(), vec![item]));
            }
        }
    }

    groups
}

/// Arithmetic mean rounded to the nearest whole number; 0 for no values.
pub fn rounded_mean(values: impl IntoIterator<Item = f64>) -> u64 {
    let (sum, n) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, n), v| (sum + v, n + 1));

    if n == 0 {
        return 0;
    }

    (sum / n as f64).round() as u64
}

/// `part / whole` as a rounded percentage; 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Whether `part` is strictly more than `pct` percent of `whole`.
///
/// Evaluated with integer cross-multiplication; an empty whole is 0%.
pub fn share_exceeds(part: usize, whole: usize, pct: usize) -> bool {
    whole > 0 && part * 100 > whole * pct
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_top_breaks_ties_by_first_seen() {
        let tally = Tally::from_labels(["Nurse", "MA", "MA", "Nurse", "CHW"]);

        assert_eq!(tally.len(), 3);
        let top = tally.top().unwrap();
        assert_eq!(top.label, "Nurse");
        assert_eq!(top.count, 2);
    }

    #[test]
    fn test_tally_top_n_is_stable() {
        let tally = Tally::from_labels(["a", "b", "c", "c", "b", "d"]);
        let top = tally.top_n(3);

        let labels: Vec<_> = top.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "c", "a"]);
        assert_eq!(tally.count("c"), 2);
        assert_eq!(tally.count("missing"), 0);
    }

    #[test]
    fn test_empty_tally() {
        let tally = Tally::new();
        assert!(tally.is_empty());
        assert!(tally.top().is_none());
        assert!(tally.top_n(5).is_empty());
    }

    #[test]
    fn test_group_by_key_preserves_order() {
        let items = vec![("x", 1), ("y", 2), ("x", 3)];
        let groups = group_by_key(&items, |i| i.0);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "x");
        assert_eq!(groups[0].1.iter().map(|i| i.1).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(groups[1].0, "y");
    }

    #[test]
    fn test_rounded_mean() {
        assert_eq!(rounded_mean(Vec::<f64>::new()), 0);
        assert_eq!(rounded_mean([1.0, 2.0]), 2);
        assert_eq!(rounded_mean([46000.0]), 46000);
        assert_eq!(rounded_mean([10.0, 10.0, 11.0]), 10);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn test_share_exceeds() {
        assert!(share_exceeds(1, 1, 50));
        assert!(!share_exceeds(1, 2, 50));
        assert!(share_exceeds(2, 3, 50));
        assert!(!share_exceeds(3, 10, 30));
        assert!(share_exceeds(4, 10, 30));
        assert!(!share_exceeds(0, 0, 30));
    }
}
