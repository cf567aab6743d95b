use std::cmp::Reverse;

use crate::types::{FrequencyTable, RankedList, RankedWord};

pub const DEFAULT_TOP_N: usize = 10;

/// The `n` most frequent words, highest count first.
///
/// Equal counts are ordered alphabetically so repeated runs print the same chart.
pub fn top_n(table: &FrequencyTable, n: usize) -> RankedList {
    if n == 0 {
        return Vec::new();
    }
    let mut words: Vec<(&str, usize)> = table.iter().collect();
    words.sort_unstable_by_key(|&(word, count)| (Reverse(count), word));
    words.truncate(n);
    words
        .into_iter()
        .map(|(word, count)| RankedWord { word: word.to_string(), count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, usize)]) -> FrequencyTable {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    fn flat(list: &RankedList) -> Vec<(&str, usize)> {
        list.iter().map(|r| (r.word.as_str(), r.count)).collect()
    }

    #[test]
    fn takes_highest_counts() {
        let t = table(&[("a", 3), ("b", 2), ("c", 1)]);
        assert_eq!(flat(&top_n(&t, 2)), vec![("a", 3), ("b", 2)]);
    }

    #[test]
    fn n_larger_than_table_returns_everything_sorted() {
        let t = table(&[("c", 1), ("a", 5), ("b", 2)]);
        assert_eq!(flat(&top_n(&t, 10)), vec![("a", 5), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn zero_returns_empty() {
        let t = table(&[("a", 1)]);
        assert!(top_n(&t, 0).is_empty());
        assert!(top_n(&FrequencyTable::default(), 5).is_empty());
    }

    #[test]
    fn ties_are_alphabetical() {
        let t = table(&[("pear", 2), ("apple", 2), ("fig", 7), ("kiwi", 2)]);
        assert_eq!(
            flat(&top_n(&t, 3)),
            vec![("fig", 7), ("apple", 2), ("kiwi", 2)]
        );
    }

    #[test]
    fn length_is_min_of_n_and_size() {
        let t = table(&[("a", 4), ("b", 3), ("c", 2), ("d", 1)]);
        for n in 0..6 {
            let ranked = top_n(&t, n);
            assert_eq!(ranked.len(), n.min(t.len()));
            assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
        }
    }
}
