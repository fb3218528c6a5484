//! Frequency Table Module
//! Category -> count tables produced by grouping a column.

use serde::Serialize;
use std::collections::HashMap;

/// One category and the number of rows carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Counts per distinct value, most frequent first.
///
/// Equal counts keep the order in which the values first appeared. Null cells are
/// not a category; they are tallied in `missing` so that `total() + missing` is the
/// number of rows counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    entries: Vec<CategoryCount>,
    missing: usize,
}

impl FrequencyTable {
    /// Count labels; `None` is a null cell.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<CategoryCount> = Vec::new();
        let mut missing = 0;

        for label in labels {
            let Some(label) = label else {
                missing += 1;
                continue;
            };
            let label = label.as_ref();
            match index.get(label) {
                Some(&pos) => entries[pos].count += 1,
                None => {
                    index.insert(label.to_string(), entries.len());
                    entries.push(CategoryCount {
                        value: label.to_string(),
                        count: 1,
                    });
                }
            }
        }

        // sort_by is stable: ties stay in appearance order
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries, missing }
    }

    pub fn entries(&self) -> &[CategoryCount] {
        &self.entries
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.count)
    }

    /// Sum of all category counts (nulls excluded).
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    pub fn missing(&self) -> usize {
        self.missing
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-order into `order`, filling absent categories with zero.
    ///
    /// Categories not listed in `order` are dropped.
    pub fn reindex(&self, order: &[&str]) -> FrequencyTable {
        let entries = order
            .iter()
            .map(|value| CategoryCount {
                value: value.to_string(),
                count: self.get(value).unwrap_or(0),
            })
            .collect();
        FrequencyTable {
            entries,
            missing: self.missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(table: &FrequencyTable) -> Vec<(&str, usize)> {
        table
            .entries()
            .iter()
            .map(|e| (e.value.as_str(), e.count))
            .collect()
    }

    #[test]
    fn most_frequent_first_with_stable_ties() {
        let table = FrequencyTable::from_labels(
            ["Chest", "Biceps", "Chest", "Abdominals", "Biceps", "Chest"]
                .into_iter()
                .map(Some),
        );
        assert_eq!(counts(&table), vec![("Chest", 3), ("Biceps", 2), ("Abdominals", 1)]);

        let tied = FrequencyTable::from_labels(["b", "a", "c", "a", "b"].into_iter().map(Some));
        assert_eq!(counts(&tied), vec![("b", 2), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn nulls_are_tallied_separately() {
        let table = FrequencyTable::from_labels(vec![Some("Beginner"), None, Some("Beginner"), None]);
        assert_eq!(table.total(), 2);
        assert_eq!(table.missing(), 2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn reindex_fills_zeros() {
        let table = FrequencyTable::from_labels(["Friday", "Monday", "Friday"].into_iter().map(Some));
        let week = table.reindex(&["Monday", "Tuesday", "Friday"]);
        assert_eq!(counts(&week), vec![("Monday", 1), ("Tuesday", 0), ("Friday", 2)]);
    }

    #[test]
    fn empty_input() {
        let table = FrequencyTable::from_labels(Vec::<Option<String>>::new());
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.get("anything"), None);
    }
}
