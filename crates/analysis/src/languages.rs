use std::collections::HashMap;

use normalizer::{language_color, LanguageStat};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    color: String,
    size: u64,
}

/// Byte counts per language, kept in first-seen order so ranking ties
/// resolve the same way on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTally {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl LanguageTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `size` bytes. The first color seen for a language is kept.
    pub fn add(&mut self, name: &str, color: Option<String>, size: u64) {
        match self.index.get(name) {
            Some(&slot) => self.entries[slot].size += size,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push(Entry {
                    name: name.to_string(),
                    color: language_color(color),
                    size,
                });
            }
        }
    }

    pub fn merge(&mut self, other: LanguageTally) {
        for entry in other.entries {
            self.add(&entry.name, Some(entry.color), entry.size);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn size_of(&self, name: &str) -> Option<u64> {
        self.index.get(name).map(|&slot| self.entries[slot].size)
    }

    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|entry| entry.size).sum()
    }

    /// Largest first, cut to `limit`. Percentages are taken against the
    /// total of every language, not just the ones kept.
    pub fn into_ranked(self, limit: usize) -> Vec<LanguageStat> {
        let total = self.total_size();
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.size.cmp(&a.size));
        entries
            .into_iter()
            .take(limit)
            .map(|entry| LanguageStat {
                percentage: if total == 0 {
                    0.0
                } else {
                    entry.size as f64 / total as f64 * 100.0
                },
                name: entry.name,
                color: entry.color,
                size: entry.size,
            })
            .collect()
    }
}
