//! `word_list` — loading and preprocessing the candidate word list.
//!
//! The solver wants two things from its word list: deterministic ordered
//! iteration (candidate order when shuffling is off) and fast membership
//! lookup (validating completed crossing words). A [`WordSet`] provides
//! both by holding the words in a sorted set.
//!
//! Parsing logic:
//! - Input is split on whitespace, so one-word-per-line dictionaries such
//!   as `/usr/share/dict/words` work as-is.
//! - Every word is normalized to uppercase.
//! - Duplicates collapse (case-insensitively, since we uppercase first).
//!
//! `parse_from_str` works on any in-memory string; `load_from_path` is the
//! filesystem convenience wrapper around it.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use log::info;

/// A deduplicated, uppercase-normalized set of candidate words, held
/// sorted. Read-only during a solve; safe to share across every recursion
/// frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    words: BTreeSet<String>,
}

impl WordSet {
    /// Build a word set from any iterator of words, normalizing and
    /// deduplicating as it goes.
    pub fn from_words<I, S>(words: I) -> WordSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        WordSet { words }
    }

    /// Parse a raw word list from an in-memory string, one word per
    /// whitespace-separated token.
    pub fn parse_from_str(contents: &str) -> WordSet {
        WordSet::from_words(contents.split_whitespace())
    }

    /// Read and parse a word list file.
    ///
    /// # Errors
    /// Returns the underlying I/O error if the file cannot be read.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> io::Result<WordSet> {
        let contents = fs::read_to_string(&path)?;
        let word_set = WordSet::parse_from_str(&contents);
        info!(
            "loaded {} words from {}",
            word_set.len(),
            path.as_ref().display()
        );
        Ok(word_set)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Membership test. `word` must already be uppercase, which is how the
    /// engine produces completed-slot text.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Words in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a WordSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
