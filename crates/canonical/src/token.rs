//! Tokenizers used by the similarity layer.
//!
//! All three strategies are pure functions of their input. They do not
//! normalize case or whitespace; callers run [`normalize`](crate::normalize)
//! first when they want that. Tokenizing `""` yields an empty result and no
//! input can make them fail.

use std::collections::BTreeSet;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// An ordered token sequence.
///
/// Thin wrapper over `Vec<T>` that derefs to a slice and iterates by
/// reference, which is what generic sequence metrics expect.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TokenSeq<T>(Vec<T>);

impl<T> TokenSeq<T> {
    pub fn new(tokens: Vec<T>) -> Self {
        Self(tokens)
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for TokenSeq<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<'a, T> IntoIterator for &'a TokenSeq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T> FromIterator<T> for TokenSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Splits `text` into its characters.
pub fn char_tokens(text: &str) -> TokenSeq<char> {
    text.chars().collect()
}

/// Splits `text` on Unicode whitespace, keeping order and duplicates.
pub fn word_tokens(text: &str) -> TokenSeq<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Distinct whitespace-delimited words of `text`.
///
/// A `BTreeSet` keeps iteration order independent of hashing.
pub fn unique_word_tokens(text: &str) -> BTreeSet<String> {
    text.split_whitespace().map(str::to_string).collect()
}
