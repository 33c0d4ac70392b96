//! Vocabulary construction, term-frequency vectors and cosine similarity.

use std::collections::{BTreeMap, BTreeSet};

/// Sorted set of distinct tokens, each mapped to its vector position.
///
/// Positions follow the lexicographic order of the tokens, which only serves
/// to make vector indices deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: BTreeMap<String, usize>,
}

impl Vocabulary {
    fn from_set(set: BTreeSet<String>) -> Self {
        let terms = set
            .into_iter()
            .enumerate()
            .map(|(position, term)| (term, position))
            .collect();
        Self { terms }
    }

    /// Builds a vocabulary from any stream of tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_set(tokens.into_iter().map(|t| t.as_ref().to_owned()).collect())
    }

    /// Builds the shared vocabulary of a query and every reference sequence.
    pub fn build<S, R>(query: &[S], references: &[R]) -> Self
    where
        S: AsRef<str>,
        R: AsRef<[S]>,
    {
        let tokens = query
            .iter()
            .chain(references.iter().flat_map(|r| r.as_ref().iter()));
        Self::from_tokens(tokens)
    }

    /// Returns a new vocabulary holding these terms plus `extra`.
    pub fn union<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: BTreeSet<String> = self.terms.keys().cloned().collect();
        set.extend(extra.into_iter().map(|t| t.as_ref().to_owned()));
        Self::from_set(set)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Vector position of `term`, if present.
    pub fn position(&self, term: &str) -> Option<usize> {
        self.terms.get(term).copied()
    }

    /// Terms in vector order.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.keys().map(String::as_str)
    }

    /// Counts every vocabulary term in `tokens`.
    ///
    /// Tokens outside the vocabulary are ignored.
    pub fn term_vector<S: AsRef<str>>(&self, tokens: &[S]) -> TermVector {
        let mut counts = vec![0u32; self.terms.len()];
        for token in tokens {
            if let Some(position) = self.position(token.as_ref()) {
                counts[position] += 1;
            }
        }
        TermVector { counts }
    }
}

/// Per-term occurrence counts over a [`Vocabulary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermVector {
    counts: Vec<u32>,
}

impl TermVector {
    pub fn new(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }

    /// Dot product; zero when lengths differ.
    pub fn dot(&self, other: &TermVector) -> u64 {
        if self.counts.len() != other.counts.len() {
            return 0;
        }
        self.counts
            .iter()
            .zip(other.counts.iter())
            .map(|(a, b)| u64::from(*a) * u64::from(*b))
            .sum()
    }

    pub fn norm_squared(&self) -> u64 {
        self.counts.iter().map(|c| u64::from(*c) * u64::from(*c)).sum()
    }

    pub fn norm(&self) -> f64 {
        (self.norm_squared() as f64).sqrt()
    }
}

/// Cosine similarity of two term vectors, in `[0, 1]`.
///
/// Returns `0.0` when either vector has zero norm or the lengths differ.
/// The denominator is taken as `sqrt(|u|² · |v|²)` so a vector compared with
/// itself scores exactly `1.0`.
pub fn cosine_similarity(u: &TermVector, v: &TermVector) -> f64 {
    if u.len() != v.len() {
        return 0.0;
    }
    let nu = u.norm_squared();
    let nv = v.norm_squared();
    if nu == 0 || nv == 0 {
        return 0.0;
    }
    let similarity = u.dot(v) as f64 / ((nu as f64) * (nv as f64)).sqrt();
    similarity.clamp(0.0, 1.0)
}
