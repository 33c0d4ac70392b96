//! Best-match retrieval over a small, fixed reference catalog.
//!
//! A query is compared against every reference by cosine similarity of
//! term-frequency vectors built over a vocabulary shared by the query and the
//! catalog. The highest score wins; ties go to the earliest reference, and a
//! candidate is accepted only when its score reaches the confidence threshold.
//!
//! [`best_match`] rebuilds everything per call. [`Catalog`] tokenizes the
//! references once and only merges the query's tokens into the vocabulary on
//! each call; both return identical results.

use crate::text;
use crate::vector::{cosine_similarity, Vocabulary};
use serde::Serialize;
use tracing::{debug, trace};

/// Threshold used by callers that do not configure one.
pub const DEFAULT_THRESHOLD: f64 = 0.35;

/// Outcome of a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResult {
    /// No reference reached the threshold.
    NoMatch,
    /// Reference at `index` matched with similarity `score`.
    Match { index: usize, score: f64 },
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Match { index, .. } => Some(*index),
            Self::NoMatch => None,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Match { score, .. } => Some(*score),
            Self::NoMatch => None,
        }
    }
}

/// A [`MatchResult`] together with the best score seen.
///
/// `best_score` is reported even when it fell below the threshold so callers
/// can log how close the query came.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchReport {
    pub result: MatchResult,
    pub best_score: f64,
}

/// Picks the highest score, earliest index on ties.
///
/// A zero score is never selected, so a query sharing no token with any
/// reference is a `NoMatch` even at threshold `0.0`.
fn select_best<I>(scores: I, threshold: f64) -> MatchReport
where
    I: IntoIterator<Item = f64>,
{
    let mut best_index = None;
    let mut best_score = 0.0;

    for (index, score) in scores.into_iter().enumerate() {
        if score > best_score {
            best_score = score;
            best_index = Some(index);
        }
    }

    let result = match best_index {
        Some(index) if best_score >= threshold => MatchResult::Match {
            index,
            score: best_score,
        },
        _ => MatchResult::NoMatch,
    };

    MatchReport { result, best_score }
}

/// Finds the reference most similar to `query`.
///
/// The vocabulary and every vector are rebuilt for this call. Returns
/// `Match` when the best score is `>= threshold`.
///
/// # Example
///
/// ```
/// use textmatch_core::matcher::{best_match, MatchResult};
///
/// let faq = ["How do I track my order?", "What is the return policy?"];
/// let result = best_match("how can i track my order", &faq, 0.35);
/// assert_eq!(result.index(), Some(0));
///
/// assert_eq!(best_match("", &faq, 0.35), MatchResult::NoMatch);
/// ```
pub fn best_match<S: AsRef<str>>(query: &str, references: &[S], threshold: f64) -> MatchResult {
    let normalized = text::normalize(query);
    let query_tokens = text::tokenize(&normalized);

    let reference_texts: Vec<String> = references
        .iter()
        .map(|r| text::normalize(r.as_ref()))
        .collect();
    let reference_tokens: Vec<Vec<&str>> = reference_texts
        .iter()
        .map(|r| text::tokenize(r))
        .collect();

    let vocabulary = Vocabulary::build(&query_tokens, &reference_tokens);
    let query_vector = vocabulary.term_vector(&query_tokens);

    let scores = reference_tokens
        .iter()
        .map(|tokens| cosine_similarity(&query_vector, &vocabulary.term_vector(tokens)));

    select_best(scores, threshold).result
}

/// Immutable reference catalog with pre-tokenized entries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    references: Vec<String>,
    tokens: Vec<Vec<String>>,
    vocabulary: Vocabulary,
}

impl Catalog {
    pub fn new<I, S>(references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let references: Vec<String> = references.into_iter().map(Into::into).collect();
        let tokens: Vec<Vec<String>> = references.iter().map(|r| text::tokens(r)).collect();
        let vocabulary = Vocabulary::from_tokens(tokens.iter().flatten());

        debug!(
            references = references.len(),
            terms = vocabulary.len(),
            "Catalog built"
        );

        Self {
            references,
            tokens,
            vocabulary,
        }
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Reference text at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.references.get(index).map(String::as_str)
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// Similarity of `query` to every reference, in catalog order.
    pub fn scores(&self, query: &str) -> Vec<f64> {
        let query_tokens = text::tokens(query);
        let vocabulary = self.vocabulary.union(&query_tokens);
        let query_vector = vocabulary.term_vector(&query_tokens);

        self.tokens
            .iter()
            .enumerate()
            .map(|(index, tokens)| {
                let score = cosine_similarity(&query_vector, &vocabulary.term_vector(tokens));
                trace!(index, score, "Reference scored");
                score
            })
            .collect()
    }

    /// Best match for `query` plus the best score seen.
    pub fn evaluate(&self, query: &str, threshold: f64) -> MatchReport {
        let report = select_best(self.scores(query), threshold);
        debug!(
            query,
            threshold,
            best_score = report.best_score,
            matched = ?report.result.index(),
            "Catalog evaluated"
        );
        report
    }

    pub fn best_match(&self, query: &str, threshold: f64) -> MatchResult {
        self.evaluate(query, threshold).result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAQ: [&str; 2] = ["How do I track my order?", "What is the return policy?"];

    #[test]
    fn test_track_order_matches_first_entry() {
        match best_match("how can i track my order", &FAQ, DEFAULT_THRESHOLD) {
            MatchResult::Match { index, score } => {
                assert_eq!(index, 0);
                assert!(score >= 0.6, "score was {score}");
                assert!(score <= 1.0);
            }
            MatchResult::NoMatch => panic!("expected a match"),
        }
    }

    #[test]
    fn test_unrelated_query_is_no_match() {
        let catalog = ["How do I reset my password?"];
        assert_eq!(
            best_match("what is the weather today", &catalog, DEFAULT_THRESHOLD),
            MatchResult::NoMatch
        );
    }

    #[test]
    fn test_tie_goes_to_first_reference() {
        let catalog = ["order status", "order update"];
        let result = best_match("order", &catalog, 0.0);
        assert_eq!(result.index(), Some(0));

        let scores = Catalog::new(catalog).scores("order");
        assert_eq!(scores[0], scores[1]);
    }

    #[test]
    fn test_empty_query_never_matches() {
        for threshold in [0.0, 0.01, 0.35, 1.0] {
            assert_eq!(best_match("", &FAQ, threshold), MatchResult::NoMatch);
            assert_eq!(best_match("?!", &FAQ, threshold), MatchResult::NoMatch);
        }
    }

    #[test]
    fn test_empty_catalog_never_matches() {
        let empty: [&str; 0] = [];
        assert_eq!(best_match("track my order", &empty, 0.0), MatchResult::NoMatch);
        let report = Catalog::default().evaluate("track my order", 0.0);
        assert_eq!(report.result, MatchResult::NoMatch);
        assert_eq!(report.best_score, 0.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let catalog = ["order status"];
        let score = Catalog::new(catalog).scores("order")[0];
        assert!(score > 0.0);

        assert!(best_match("order", &catalog, score).is_match());
        assert!(!best_match("order", &catalog, score + 1e-9).is_match());
    }

    #[test]
    fn test_identical_text_scores_one() {
        let result = best_match("What is the return policy", &FAQ, 0.99);
        assert_eq!(result, MatchResult::Match { index: 1, score: 1.0 });
    }

    #[test]
    fn test_report_keeps_best_score_below_threshold() {
        let catalog = Catalog::new(FAQ);
        let report = catalog.evaluate("return", 0.9);
        assert_eq!(report.result, MatchResult::NoMatch);
        assert!(report.best_score > 0.0 && report.best_score < 0.9);
    }

    #[test]
    fn test_catalog_agrees_with_per_call_matching() {
        let references = [
            "What are your shipping times?",
            "How do I track my order?",
            "What is the return policy?",
            "How do I request a refund?",
            "How can I change my shipping address?",
            "How do I reset my password?",
        ];
        let catalog = Catalog::new(references);
        let queries = [
            "shipping address change",
            "I want a refund!!",
            "reset password",
            "",
            "zebra",
            "how do i",
            "What are your shipping times?",
        ];
        for query in queries {
            for threshold in [0.0, 0.2, 0.35, 0.8] {
                assert_eq!(
                    catalog.best_match(query, threshold),
                    best_match(query, &references, threshold),
                    "query {query:?} threshold {threshold}"
                );
            }
        }
    }

    #[test]
    fn test_scores_are_bounded() {
        let catalog = Catalog::new(FAQ);
        for query in ["order order order", "the the", "#123 @me", "What is the return policy?"] {
            for score in catalog.scores(query) {
                assert!((0.0..=1.0).contains(&score));
            }
        }
    }

    #[test]
    fn test_catalog_accessors() {
        let catalog = Catalog::new(FAQ);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get(1), Some("What is the return policy?"));
        assert_eq!(catalog.get(2), None);
    }

    #[test]
    fn test_match_result_serializes_with_kind_tag() {
        let json = serde_json::to_value(MatchResult::Match { index: 3, score: 0.5 }).unwrap();
        assert_eq!(json["kind"], "match");
        assert_eq!(json["index"], 3);
        let json = serde_json::to_value(MatchResult::NoMatch).unwrap();
        assert_eq!(json["kind"], "no_match");
    }
}
