//! Keyword sentiment scoring.
//!
//! The degenerate single-category form of matching: count how many normalized
//! tokens fall in a positive and a negative marker set, and scale the
//! difference by the token count.

use crate::text;
use serde::Serialize;
use std::collections::HashSet;
use tracing::trace;

/// Default lower edge of the positive tone band.
pub const DEFAULT_POSITIVE_BAND: f64 = 0.03;
/// Default upper edge of the negative tone band.
pub const DEFAULT_NEGATIVE_BAND: f64 = -0.03;
/// Default upper edge of the strongly negative tier.
pub const DEFAULT_STRONG_NEGATIVE_BAND: f64 = -0.15;

/// Coarse reading of a sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Negative,
    Neutral,
    Positive,
}

/// Full result of a sentiment pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentiment {
    /// `(positive - negative) / max(1, tokens)`, rounded to 3 decimals.
    pub score: f64,
    pub tone: Tone,
    /// Score sits at or below the strong negative band.
    pub strong_negative: bool,
    pub positive: usize,
    pub negative: usize,
    pub tokens: usize,
}

/// Rounds to 3 decimal places, exact halves to even.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}

/// Scores text against fixed positive and negative marker sets.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    positive: HashSet<String>,
    negative: HashSet<String>,
    negative_band: f64,
    positive_band: f64,
    strong_negative_band: f64,
}

impl SentimentScorer {
    /// Creates a scorer with the default tone bands.
    ///
    /// Markers go through the same normalization as input text; a marker
    /// that normalizes to several tokens can never be hit and is dropped.
    pub fn new<P, N, S>(positive: P, negative: N) -> Self
    where
        P: IntoIterator<Item = S>,
        N: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            positive: Self::marker_set(positive),
            negative: Self::marker_set(negative),
            negative_band: DEFAULT_NEGATIVE_BAND,
            positive_band: DEFAULT_POSITIVE_BAND,
            strong_negative_band: DEFAULT_STRONG_NEGATIVE_BAND,
        }
    }

    /// Overrides the tone bands.
    pub fn with_bands(mut self, negative_band: f64, positive_band: f64) -> Self {
        self.negative_band = negative_band;
        self.positive_band = positive_band;
        self
    }

    pub fn with_strong_negative_band(mut self, band: f64) -> Self {
        self.strong_negative_band = band;
        self
    }

    fn marker_set<I, S>(markers: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        markers
            .into_iter()
            .map(|m| text::normalize(m.as_ref()))
            .filter(|m| !m.is_empty() && !m.contains(' '))
            .collect()
    }

    /// Sentiment score of `input`, rounded to 3 decimals.
    pub fn score(&self, input: &str) -> f64 {
        self.analyze(input).score
    }

    /// Tone band for an already computed score.
    pub fn tone(&self, score: f64) -> Tone {
        if score <= self.negative_band {
            Tone::Negative
        } else if score >= self.positive_band {
            Tone::Positive
        } else {
            Tone::Neutral
        }
    }

    /// Whether a negative score is deep enough to call for stronger guidance.
    pub fn is_strong_negative(&self, score: f64) -> bool {
        score <= self.strong_negative_band
    }

    pub fn analyze(&self, input: &str) -> Sentiment {
        let normalized = text::normalize(input);
        let tokens = text::tokenize(&normalized);

        let positive = tokens.iter().filter(|t| self.positive.contains(**t)).count();
        let negative = tokens.iter().filter(|t| self.negative.contains(**t)).count();
        let raw = (positive as f64 - negative as f64) / tokens.len().max(1) as f64;
        let score = round3(raw);

        trace!(positive, negative, tokens = tokens.len(), score, "Sentiment scored");

        Sentiment {
            score,
            tone: self.tone(score),
            strong_negative: self.is_strong_negative(score),
            positive,
            negative,
            tokens: tokens.len(),
        }
    }
}
