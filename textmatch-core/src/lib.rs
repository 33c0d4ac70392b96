//! textmatch-core - Term-overlap text matching
//!
//! Provides the building blocks for small, rule-driven chat assistants:
//! - Text normalization and tokenization
//! - Cosine similarity over per-query term-frequency vectors
//! - Best-match FAQ retrieval with a confidence threshold
//! - Keyword sentiment scoring and wellbeing screening
//! - Rule-based customer-service intent routing
//! - Configuration management
//!
//! ## Primary API
//!
//! Most callers start from [`Config`] and build a [`Catalog`],
//! [`IntentRouter`] or [`Screener`] from it. [`best_match`] is available for
//! one-off matching without a catalog.

// Public modules
pub mod config;
pub mod intent;
pub mod lexicon;
pub mod matcher;
pub mod sentiment;
pub mod text;
pub mod vector;
pub mod wellbeing;

// Public exports
pub use config::{Config, ConfigError, FaqEntry};
pub use intent::{Intent, IntentError, IntentRouter};
pub use matcher::{best_match, Catalog, MatchReport, MatchResult, DEFAULT_THRESHOLD};
pub use sentiment::{Sentiment, SentimentScorer, Tone};
pub use text::{normalize, tokenize};
pub use vector::{cosine_similarity, TermVector, Vocabulary};
pub use wellbeing::{
    mood_from_sentiment, CrisisScreen, MoodTracker, Screener, Screening, Theme, ThemeDetector,
};
