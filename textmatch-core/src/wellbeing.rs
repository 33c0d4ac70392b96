//! Wellbeing screening for supportive chat.
//!
//! Combines crisis-phrase detection, theme detection and keyword sentiment
//! into a single [`Screening`], and maps sentiment onto a 0-10 mood scale.
//! Crisis and theme checks are plain substring tests on the lower-cased text,
//! so multi-word phrases such as "can't go on" are matched as written.

use crate::sentiment::{Sentiment, SentimentScorer};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Highest value on the mood scale.
pub const MOOD_MAX: u8 = 10;

/// A named group of trigger keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Theme {
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Detects crisis language by phrase containment.
#[derive(Debug, Clone, Default)]
pub struct CrisisScreen {
    phrases: Vec<String>,
}

impl CrisisScreen {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    pub fn is_crisis(&self, input: &str) -> bool {
        let lowered = input.to_lowercase();
        self.phrases.iter().any(|p| lowered.contains(p.as_str()))
    }
}

/// Reports which configured themes a text touches.
#[derive(Debug, Clone, Default)]
pub struct ThemeDetector {
    themes: Vec<Theme>,
}

impl ThemeDetector {
    pub fn new(themes: Vec<Theme>) -> Self {
        let themes = themes
            .into_iter()
            .map(|theme| Theme {
                keywords: theme
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
                name: theme.name,
            })
            .collect();
        Self { themes }
    }

    /// Theme names in configured order, each at most once.
    pub fn detect(&self, input: &str) -> Vec<String> {
        let lowered = input.to_lowercase();
        self.themes
            .iter()
            .filter(|theme| theme.keywords.iter().any(|k| lowered.contains(k.as_str())))
            .map(|theme| theme.name.clone())
            .collect()
    }
}

/// Maps a sentiment score (roughly `[-0.5, 0.5]`) onto `0..=10`.
///
/// Halves round to even, so `-0.25` maps to `2` and `0.25` to `8`.
pub fn mood_from_sentiment(score: f64) -> u8 {
    let mood = ((score + 0.5) * 10.0).round_ties_even();
    mood.clamp(0.0, f64::from(MOOD_MAX)) as u8
}

/// Running history of mood values for one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoodTracker {
    history: Vec<u8>,
}

impl MoodTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mood: u8) {
        self.history.push(mood.min(MOOD_MAX));
    }

    pub fn last(&self) -> Option<u8> {
        self.history.last().copied()
    }

    /// Mean mood rounded to one decimal, `None` before the first entry.
    pub fn average(&self) -> Option<f64> {
        if self.history.is_empty() {
            return None;
        }
        let sum: u32 = self.history.iter().map(|m| u32::from(*m)).sum();
        let mean = f64::from(sum) / self.history.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn history(&self) -> &[u8] {
        &self.history
    }
}

/// Result of screening one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screening {
    pub crisis: bool,
    pub sentiment: Sentiment,
    /// Empty when `crisis` is set.
    pub themes: Vec<String>,
    pub mood: u8,
}

/// Runs every wellbeing check over a message.
#[derive(Debug, Clone)]
pub struct Screener {
    crisis: CrisisScreen,
    themes: ThemeDetector,
    sentiment: SentimentScorer,
}

impl Screener {
    pub fn new(crisis: CrisisScreen, themes: ThemeDetector, sentiment: SentimentScorer) -> Self {
        Self {
            crisis,
            themes,
            sentiment,
        }
    }

    pub fn sentiment(&self) -> &SentimentScorer {
        &self.sentiment
    }

    pub fn screen(&self, input: &str) -> Screening {
        let sentiment = self.sentiment.analyze(input);
        let mood = mood_from_sentiment(sentiment.score);

        if self.crisis.is_crisis(input) {
            warn!("Crisis language detected");
            return Screening {
                crisis: true,
                sentiment,
                themes: Vec::new(),
                mood,
            };
        }

        let themes = self.themes.detect(input);
        debug!(score = sentiment.score, ?themes, mood, "Message screened");

        Screening {
            crisis: false,
            sentiment,
            themes,
            mood,
        }
    }

    /// Screens `input` and records its mood in `tracker`.
    pub fn screen_into(&self, input: &str, tracker: &mut MoodTracker) -> Screening {
        let screening = self.screen(input);
        tracker.record(screening.mood);
        screening
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Tone;

    fn screener() -> Screener {
        Screener::new(
            CrisisScreen::new(["want to die", "can't go on", "Self-Harm"]),
            ThemeDetector::new(vec![
                Theme::new("work", ["work", "boss"]),
                Theme::new("study", ["exam", "school"]),
                Theme::new("health", ["sleep"]),
            ]),
            SentimentScorer::new(["good", "calm"], ["anxious", "stressed", "sad"]),
        )
    }

    #[test]
    fn test_crisis_phrases_match_as_substrings() {
        let screen = CrisisScreen::new(["can't go on", "self-harm"]);
        assert!(screen.is_crisis("I feel like I CAN'T GO ON anymore"));
        assert!(screen.is_crisis("thinking about self-harm"));
        assert!(!screen.is_crisis("I can go on"));
    }

    #[test]
    fn test_blank_crisis_phrases_are_ignored() {
        let screen = CrisisScreen::new(["", "   "]);
        assert!(!screen.is_crisis("anything"));
    }

    #[test]
    fn test_themes_in_configured_order() {
        let detector = ThemeDetector::new(vec![
            Theme::new("work", ["work", "boss"]),
            Theme::new("study", ["exam"]),
        ]);
        assert_eq!(
            detector.detect("Exam week and my boss keeps calling about work"),
            vec!["work".to_string(), "study".to_string()]
        );
        assert!(detector.detect("nice weather").is_empty());
    }

    #[test]
    fn test_mood_mapping() {
        assert_eq!(mood_from_sentiment(0.0), 5);
        assert_eq!(mood_from_sentiment(-0.5), 0);
        assert_eq!(mood_from_sentiment(0.5), 10);
        assert_eq!(mood_from_sentiment(-0.9), 0);
        assert_eq!(mood_from_sentiment(3.0), 10);
        assert_eq!(mood_from_sentiment(-0.25), 2);
        assert_eq!(mood_from_sentiment(0.25), 8);
        assert_eq!(mood_from_sentiment(0.333), 8);
    }

    #[test]
    fn test_mood_tracker_summary() {
        let mut tracker = MoodTracker::new();
        assert_eq!(tracker.last(), None);
        assert_eq!(tracker.average(), None);

        tracker.record(4);
        tracker.record(7);
        tracker.record(7);
        assert_eq!(tracker.last(), Some(7));
        assert_eq!(tracker.average(), Some(6.0));
        assert_eq!(tracker.len(), 3);

        tracker.record(200);
        assert_eq!(tracker.last(), Some(MOOD_MAX));
    }

    #[test]
    fn test_screen_negative_message_with_theme() {
        let screening = screener().screen("I'm so anxious and stressed about my exam");
        assert!(!screening.crisis);
        assert_eq!(screening.themes, vec!["study".to_string()]);
        assert_eq!(screening.sentiment.tone, Tone::Negative);
        assert!(screening.mood < 5);
    }

    #[test]
    fn test_screen_crisis_short_circuits_themes() {
        let screening = screener().screen("work is awful and I want to die");
        assert!(screening.crisis);
        assert!(screening.themes.is_empty());
    }

    #[test]
    fn test_screen_into_records_mood() {
        let screener = screener();
        let mut tracker = MoodTracker::new();
        screener.screen_into("good calm day", &mut tracker);
        screener.screen_into("sad", &mut tracker);
        assert_eq!(tracker.history(), &[10, 0]);
        assert_eq!(tracker.average(), Some(5.0));
    }
}
