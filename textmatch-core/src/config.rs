use crate::lexicon;
use crate::matcher::{Catalog, DEFAULT_THRESHOLD};
use crate::sentiment::{
    SentimentScorer, DEFAULT_NEGATIVE_BAND, DEFAULT_POSITIVE_BAND, DEFAULT_STRONG_NEGATIVE_BAND,
};
use crate::wellbeing::{CrisisScreen, Screener, Theme, ThemeDetector};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration for every matcher in the crate.
///
/// Every section falls back to its defaults when omitted, so an empty YAML
/// document is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub matcher: MatcherConfig,
    pub faq: Vec<FaqEntry>,
    pub sentiment: SentimentConfig,
    pub wellbeing: WellbeingConfig,
}

/// Settings for FAQ retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Minimum similarity for a match, inclusive.
    pub threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// One canned question and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Marker sets and tone bands for keyword sentiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    /// Scores at or below this read as negative.
    pub negative_band: f64,
    /// Scores at or above this read as positive.
    pub positive_band: f64,
    /// Scores at or below this are flagged as strongly negative.
    pub strong_negative_band: f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            positive: lexicon::default_positive_words(),
            negative: lexicon::default_negative_words(),
            negative_band: DEFAULT_NEGATIVE_BAND,
            positive_band: DEFAULT_POSITIVE_BAND,
            strong_negative_band: DEFAULT_STRONG_NEGATIVE_BAND,
        }
    }
}

/// Crisis phrases and conversation themes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WellbeingConfig {
    pub crisis_phrases: Vec<String>,
    pub themes: Vec<Theme>,
}

impl Default for WellbeingConfig {
    fn default() -> Self {
        Self {
            crisis_phrases: lexicon::default_crisis_phrases(),
            themes: lexicon::default_themes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matcher: MatcherConfig::default(),
            faq: lexicon::default_faq(),
            sentiment: SentimentConfig::default(),
            wellbeing: WellbeingConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping.
        let config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `config.yaml` if it exists, otherwise use defaults.
    pub fn load_or_default() -> Self {
        Self::load("config.yaml").unwrap_or_default()
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.matcher.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "matcher.threshold must be within [0, 1], got {threshold}"
            )));
        }

        let sentiment = &self.sentiment;
        if sentiment.negative_band.is_nan()
            || sentiment.positive_band.is_nan()
            || sentiment.negative_band >= sentiment.positive_band
        {
            return Err(ConfigError::Invalid(format!(
                "sentiment.negative_band ({}) must be below sentiment.positive_band ({})",
                sentiment.negative_band, sentiment.positive_band
            )));
        }
        if sentiment.strong_negative_band.is_nan()
            || sentiment.strong_negative_band > sentiment.negative_band
        {
            return Err(ConfigError::Invalid(format!(
                "sentiment.strong_negative_band ({}) must not exceed sentiment.negative_band ({})",
                sentiment.strong_negative_band, sentiment.negative_band
            )));
        }

        if let Some(position) = self.faq.iter().position(|e| e.question.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "faq entry {position} has an empty question"
            )));
        }

        if let Some(theme) = self.wellbeing.themes.iter().find(|t| t.name.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "theme with keywords {:?} has no name",
                theme.keywords
            )));
        }

        Ok(())
    }

    /// Catalog of the configured FAQ questions, in file order.
    pub fn faq_catalog(&self) -> Catalog {
        Catalog::new(self.faq.iter().map(|e| e.question.as_str()))
    }

    pub fn sentiment_scorer(&self) -> SentimentScorer {
        SentimentScorer::new(&self.sentiment.positive, &self.sentiment.negative)
            .with_bands(self.sentiment.negative_band, self.sentiment.positive_band)
            .with_strong_negative_band(self.sentiment.strong_negative_band)
    }

    pub fn screener(&self) -> Screener {
        Screener::new(
            CrisisScreen::new(&self.wellbeing.crisis_phrases),
            ThemeDetector::new(self.wellbeing.themes.clone()),
            self.sentiment_scorer(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_matcher_config_default() {
        let config = MatcherConfig::default();
        assert_eq!(config.threshold, 0.35);
    }

    #[test]
    fn test_config_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.faq.len(), 14);
        assert_eq!(config.faq_catalog().len(), 14);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.matcher.threshold, DEFAULT_THRESHOLD);
        assert!(!config.sentiment.positive.is_empty());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
matcher:
  threshold: 0.5
faq:
  - question: "Where is my parcel?"
    answer: "Check the tracking page."
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.matcher.threshold, 0.5);
        assert_eq!(config.faq, vec![FaqEntry::new("Where is my parcel?", "Check the tracking page.")]);
        assert_eq!(config.sentiment.negative_band, DEFAULT_NEGATIVE_BAND);
        assert_eq!(config.wellbeing.themes.len(), 4);
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        for yaml in ["matcher:\n  threshold: 1.5\n", "matcher:\n  threshold: -0.1\n", "matcher:\n  threshold: .nan\n"] {
            let err = Config::from_yaml(yaml).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{yaml}");
        }
    }

    #[test]
    fn test_inverted_bands_are_rejected() {
        let yaml = "sentiment:\n  negative_band: 0.2\n  positive_band: 0.1\n";
        assert!(matches!(Config::from_yaml(yaml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_strong_negative_band_is_configurable() {
        let config = Config::from_yaml("sentiment:\n  strong_negative_band: -0.4\n").unwrap();
        assert_eq!(config.sentiment.strong_negative_band, -0.4);
        let scorer = config.sentiment_scorer();
        assert!(!scorer.is_strong_negative(-0.3));
        assert!(scorer.is_strong_negative(-0.4));

        let yaml = "sentiment:\n  strong_negative_band: 0.0\n";
        assert!(matches!(Config::from_yaml(yaml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_blank_faq_question_is_rejected() {
        let yaml = "faq:\n  - question: \"  \"\n    answer: x\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("faq entry 0"));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = Config::from_yaml("matcher: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "matcher:\n  threshold: 0.42").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.matcher.threshold, 0.42);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(_)));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = Config::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.faq, config.faq);
        assert_eq!(parsed.wellbeing.themes, config.wellbeing.themes);
    }

    #[test]
    fn test_built_components_follow_config() {
        let yaml = "sentiment:\n  positive: [sunny]\n  negative: [rainy]\n";
        let config = Config::from_yaml(yaml).unwrap();
        let scorer = config.sentiment_scorer();
        assert_eq!(scorer.score("sunny sunny rainy day"), 0.25);

        let screening = config.screener().screen("rainy exam");
        assert_eq!(screening.themes, vec!["study".to_string()]);
    }
}
