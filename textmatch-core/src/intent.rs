//! Rule-based intent routing for customer-service messages.
//!
//! Keyword rules are tried in a fixed priority order against the normalized
//! message and the first one that fires decides the intent. Messages no rule
//! claims fall back to FAQ retrieval through a [`Catalog`].
//!
//! # Priority
//!
//! ```text
//! greeting > farewell > track order > return > account > pricing
//!          > troubleshoot > billing > human agent > FAQ > unknown
//! ```

use crate::config::Config;
use crate::matcher::{Catalog, MatchResult};
use crate::text;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum IntentError {
    #[error("Invalid intent pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, IntentError>;

/// Order references such as `order 12345`, `#12345678` or a bare 6-12 digit number.
const ORDER_PATTERN: &str = r"(?:order|#order|order#|ord)\s*[:#]?\s*(\d{5,12})|#(\d{5,12})|(\d{6,12})";

const RULES: &[(RuleKind, &str)] = &[
    (RuleKind::Greeting, r"\b(hi|hello|hey|good morning|good afternoon|good evening)\b"),
    (RuleKind::Farewell, r"\b(thank|thanks|thx|bye|goodbye|see ya)\b"),
    (RuleKind::TrackOrder, r"\b(track|tracking|where.*order|status.*order)\b"),
    (RuleKind::Return, r"\b(return|refund|exchange|replace)\b"),
    (RuleKind::Account, r"\b(password|forgot|reset|login|sign in|account)\b"),
    (RuleKind::Pricing, r"\b(price|cost|plan|subscription|pricing)\b"),
    (RuleKind::Troubleshoot, r"\b(crash|error|not working|bug|issue|slow|lag)\b"),
    (RuleKind::Billing, r"\b(invoice|receipt|bill|billing)\b"),
    (RuleKind::HumanAgent, r"\b(agent|human|representative|support)\b"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    Greeting,
    Farewell,
    TrackOrder,
    Return,
    Account,
    Pricing,
    Troubleshoot,
    Billing,
    HumanAgent,
}

/// What a customer message is asking for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Farewell,
    TrackOrder {
        order: Option<String>,
    },
    Return {
        order: Option<String>,
    },
    Account {
        /// The message mentions a forgotten or reset password.
        reset: bool,
    },
    Pricing,
    Troubleshoot {
        /// The message names an app, mobile or desktop client.
        app: bool,
    },
    Billing,
    HumanAgent,
    /// FAQ entry `index` matched with similarity `score`.
    Faq {
        index: usize,
        score: f64,
    },
    /// Nothing matched; `best_score` is the closest FAQ similarity.
    Unknown {
        best_score: f64,
    },
}

#[derive(Debug, Clone)]
struct Rule {
    kind: RuleKind,
    pattern: Regex,
}

/// Routes messages to intents.
#[derive(Debug, Clone)]
pub struct IntentRouter {
    rules: Vec<Rule>,
    order_pattern: Regex,
    faq: Catalog,
    threshold: f64,
}

impl IntentRouter {
    /// Compiles the rule set and attaches the FAQ fallback.
    pub fn new(faq: Catalog, threshold: f64) -> Result<Self> {
        let rules = RULES
            .iter()
            .map(|(kind, pattern)| -> Result<Rule> {
                Ok(Rule {
                    kind: *kind,
                    pattern: Regex::new(pattern)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            order_pattern: Regex::new(ORDER_PATTERN)?,
            faq,
            threshold,
        })
    }

    /// Router over the configured FAQ with the configured threshold.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.faq_catalog(), config.matcher.threshold)
    }

    pub fn faq(&self) -> &Catalog {
        &self.faq
    }

    /// First order number mentioned in the raw message.
    pub fn extract_order_number(&self, message: &str) -> Option<String> {
        let captures = self.order_pattern.captures(message)?;
        captures
            .iter()
            .skip(1)
            .flatten()
            .find(|m| !m.as_str().is_empty())
            .map(|m| m.as_str().to_owned())
    }

    pub fn classify(&self, message: &str) -> Intent {
        let normalized = text::normalize(message);

        let fired = self
            .rules
            .iter()
            .find(|rule| rule.pattern.is_match(&normalized))
            .map(|rule| rule.kind);

        let intent = match fired {
            Some(RuleKind::Greeting) => Intent::Greeting,
            Some(RuleKind::Farewell) => Intent::Farewell,
            Some(RuleKind::TrackOrder) => Intent::TrackOrder {
                order: self.extract_order_number(message),
            },
            Some(RuleKind::Return) => Intent::Return {
                order: self.extract_order_number(message),
            },
            Some(RuleKind::Account) => Intent::Account {
                reset: normalized.contains("forgot") || normalized.contains("reset"),
            },
            Some(RuleKind::Pricing) => Intent::Pricing,
            Some(RuleKind::Troubleshoot) => Intent::Troubleshoot {
                app: ["app", "mobile", "desktop"]
                    .iter()
                    .any(|k| normalized.contains(k)),
            },
            Some(RuleKind::Billing) => Intent::Billing,
            Some(RuleKind::HumanAgent) => Intent::HumanAgent,
            None => {
                let report = self.faq.evaluate(message, self.threshold);
                match report.result {
                    MatchResult::Match { index, score } => Intent::Faq { index, score },
                    MatchResult::NoMatch => Intent::Unknown {
                        best_score: report.best_score,
                    },
                }
            }
        };

        debug!(?fired, ?intent, "Message classified");
        intent
    }
}
