//! textmatch - Term-overlap matching for small rule-driven assistants
//!
//! This is the convenience wrapper crate that re-exports `textmatch-core`.
//!
//! # Quick Start
//!
//! ```toml
//! [dependencies]
//! textmatch = "0.1"
//! ```
//!
//! ```
//! use textmatch::prelude::*;
//!
//! let config = Config::default();
//! let router = IntentRouter::from_config(&config).unwrap();
//! assert_eq!(router.classify("hello!"), Intent::Greeting);
//! ```

// Re-export core
pub use textmatch_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use textmatch_core::*;
}
