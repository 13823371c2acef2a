//! kblink canonical text layer.
//!
//! Turns mentions and knowledge-base labels into a comparable form and splits
//! them into tokens for the similarity layer.
//!
//! ## What we do
//!
//! - Unicode NFKC normalization (configurable)
//! - Locale-free lowercasing, optional punctuation stripping
//! - Whitespace collapsing
//! - Three tokenizers: characters, words, unique words
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence, no failure path. The same
//! text and config give the same output on any machine.
//!
//! ```rust
//! use canonical::{normalize, word_tokens, CanonicalizeConfig};
//!
//! let text = normalize("  Rare  EARTH elements ", &CanonicalizeConfig::default());
//! assert_eq!(text, "rare earth elements");
//! assert_eq!(word_tokens(&text).len(), 3);
//! ```

mod config;
mod error;
mod normalize;
mod token;
mod whitespace;

pub use crate::config::CanonicalizeConfig;
pub use crate::error::CanonicalError;
pub use crate::normalize::normalize;
pub use crate::token::{char_tokens, unique_word_tokens, word_tokens, TokenSeq};
pub use crate::whitespace::collapse_whitespace;
