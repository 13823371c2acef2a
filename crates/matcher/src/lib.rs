//! # kblink Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` sits on top of the index layer (`index`) and the similarity layer
//! (`similarity`). It turns a free-text mention into the best matching entry
//! of one knowledge-base index, optionally restricted by property constraints
//! such as `{"country": "country:ca"}`.
//!
//! ## Core Types
//!
//! - [`Linker`]: scores candidates and picks the best one (`link`) or returns
//!   a ranked list (`rank`).
//! - [`LinkConfig`]: `max_results` and `min_score` for ranked results.
//! - [`LinkHit`]: the entry, its scalar score and the full feature vector.
//!
//! Candidates are the index entries whose properties equal every constraint
//! exactly. An empty candidate set yields no hit. Among equal scores the entry
//! loaded first wins, on every run.
//!
//! ## Example Usage
//!
//! ```
//! use index::{Constraints, KnowledgeBaseIndex, KnowledgeEntry};
//! use matcher::Linker;
//!
//! let index = KnowledgeBaseIndex::new(
//!     "commodity",
//!     vec![
//!         KnowledgeEntry::new("c:cu", ["Copper", "Cu"]),
//!         KnowledgeEntry::new("c:au", ["Gold", "Au"]),
//!     ],
//! );
//!
//! let linker = Linker::default();
//! let hit = linker.link(&index, "copper", &Constraints::new()).expect("candidates exist");
//! assert_eq!(hit.entry.id, "c:cu");
//! assert_eq!(hit.score, 1.0);
//! ```
//!
//! ## Observability
//!
//! Install a [`LinkMetrics`] implementation via [`set_link_metrics`] to record
//! per-call latency and candidate counts. Every [`Linker`] in the process
//! reports to the same recorder.

pub mod engine;
pub mod metrics;
pub mod types;

pub use crate::engine::Linker;
pub use crate::metrics::{set_link_metrics, LinkMetrics};
pub use crate::types::{LinkConfig, LinkHit, MatchError};
pub use index::Constraints;
