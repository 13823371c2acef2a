use std::time::Instant;

use index::{Constraints, KnowledgeBaseIndex, KnowledgeEntry};
use similarity::{FeatureConfig, FeatureExtractor, PreparedText};
use tracing::trace;

use crate::metrics::metrics_recorder;
use crate::types::{LinkConfig, LinkHit, MatchError};

#[cfg(test)]
mod tests;

/// Links free-text mentions to entries of a knowledge-base index.
///
/// A `Linker` holds no index of its own; the same linker can serve every
/// entity type. All methods take `&self` and never lock.
#[derive(Debug, Clone, Default)]
pub struct Linker {
    extractor: FeatureExtractor,
    cfg: LinkConfig,
}

impl Linker {
    /// Construct a linker from an extractor and a validated config.
    pub fn new(extractor: FeatureExtractor, cfg: LinkConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self { extractor, cfg })
    }

    /// Construct a linker straight from both configs.
    pub fn from_configs(features: FeatureConfig, cfg: LinkConfig) -> Result<Self, MatchError> {
        Self::new(FeatureExtractor::new(features)?, cfg)
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn config(&self) -> &LinkConfig {
        &self.cfg
    }

    /// Best entry of `index` for `query` among those satisfying `constraints`.
    ///
    /// Returns `None` when no entry satisfies the constraints. Equal scores
    /// go to the entry loaded first.
    pub fn link<'a>(
        &self,
        index: &'a KnowledgeBaseIndex,
        query: &str,
        constraints: &Constraints,
    ) -> Option<LinkHit<'a>> {
        let start = Instant::now();
        let prepared = self.extractor.prepare(query);

        let mut candidates = 0usize;
        let mut best: Option<LinkHit<'a>> = None;
        for entry in candidates_of(index, constraints) {
            candidates += 1;
            let hit = self.score_entry(&prepared, entry);
            // Strictly greater keeps the earliest of equal scores.
            let better = match &best {
                Some(current) => hit.score > current.score,
                None => true,
            };
            if better {
                best = Some(hit);
            }
        }

        trace!(
            entity_type = index.name(),
            candidates,
            best_id = best.as_ref().map(|hit| hit.id()),
            best_score = best.as_ref().map(|hit| hit.score),
            "link"
        );
        record(index.name(), start, candidates, best.is_some());
        best
    }

    /// Every candidate scoring at least `min_score`, best first.
    ///
    /// Equal scores keep load order. At most `max_results` hits are returned.
    pub fn rank<'a>(
        &self,
        index: &'a KnowledgeBaseIndex,
        query: &str,
        constraints: &Constraints,
    ) -> Vec<LinkHit<'a>> {
        let start = Instant::now();
        let prepared = self.extractor.prepare(query);

        let mut candidates = 0usize;
        let mut hits: Vec<LinkHit<'a>> = candidates_of(index, constraints)
            .inspect(|_| candidates += 1)
            .map(|entry| self.score_entry(&prepared, entry))
            .filter(|hit| hit.score >= self.cfg.min_score)
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(self.cfg.max_results);

        trace!(
            entity_type = index.name(),
            candidates,
            hits = hits.len(),
            "rank"
        );
        record(index.name(), start, candidates, !hits.is_empty());
        hits
    }

    fn score_entry<'a>(&self, query: &PreparedText, entry: &'a KnowledgeEntry) -> LinkHit<'a> {
        let features = self.extractor.extract_labels(query, &entry.labels);
        LinkHit {
            entry,
            score: features.score(),
            features,
        }
    }
}

fn candidates_of<'a, 'c>(
    index: &'a KnowledgeBaseIndex,
    constraints: &'c Constraints,
) -> impl Iterator<Item = &'a KnowledgeEntry> + 'c
where
    'a: 'c,
{
    index
        .entries()
        .iter()
        .filter(move |entry| entry.satisfies(constraints))
}

fn record(entity_type: &str, start: Instant, candidates: usize, matched: bool) {
    if let Some(recorder) = metrics_recorder() {
        recorder.record_link(entity_type, start.elapsed(), candidates, matched);
    }
}
