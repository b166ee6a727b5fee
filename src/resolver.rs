//! The resolution engine: one strictly ordered pass per document.
//!
//! The engine walks sentences in document order and markables in
//! left-to-right order within each sentence. For every markable it asks
//! the filter pipeline for the admissible mentions of every known entity,
//! scores the surviving entities through the salience model, attaches the
//! markable to the winner or introduces a new entity, and finally applies
//! the per-sentence decay. Salience is a function of processing order, so
//! nothing here may run out of order; separate documents are independent
//! and may be resolved on separate threads with separate resolvers.

use crate::chains::ChainSet;
use crate::config::ResolverConfig;
use crate::extract::MarkableExtractor;
use crate::filters::{admissible, FilterContext};
use crate::markable::{GrammaticalRole, Markable, MarkableKind};
use crate::salience::{EntityId, SalienceRegistry};
use crate::token::Document;
use crate::Result;

/// An entity that survived filtering for one anaphor, with everything the
/// selection order needs.
struct Candidate {
    entity: EntityId,
    score: f64,
    last_sentence: usize,
    subject: bool,
    /// Token distance from the closest admissible mention to the anaphor.
    distance: usize,
}

impl Candidate {
    /// Selection order: higher score, then more recent sentence, then
    /// subject role, then smaller distance, then introduction order.
    fn beats(&self, other: &Candidate) -> bool {
        if self.score != other.score {
            return self.score > other.score;
        }
        if self.last_sentence != other.last_sentence {
            return self.last_sentence > other.last_sentence;
        }
        if self.subject != other.subject {
            return self.subject;
        }
        if self.distance != other.distance {
            return self.distance < other.distance;
        }
        self.entity < other.entity
    }
}

/// Salience-based anaphora resolver.
///
/// Holds only the validated configuration; all per-document state lives in
/// a fresh [`SalienceRegistry`] per [`Resolver::resolve`] call.
#[derive(Debug, Clone)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            config: ResolverConfig::default(),
        }
    }
}

impl Resolver {
    /// Create a resolver, validating the configuration.
    ///
    /// Fails with [`crate::Error::Config`] if any constant is out of
    /// range; no document is ever processed with an invalid model.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve one document into its coreference partition.
    ///
    /// Malformed sentences are skipped with a warning and listed in the
    /// returned [`ChainSet::skipped_sentences`]; everything else proceeds.
    #[must_use]
    pub fn resolve(&self, document: &Document) -> ChainSet {
        let extractor = MarkableExtractor::new(&self.config);
        let offsets = document.token_offsets();
        let mut registry = SalienceRegistry::new();
        let mut skipped = Vec::new();

        for (index, sentence) in document.sentences.iter().enumerate() {
            match sentence.validate() {
                Ok(()) => {
                    for markable in extractor.extract(index, sentence) {
                        self.resolve_markable(document, &offsets, &mut registry, markable);
                    }
                }
                Err(error) => {
                    log::warn!("skipping sentence {}: {}", index, error);
                    skipped.push(index);
                }
            }
            // Sentence boundary: every entity without a mention in this
            // sentence loses half (decay_factor) of its weight.
            registry.decay_unmentioned(index, self.config.decay_factor);
        }

        let chains = ChainSet::from_registry(&registry, document, skipped);
        log::info!(
            "resolved {} markables into {} chains ({} non-singleton)",
            chains.mention_count(),
            chains.len(),
            chains.non_singletons().count()
        );
        chains
    }

    fn resolve_markable(
        &self,
        document: &Document,
        offsets: &[usize],
        registry: &mut SalienceRegistry,
        markable: Markable,
    ) {
        match self.select_antecedent(document, offsets, registry, &markable) {
            Some(entity) => {
                log::debug!("attached {} to entity {}", markable, entity);
                registry.attach(entity, markable, &self.config.weights);
            }
            None => {
                registry.introduce(markable, &self.config.weights);
            }
        }
    }

    /// Pick the antecedent entity for `anaphor`, or `None` when the
    /// admissible set is empty (the normal singleton outcome).
    fn select_antecedent(
        &self,
        document: &Document,
        offsets: &[usize],
        registry: &SalienceRegistry,
        anaphor: &Markable,
    ) -> Option<EntityId> {
        let anaphor_offset = offsets[anaphor.sentence] + anaphor.head;
        let mut candidates: Vec<Candidate> = Vec::new();

        for entity in registry.entities() {
            if entity.weights.total() <= self.config.salience_floor {
                continue;
            }
            // Closest admissible mention of this entity, if any. Mentions
            // are stored in document order, so scan from the back.
            let mention = entity.mentions.iter().rev().copied().find(|&id| {
                let mention = registry.markable(id);
                if anaphor.is_nominal() && mention.lemma != anaphor.lemma {
                    return false;
                }
                let ctx = FilterContext {
                    config: &self.config,
                    document,
                    anaphor,
                    candidate: mention,
                    entity,
                    markables: registry.markables(),
                };
                admissible(&ctx)
            });
            let Some(mention_id) = mention else { continue };
            let mention = registry.markable(mention_id);

            candidates.push(Candidate {
                entity: entity.id,
                score: registry.score_against(entity.id, anaphor, &self.config.weights),
                last_sentence: entity.last_sentence,
                subject: mention.role == GrammaticalRole::Subject,
                distance: anaphor_offset - (offsets[mention.sentence] + mention.head),
            });
        }

        match anaphor.kind {
            // Substitutive demonstrative and relative pronouns take the
            // closest admissible candidate, not the salience maximum.
            MarkableKind::DemonstrativePronoun | MarkableKind::RelativePronoun => candidates
                .into_iter()
                .min_by_key(|c| (c.distance, c.entity))
                .map(|c| c.entity),
            _ => {
                let mut best: Option<Candidate> = None;
                for candidate in candidates {
                    let better = match &best {
                        Some(current) => candidate.beats(current),
                        None => true,
                    };
                    if better {
                        best = Some(candidate);
                    }
                }
                best.map(|c| c.entity)
            }
        }
    }
}

/// Resolve a document with the default configuration.
#[must_use]
pub fn resolve_document(document: &Document) -> ChainSet {
    Resolver::default().resolve(document)
}

// =============================================================================
// Tests
// =============================================================================
