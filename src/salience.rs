//! Salience model: discourse entities, weight vectors, decay.
//!
//! Every coreference chain is backed by a [`DiscourseEntity`] holding a
//! weight vector with one slot per [`SalienceFactor`]. Attaching a mention
//! recomputes the vector from that mention's attributes alone; crossing a
//! sentence boundary halves (by the configured decay factor) the vector of
//! every entity that was not mentioned in the finished sentence. An
//! entity's salience score is the sum of its slots, plus a transient
//! parallelism bonus when its latest mention shares the anaphor's
//! grammatical role.
//!
//! Entities live in a flat arena and are addressed by integer id; they are
//! never removed, they only stop winning selection once decay takes their
//! total below the configured floor or the recency filter puts them out of
//! window.

use serde::{Deserialize, Serialize};

use crate::config::SalienceWeights;
use crate::markable::{GrammaticalRole, Markable};

/// Arena index of a discourse entity.
pub type EntityId = usize;

/// Arena index of a markable within one document pass.
pub type MarkableId = usize;

// =============================================================================
// Factors
// =============================================================================

/// The named salience factors, in their fixed declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalienceFactor {
    /// Mention in the current sentence.
    Recency,
    /// Mention in subject position.
    Subject,
    /// Mention inside an existential construction.
    Existential,
    /// Mention in direct-object position.
    DirectObject,
    /// Mention in indirect-object or oblique position.
    IndirectObject,
    /// Mention not contained in an adverbial phrase.
    NonAdverbial,
    /// Mention not embedded in a larger noun phrase.
    HeadNoun,
    /// Anaphor and candidate share their grammatical role. Applied at
    /// scoring time only; never stored in an entity's vector.
    Parallelism,
}

impl SalienceFactor {
    /// All factors, in slot order.
    pub const ALL: [SalienceFactor; 8] = [
        SalienceFactor::Recency,
        SalienceFactor::Subject,
        SalienceFactor::Existential,
        SalienceFactor::DirectObject,
        SalienceFactor::IndirectObject,
        SalienceFactor::NonAdverbial,
        SalienceFactor::HeadNoun,
        SalienceFactor::Parallelism,
    ];

    /// Configuration name of the factor.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SalienceFactor::Recency => "recency",
            SalienceFactor::Subject => "subject",
            SalienceFactor::Existential => "existential",
            SalienceFactor::DirectObject => "direct_object",
            SalienceFactor::IndirectObject => "indirect_object",
            SalienceFactor::NonAdverbial => "non_adverbial",
            SalienceFactor::HeadNoun => "head_noun",
            SalienceFactor::Parallelism => "parallelism",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

// =============================================================================
// Weight vector
// =============================================================================

/// One scalar per salience factor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightVector([f64; SalienceFactor::ALL.len()]);

impl WeightVector {
    /// The zero vector.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Value of one slot.
    #[must_use]
    pub fn get(&self, factor: SalienceFactor) -> f64 {
        self.0[factor.slot()]
    }

    /// Set one slot.
    pub fn set(&mut self, factor: SalienceFactor, value: f64) {
        self.0[factor.slot()] = value;
    }

    /// Sum of all slots.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Multiply every slot by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for slot in &mut self.0 {
            *slot *= factor;
        }
    }
}

/// Weight vector derived from a single mention's attributes.
///
/// This is the from-scratch recomputation applied on every attachment: the
/// slots reflect only the mention just processed, not any accumulated
/// history. The parallelism slot always stays zero here.
#[must_use]
pub fn mention_vector(weights: &SalienceWeights, mention: &Markable) -> WeightVector {
    let mut vector = WeightVector::zero();
    vector.set(SalienceFactor::Recency, weights.recency);
    match mention.role {
        GrammaticalRole::Subject => vector.set(SalienceFactor::Subject, weights.subject),
        GrammaticalRole::DirectObject => {
            vector.set(SalienceFactor::DirectObject, weights.direct_object);
        }
        GrammaticalRole::IndirectObject | GrammaticalRole::Oblique => {
            vector.set(SalienceFactor::IndirectObject, weights.indirect_object);
        }
        GrammaticalRole::Other => {}
    }
    if mention.existential {
        vector.set(SalienceFactor::Existential, weights.existential);
    }
    if !mention.adverbial {
        vector.set(SalienceFactor::NonAdverbial, weights.non_adverbial);
    }
    if !mention.embedded {
        vector.set(SalienceFactor::HeadNoun, weights.head_noun);
    }
    vector
}

// =============================================================================
// Discourse entity
// =============================================================================

/// The accumulating referent behind one coreference chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscourseEntity {
    /// Arena id of this entity.
    pub id: EntityId,
    /// Mentions in resolution order (markable arena ids).
    pub mentions: Vec<MarkableId>,
    /// Current weight vector.
    pub weights: WeightVector,
    /// Sentence index of the latest mention.
    pub last_sentence: usize,
}

impl DiscourseEntity {
    /// Latest mention (the one the current vector was computed from).
    #[must_use]
    pub fn latest_mention(&self) -> MarkableId {
        *self
            .mentions
            .last()
            .expect("an entity always has at least one mention")
    }
}

// =============================================================================
// Registry
// =============================================================================

/// All discourse entities and markables of one document pass.
///
/// Created fresh per document and owned by the resolution engine; separate
/// documents never share a registry, which is what makes document-level
/// parallelism safe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalienceRegistry {
    markables: Vec<Markable>,
    mention_entity: Vec<EntityId>,
    entities: Vec<DiscourseEntity>,
}

impl SalienceRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All markables, in arena (document) order.
    #[must_use]
    pub fn markables(&self) -> &[Markable] {
        &self.markables
    }

    /// All entities, in introduction order.
    #[must_use]
    pub fn entities(&self) -> &[DiscourseEntity] {
        &self.entities
    }

    /// One markable by arena id.
    #[must_use]
    pub fn markable(&self, id: MarkableId) -> &Markable {
        &self.markables[id]
    }

    /// One entity by arena id.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> &DiscourseEntity {
        &self.entities[id]
    }

    /// Entity a markable belongs to.
    #[must_use]
    pub fn entity_of(&self, id: MarkableId) -> EntityId {
        self.mention_entity[id]
    }

    /// Introduce a brand-new entity seeded by `mention`.
    pub fn introduce(&mut self, mention: Markable, weights: &SalienceWeights) -> EntityId {
        let markable_id = self.markables.len();
        let entity_id = self.entities.len();
        let vector = mention_vector(weights, &mention);
        self.entities.push(DiscourseEntity {
            id: entity_id,
            mentions: vec![markable_id],
            weights: vector,
            last_sentence: mention.sentence,
        });
        self.markables.push(mention);
        self.mention_entity.push(entity_id);
        log::debug!("introduced entity {} from markable {}", entity_id, markable_id);
        entity_id
    }

    /// Attach `mention` to an existing entity, replacing its weight vector
    /// with the one derived from this mention.
    pub fn attach(
        &mut self,
        entity_id: EntityId,
        mention: Markable,
        weights: &SalienceWeights,
    ) -> MarkableId {
        let markable_id = self.markables.len();
        let vector = mention_vector(weights, &mention);
        let entity = &mut self.entities[entity_id];
        entity.mentions.push(markable_id);
        entity.weights = vector;
        entity.last_sentence = mention.sentence;
        self.markables.push(mention);
        self.mention_entity.push(entity_id);
        markable_id
    }

    /// Apply per-sentence decay after sentence `sentence` has been fully
    /// processed: every entity whose latest mention is older is scaled by
    /// `decay`. Repeated boundaries compound, so an entity untouched for N
    /// sentences ends up at `decay^N` of its post-mention weight.
    pub fn decay_unmentioned(&mut self, sentence: usize, decay: f64) {
        for entity in &mut self.entities {
            if entity.last_sentence != sentence {
                entity.weights.scale(decay);
            }
        }
    }

    /// Salience score of an entity as a candidate for `anaphor`: the
    /// decayed total plus the parallelism bonus when the entity's latest
    /// mention shares the anaphor's grammatical role.
    #[must_use]
    pub fn score_against(
        &self,
        entity_id: EntityId,
        anaphor: &Markable,
        weights: &SalienceWeights,
    ) -> f64 {
        let entity = &self.entities[entity_id];
        let mut score = entity.weights.total();
        let latest = self.markable(entity.latest_mention());
        if latest.role == anaphor.role {
            score += weights.parallelism;
        }
        score
    }
}

// =============================================================================
// Tests
// =============================================================================
