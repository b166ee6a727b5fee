//! Resolver configuration: weight constants, thresholds, exception lists.
//!
//! All constants are fixed for the lifetime of a resolver; nothing here is
//! learned or adjusted at runtime. [`ResolverConfig::validate`] is called
//! once at construction and rejects out-of-range values before any document
//! is processed.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::salience::SalienceFactor;
use crate::{Error, Result};

/// German verbs that govern pleonastic *es* ("es gibt", "es regnet").
///
/// A pronoun *es* dominated by one of these lemmas is not referential and
/// is never extracted as a markable.
static EXPLETIVE_VERBS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["sein", "regnen", "gelingen", "bestehen", "geben"].into());

/// Lemmas whose number morphology is syncretic (3sg fem vs. 3pl *sie*).
static NUMBER_SYNCRETIC: Lazy<HashSet<&'static str>> = Lazy::new(|| ["sie", "Sie"].into());

/// Lemmas whose person morphology is syncretic (polite *Sie*).
static PERSON_SYNCRETIC: Lazy<HashSet<&'static str>> = Lazy::new(|| ["Sie"].into());

// =============================================================================
// Salience weights
// =============================================================================

/// One additive constant per salience factor.
///
/// Defaults follow Lappin & Leass (1994). A factor's weight is added to an
/// entity's vector whenever the triggering condition holds for the mention
/// just attached; the parallelism weight is applied transiently at scoring
/// time instead (see the salience module).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalienceWeights {
    /// Sentence recency: every mention in the current sentence.
    pub recency: f64,
    /// Subject emphasis.
    pub subject: f64,
    /// Existential-construction emphasis.
    pub existential: f64,
    /// Direct-object emphasis.
    pub direct_object: f64,
    /// Indirect-object/oblique emphasis.
    pub indirect_object: f64,
    /// Non-adverbial emphasis: mention not inside an adverbial phrase.
    pub non_adverbial: f64,
    /// Head-noun emphasis: mention not embedded in a larger NP.
    pub head_noun: f64,
    /// Grammatical-role parallelism bonus between anaphor and candidate.
    pub parallelism: f64,
}

impl Default for SalienceWeights {
    fn default() -> Self {
        Self {
            recency: 100.0,
            subject: 80.0,
            existential: 70.0,
            direct_object: 50.0,
            indirect_object: 40.0,
            non_adverbial: 50.0,
            head_noun: 80.0,
            parallelism: 35.0,
        }
    }
}

impl SalienceWeights {
    /// Weight constant for a factor.
    #[must_use]
    pub fn get(&self, factor: SalienceFactor) -> f64 {
        match factor {
            SalienceFactor::Recency => self.recency,
            SalienceFactor::Subject => self.subject,
            SalienceFactor::Existential => self.existential,
            SalienceFactor::DirectObject => self.direct_object,
            SalienceFactor::IndirectObject => self.indirect_object,
            SalienceFactor::NonAdverbial => self.non_adverbial,
            SalienceFactor::HeadNoun => self.head_noun,
            SalienceFactor::Parallelism => self.parallelism,
        }
    }
}

// =============================================================================
// Agreement exceptions
// =============================================================================

/// Syncretism exceptions for the morphological agreement filter.
///
/// A lemma listed in one of these sets skips exactly that one feature
/// check. German needs this for *sie* (3sg feminine vs. 3pl, identical
/// forms) and polite *Sie* (2nd person reference with 3rd person
/// morphology); other languages can swap in their own lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgreementExceptions {
    /// Lemmas exempt from the number check.
    pub number_syncretic: HashSet<String>,
    /// Lemmas exempt from the person check.
    pub person_syncretic: HashSet<String>,
}

impl Default for AgreementExceptions {
    fn default() -> Self {
        Self {
            number_syncretic: NUMBER_SYNCRETIC.iter().map(|s| s.to_string()).collect(),
            person_syncretic: PERSON_SYNCRETIC.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AgreementExceptions {
    /// Is either lemma number-syncretic?
    #[must_use]
    pub fn skips_number(&self, anaphor_lemma: &str, candidate_lemma: &str) -> bool {
        self.number_syncretic.contains(anaphor_lemma)
            || self.number_syncretic.contains(candidate_lemma)
    }

    /// Is either lemma person-syncretic?
    #[must_use]
    pub fn skips_person(&self, anaphor_lemma: &str, candidate_lemma: &str) -> bool {
        self.person_syncretic.contains(anaphor_lemma)
            || self.person_syncretic.contains(candidate_lemma)
    }
}

// =============================================================================
// Resolver configuration
// =============================================================================

/// Fixed configuration for one resolver instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// How many preceding sentences may contain an antecedent.
    pub recency_window: usize,
    /// Multiplicative decay applied to an entity's weight vector per
    /// sentence boundary without a new mention. Must be in `(0, 1]`.
    pub decay_factor: f64,
    /// Total weight at or below which an entity no longer wins selection.
    pub salience_floor: f64,
    /// Salience weight constants.
    pub weights: SalienceWeights,
    /// Agreement syncretism exceptions.
    pub agreement: AgreementExceptions,
    /// Lemmas of verbs governing pleonastic *es*.
    pub expletive_verbs: HashSet<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            recency_window: 4,
            decay_factor: 0.5,
            salience_floor: 0.1,
            weights: SalienceWeights::default(),
            agreement: AgreementExceptions::default(),
            expletive_verbs: EXPLETIVE_VERBS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ResolverConfig {
    /// Check every constant against its valid range.
    ///
    /// Called once when a resolver is constructed; a failure here is fatal
    /// and no document is processed.
    pub fn validate(&self) -> Result<()> {
        if self.recency_window == 0 {
            return Err(Error::config("recency_window must be at least 1"));
        }
        if !self.decay_factor.is_finite() || self.decay_factor <= 0.0 || self.decay_factor > 1.0 {
            return Err(Error::config(format!(
                "decay_factor must be in (0, 1], got {}",
                self.decay_factor
            )));
        }
        if !self.salience_floor.is_finite() || self.salience_floor < 0.0 {
            return Err(Error::config(format!(
                "salience_floor must be non-negative, got {}",
                self.salience_floor
            )));
        }
        for factor in SalienceFactor::ALL {
            let weight = self.weights.get(factor);
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::config(format!(
                    "weight.{} must be a non-negative number, got {}",
                    factor.as_str(),
                    weight
                )));
            }
        }
        Ok(())
    }
}
