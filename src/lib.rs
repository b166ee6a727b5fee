//! # anaphor
//!
//! Salience-based resolution of pronominal and nominal anaphora over
//! dependency-parsed text.
//!
//! The input is a [`Document`] of sentences that an external parser has
//! already annotated with POS tags, morphology and dependency relations
//! (German STTS/TIGER conventions out of the box). The output is a
//! [`ChainSet`]: a strict partition of the document's referring
//! expressions into coreference chains.
//!
//! Resolution follows the classic filters-and-preferences scheme:
//!
//! 1. **Extraction** finds the markables of each sentence (pronouns,
//!    determined noun phrases, proper names), excluding pleonastic *es*.
//! 2. **Hard filters** eliminate impossible antecedents: recency window,
//!    i-within-i, morphological agreement, binding principles, semantic
//!    class. See the [`filters`] module.
//! 3. **Salience** ranks the survivors. Every discourse entity carries a
//!    weight vector (recency, subject emphasis, existential emphasis,
//!    object emphases, non-adverbial and head-noun emphasis) that is
//!    recomputed on each mention and halved per sentence boundary without
//!    one. See the [`salience`] module.
//!
//! All weights are fixed, hand-tuned constants (Lappin & Leass 1994
//! defaults); nothing is learned at runtime. Given the same input and
//! configuration, resolution is fully deterministic.
//!
//! ## Quick start
//!
//! ```rust
//! use anaphor::{resolve_document, DepRel, Document, Gender, MorphFeatures,
//!               Number, Person, PosTag, Sentence, Token};
//!
//! // "Anna kam. Sie lachte."
//! let fem_sg = MorphFeatures::new().gender(Gender::Feminine).number(Number::Singular);
//! let first = Sentence::new(vec![
//!     Token::new(0, "Anna", "Anna")
//!         .with_pos(PosTag::ProperNoun)
//!         .with_deprel(DepRel::Subject)
//!         .with_head(1)
//!         .with_morph(fem_sg),
//!     Token::new(1, "kam", "kommen")
//!         .with_pos(PosTag::Verb)
//!         .with_deprel(DepRel::Root),
//! ]);
//! let second = Sentence::new(vec![
//!     Token::new(0, "Sie", "sie")
//!         .with_pos(PosTag::PersonalPronoun)
//!         .with_deprel(DepRel::Subject)
//!         .with_head(1)
//!         .with_morph(fem_sg.person(Person::Third)),
//!     Token::new(1, "lachte", "lachen")
//!         .with_pos(PosTag::Verb)
//!         .with_deprel(DepRel::Root),
//! ]);
//!
//! let chains = resolve_document(&Document::new(vec![first, second]));
//! let resolved: Vec<_> = chains.non_singletons().collect();
//! assert_eq!(resolved.len(), 1);
//! assert_eq!(resolved[0].mentions.len(), 2);
//! ```
//!
//! ## Scope
//!
//! The crate neither parses raw text nor reads or writes corpus formats;
//! both stay with the surrounding application. Errors follow a simple
//! policy: invalid configuration is fatal at construction
//! ([`Error::Config`]), a malformed sentence is skipped with a warning
//! ([`ChainSet::skipped_sentences`]), and an anaphor without an admissible
//! antecedent is not an error at all, just a singleton chain.
//!
//! Documents are independent: each `resolve` call owns its registry, so
//! separate documents may be processed on separate threads. Within one
//! document processing order is fixed and sequential by design.

#![warn(missing_docs)]

pub mod chains;
pub mod config;
pub mod extract;
pub mod filters;
pub mod markable;
pub mod salience;
pub mod token;

mod error;
mod resolver;

pub use chains::{Chain, ChainMention, ChainSet};
pub use config::{AgreementExceptions, ResolverConfig, SalienceWeights};
pub use error::{Error, Result};
pub use extract::MarkableExtractor;
pub use markable::{GrammaticalRole, Markable, MarkableKind};
pub use resolver::{resolve_document, Resolver};
pub use salience::{
    DiscourseEntity, EntityId, MarkableId, SalienceFactor, SalienceRegistry, WeightVector,
};
pub use token::{
    Animacy, Case, DepRel, Document, Gender, MorphFeatures, Number, Person, PosTag, Sentence,
    Token,
};
