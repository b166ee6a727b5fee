//! Markables: candidate referring expressions.
//!
//! A markable is a contiguous token span flagged as a possible mention of a
//! discourse entity, anchored at its syntactic head. Markables are created
//! once per extraction pass and never mutated; which entity a markable ends
//! up in is recorded by the salience registry, not on the markable itself.

use serde::{Deserialize, Serialize};

use crate::token::{DepRel, MorphFeatures, PosTag};

/// The kind of referring expression a markable represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkableKind {
    /// Irreflexive personal pronoun (*er*, *ihm*)
    PersonalPronoun,
    /// Reflexive pronoun (*sich*)
    ReflexivePronoun,
    /// Attributive possessive pronoun (*sein* [Buch])
    PossessivePronoun,
    /// Substitutive demonstrative pronoun (*dieser*)
    DemonstrativePronoun,
    /// Substitutive relative pronoun ([der Hund,] *der*)
    RelativePronoun,
    /// Common noun phrase (*der Mann*)
    CommonNoun,
    /// Proper name (*Anna*)
    ProperName,
}

impl MarkableKind {
    /// Markable kind for a POS tag, or `None` for tags that never head a
    /// markable.
    #[must_use]
    pub fn from_pos(pos: &PosTag) -> Option<Self> {
        match pos {
            PosTag::PersonalPronoun => Some(MarkableKind::PersonalPronoun),
            PosTag::ReflexivePronoun => Some(MarkableKind::ReflexivePronoun),
            PosTag::PossessivePronoun => Some(MarkableKind::PossessivePronoun),
            PosTag::DemonstrativePronoun => Some(MarkableKind::DemonstrativePronoun),
            PosTag::RelativePronoun => Some(MarkableKind::RelativePronoun),
            PosTag::CommonNoun => Some(MarkableKind::CommonNoun),
            PosTag::ProperNoun => Some(MarkableKind::ProperName),
            _ => None,
        }
    }

    /// Pronominal markables require resolution through the salience model.
    #[must_use]
    pub fn is_pronominal(&self) -> bool {
        !self.is_nominal()
    }

    /// Nominal markables resolve by lemma identity or introduce entities.
    #[must_use]
    pub fn is_nominal(&self) -> bool {
        matches!(self, MarkableKind::CommonNoun | MarkableKind::ProperName)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MarkableKind::PersonalPronoun => "personal",
            MarkableKind::ReflexivePronoun => "reflexive",
            MarkableKind::PossessivePronoun => "possessive",
            MarkableKind::DemonstrativePronoun => "demonstrative",
            MarkableKind::RelativePronoun => "relative",
            MarkableKind::CommonNoun => "nominal",
            MarkableKind::ProperName => "name",
        }
    }
}

/// Grammatical role of a markable in its clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrammaticalRole {
    /// Subject (`SB`)
    Subject,
    /// Direct (accusative) object (`OA`)
    DirectObject,
    /// Indirect (dative) object (`DA`)
    IndirectObject,
    /// Oblique argument or modifier-internal position
    Oblique,
    /// Anything else
    Other,
}

impl GrammaticalRole {
    /// Role for a dependency relation.
    #[must_use]
    pub fn from_deprel(deprel: &DepRel) -> Self {
        match deprel {
            DepRel::Subject => GrammaticalRole::Subject,
            DepRel::DirectObject => GrammaticalRole::DirectObject,
            DepRel::IndirectObject => GrammaticalRole::IndirectObject,
            DepRel::Modifier => GrammaticalRole::Oblique,
            _ => GrammaticalRole::Other,
        }
    }
}

/// A candidate referring expression: a token span anchored at its head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markable {
    /// Document-level sentence index.
    pub sentence: usize,
    /// Sentence-relative index of the head token.
    pub head: usize,
    /// Inclusive token range covered by the markable.
    pub span: (usize, usize),
    /// Kind of referring expression.
    pub kind: MarkableKind,
    /// Surface form of the head token.
    pub form: String,
    /// Lemma of the head token.
    pub lemma: String,
    /// Morphological features of the head token.
    pub morph: MorphFeatures,
    /// Grammatical role of the head token.
    pub role: GrammaticalRole,
    /// The head sits inside a larger extracted markable.
    pub embedded: bool,
    /// The markable sits inside an adverbial (modifier) subtree.
    pub adverbial: bool,
    /// The markable is an argument of an existential construction.
    pub existential: bool,
}

impl Markable {
    /// Does this markable's span properly or fully contain `other`'s?
    ///
    /// Only meaningful within one sentence; cross-sentence markables never
    /// contain each other.
    #[must_use]
    pub fn contains(&self, other: &Markable) -> bool {
        self.sentence == other.sentence
            && self.span.0 <= other.span.0
            && other.span.1 <= self.span.1
    }

    /// Does this markable precede `other` in sentence-then-token order?
    #[must_use]
    pub fn precedes(&self, other: &Markable) -> bool {
        (self.sentence, self.head) < (other.sentence, other.head)
    }

    /// Shorthand for `self.kind.is_pronominal()`.
    #[must_use]
    pub fn is_pronominal(&self) -> bool {
        self.kind.is_pronominal()
    }

    /// Shorthand for `self.kind.is_nominal()`.
    #[must_use]
    pub fn is_nominal(&self) -> bool {
        self.kind.is_nominal()
    }
}

impl std::fmt::Display for Markable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "\"{}\" ({}, s{} t{}-{})",
            self.form,
            self.kind.as_str(),
            self.sentence,
            self.span.0,
            self.span.1
        )
    }
}
