//! Parsed input model: tokens, sentences, documents.
//!
//! The resolver does not parse text itself. It consumes sentences that an
//! external dependency parser has already annotated with part-of-speech,
//! morphology and dependency relations, one [`Token`] per surface token.
//!
//! Tag constructors follow the German STTS tagset ([`PosTag::from_stts`])
//! and the TIGER dependency labels ([`DepRel::from_tiger`]), with an
//! `Other` passthrough for everything the resolver does not interpret.
//! Morphological features are all optional: an absent feature means
//! *underspecified*, never *mismatching*.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// =============================================================================
// Morphological features
// =============================================================================

/// Grammatical gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Masculine
    Masculine,
    /// Feminine
    Feminine,
    /// Neuter
    Neuter,
}

/// Grammatical number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Number {
    /// Singular
    Singular,
    /// Plural
    Plural,
}

/// Grammatical person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    /// First person (speaker)
    First,
    /// Second person (addressee)
    Second,
    /// Third person
    Third,
}

/// Grammatical case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Case {
    /// Nominative
    Nominative,
    /// Genitive
    Genitive,
    /// Dative
    Dative,
    /// Accusative
    Accusative,
}

/// Semantic animacy class, where the annotation layer provides one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Animacy {
    /// Animate referent
    Animate,
    /// Inanimate referent
    Inanimate,
}

/// Morphological feature set of a token.
///
/// Every feature is optional. Agreement checks treat an absent feature as
/// compatible with anything (principle of underspecification): only two
/// *specified* but different values count as a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MorphFeatures {
    /// Grammatical gender, if annotated.
    pub gender: Option<Gender>,
    /// Grammatical number, if annotated.
    pub number: Option<Number>,
    /// Grammatical person, if annotated.
    pub person: Option<Person>,
    /// Grammatical case, if annotated.
    pub case: Option<Case>,
    /// Animacy class, if annotated.
    pub animacy: Option<Animacy>,
}

fn compatible<T: PartialEq + Copy>(a: Option<T>, b: Option<T>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x == y,
        _ => true,
    }
}

impl MorphFeatures {
    /// Empty (fully underspecified) feature set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set gender.
    #[must_use]
    pub fn gender(mut self, g: Gender) -> Self {
        self.gender = Some(g);
        self
    }

    /// Set number.
    #[must_use]
    pub fn number(mut self, n: Number) -> Self {
        self.number = Some(n);
        self
    }

    /// Set person.
    #[must_use]
    pub fn person(mut self, p: Person) -> Self {
        self.person = Some(p);
        self
    }

    /// Set case.
    #[must_use]
    pub fn case(mut self, c: Case) -> Self {
        self.case = Some(c);
        self
    }

    /// Set animacy.
    #[must_use]
    pub fn animacy(mut self, a: Animacy) -> Self {
        self.animacy = Some(a);
        self
    }

    /// Parse a `key=value|key=value` feature column (CoNLL style).
    ///
    /// Recognized keys: `gender` (masc/fem/neut), `number` (sg/pl),
    /// `person` (1/2/3), `case` (nom/gen/dat/acc), `animacy` (anim/inanim).
    /// Unknown keys and values are ignored, leaving the feature
    /// underspecified.
    #[must_use]
    pub fn parse(column: &str) -> Self {
        let mut features = Self::default();
        for pair in column.split('|') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match (key.trim(), value.trim()) {
                ("gender", "masc") => features.gender = Some(Gender::Masculine),
                ("gender", "fem") => features.gender = Some(Gender::Feminine),
                ("gender", "neut") => features.gender = Some(Gender::Neuter),
                ("number", "sg") => features.number = Some(Number::Singular),
                ("number", "pl") => features.number = Some(Number::Plural),
                ("person", "1") => features.person = Some(Person::First),
                ("person", "2") => features.person = Some(Person::Second),
                ("person", "3") => features.person = Some(Person::Third),
                ("case", "nom") => features.case = Some(Case::Nominative),
                ("case", "gen") => features.case = Some(Case::Genitive),
                ("case", "dat") => features.case = Some(Case::Dative),
                ("case", "acc") => features.case = Some(Case::Accusative),
                ("animacy", "anim") => features.animacy = Some(Animacy::Animate),
                ("animacy", "inanim") => features.animacy = Some(Animacy::Inanimate),
                _ => {}
            }
        }
        features
    }

    /// Gender compatibility under underspecification.
    #[must_use]
    pub fn agrees_gender(&self, other: &Self) -> bool {
        compatible(self.gender, other.gender)
    }

    /// Number compatibility under underspecification.
    #[must_use]
    pub fn agrees_number(&self, other: &Self) -> bool {
        compatible(self.number, other.number)
    }

    /// Person compatibility under underspecification.
    #[must_use]
    pub fn agrees_person(&self, other: &Self) -> bool {
        compatible(self.person, other.person)
    }

    /// Animacy compatibility under underspecification.
    #[must_use]
    pub fn agrees_animacy(&self, other: &Self) -> bool {
        compatible(self.animacy, other.animacy)
    }
}

// =============================================================================
// Part-of-speech tags
// =============================================================================

/// Part-of-speech tag, reduced to the distinctions the resolver needs.
///
/// Constructed from STTS tags via [`PosTag::from_stts`]; tags the resolver
/// does not interpret are carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    /// Common noun (STTS `NN`)
    CommonNoun,
    /// Proper noun (STTS `NE`)
    ProperNoun,
    /// Irreflexive personal pronoun (STTS `PPER`), e.g. *er*, *ihm*
    PersonalPronoun,
    /// Reflexive personal pronoun (STTS `PRF`), e.g. *sich*
    ReflexivePronoun,
    /// Attributive possessive pronoun (STTS `PPOSAT`), e.g. *sein* [Buch]
    PossessivePronoun,
    /// Substitutive demonstrative pronoun (STTS `PDS`), e.g. *dieser*
    DemonstrativePronoun,
    /// Substitutive relative pronoun (STTS `PRELS`), e.g. [der Hund,] *der*
    RelativePronoun,
    /// Determiner/article (STTS `ART`)
    Determiner,
    /// Any verb tag (STTS `V*`)
    Verb,
    /// Any other tag, carried through verbatim
    Other(String),
}

impl PosTag {
    /// Map an STTS tag string onto the resolver's tag set.
    #[must_use]
    pub fn from_stts(tag: &str) -> Self {
        match tag {
            "NN" => PosTag::CommonNoun,
            "NE" => PosTag::ProperNoun,
            "PPER" => PosTag::PersonalPronoun,
            "PRF" => PosTag::ReflexivePronoun,
            "PPOSAT" => PosTag::PossessivePronoun,
            "PDS" => PosTag::DemonstrativePronoun,
            "PRELS" => PosTag::RelativePronoun,
            "ART" => PosTag::Determiner,
            v if v.starts_with('V') => PosTag::Verb,
            other => PosTag::Other(other.to_string()),
        }
    }

    /// Canonical STTS-style label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            PosTag::CommonNoun => "NN",
            PosTag::ProperNoun => "NE",
            PosTag::PersonalPronoun => "PPER",
            PosTag::ReflexivePronoun => "PRF",
            PosTag::PossessivePronoun => "PPOSAT",
            PosTag::DemonstrativePronoun => "PDS",
            PosTag::RelativePronoun => "PRELS",
            PosTag::Determiner => "ART",
            PosTag::Verb => "V",
            PosTag::Other(s) => s.as_str(),
        }
    }

    /// Is this one of the pronoun tags the resolver treats as anaphoric?
    #[must_use]
    pub fn is_pronoun(&self) -> bool {
        matches!(
            self,
            PosTag::PersonalPronoun
                | PosTag::ReflexivePronoun
                | PosTag::PossessivePronoun
                | PosTag::DemonstrativePronoun
                | PosTag::RelativePronoun
        )
    }

    /// Is this a common or proper noun?
    #[must_use]
    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::CommonNoun | PosTag::ProperNoun)
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Dependency relations
// =============================================================================

/// Dependency relation of a token to its head.
///
/// Constructed from TIGER labels via [`DepRel::from_tiger`]; labels the
/// resolver does not interpret are carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepRel {
    /// Subject (`SB`)
    Subject,
    /// Accusative (direct) object (`OA`)
    DirectObject,
    /// Dative (indirect) object (`DA`)
    IndirectObject,
    /// Noun kernel element (`NK`): determiner, attributive adjective
    NounKernel,
    /// Proper-name component (`PNC`) inside a multiword name
    NameComponent,
    /// Genitive attribute (`AG`)
    GenitiveAttribute,
    /// Modifier (`MO`), typically adverbial or prepositional
    Modifier,
    /// Punctuation (`PUNC`, `--`)
    Punctuation,
    /// Coordinating conjunction (`CD`)
    Coordination,
    /// Conjunct (`CJ`)
    Conjunct,
    /// Root of the sentence
    Root,
    /// Any other label, carried through verbatim
    Other(String),
}

impl DepRel {
    /// Map a TIGER dependency label onto the resolver's relation set.
    #[must_use]
    pub fn from_tiger(label: &str) -> Self {
        match label {
            "SB" => DepRel::Subject,
            "OA" => DepRel::DirectObject,
            "DA" => DepRel::IndirectObject,
            "NK" => DepRel::NounKernel,
            "PNC" => DepRel::NameComponent,
            "AG" => DepRel::GenitiveAttribute,
            "MO" => DepRel::Modifier,
            "PUNC" | "--" => DepRel::Punctuation,
            "CD" => DepRel::Coordination,
            "CJ" => DepRel::Conjunct,
            "ROOT" => DepRel::Root,
            other => DepRel::Other(other.to_string()),
        }
    }

    /// Canonical TIGER-style label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            DepRel::Subject => "SB",
            DepRel::DirectObject => "OA",
            DepRel::IndirectObject => "DA",
            DepRel::NounKernel => "NK",
            DepRel::NameComponent => "PNC",
            DepRel::GenitiveAttribute => "AG",
            DepRel::Modifier => "MO",
            DepRel::Punctuation => "PUNC",
            DepRel::Coordination => "CD",
            DepRel::Conjunct => "CJ",
            DepRel::Root => "ROOT",
            DepRel::Other(s) => s.as_str(),
        }
    }

    /// Does this relation delimit a minimal clause?
    ///
    /// Clause spans are bounded by punctuation and coordination, following
    /// the delimiter-scan definition of the binding category.
    #[must_use]
    pub fn is_clause_delimiter(&self) -> bool {
        matches!(self, DepRel::Punctuation | DepRel::Coordination)
    }
}

impl std::fmt::Display for DepRel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Token
// =============================================================================

/// One surface token with its parser annotations. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Sentence-relative position (0-based).
    pub index: usize,
    /// Surface form.
    pub form: String,
    /// Lemma.
    pub lemma: String,
    /// Part-of-speech tag; `None` means the annotation is missing.
    pub pos: Option<PosTag>,
    /// Dependency relation to the head; `None` means missing.
    pub deprel: Option<DepRel>,
    /// Sentence-relative index of the syntactic head; `None` for the root.
    pub head: Option<usize>,
    /// Morphological features.
    pub morph: MorphFeatures,
}

impl Token {
    /// Create a token with no annotations beyond form and lemma.
    #[must_use]
    pub fn new(index: usize, form: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            index,
            form: form.into(),
            lemma: lemma.into(),
            pos: None,
            deprel: None,
            head: None,
            morph: MorphFeatures::default(),
        }
    }

    /// Set the POS tag.
    #[must_use]
    pub fn with_pos(mut self, pos: PosTag) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Set the dependency relation.
    #[must_use]
    pub fn with_deprel(mut self, deprel: DepRel) -> Self {
        self.deprel = Some(deprel);
        self
    }

    /// Set the head index.
    #[must_use]
    pub fn with_head(mut self, head: usize) -> Self {
        self.head = Some(head);
        self
    }

    /// Set the morphological features.
    #[must_use]
    pub fn with_morph(mut self, morph: MorphFeatures) -> Self {
        self.morph = morph;
        self
    }
}

// =============================================================================
// Sentence
// =============================================================================

/// An ordered token sequence with its dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Tokens in surface order.
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Create a sentence from tokens.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if the sentence has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check that every token carries the annotations the resolver needs.
    ///
    /// Requires a POS tag and a dependency relation on every token, and a
    /// head index that stays inside the sentence and is not the token
    /// itself. Markable extraction is skipped for sentences that fail.
    pub fn validate(&self) -> Result<()> {
        for token in &self.tokens {
            if token.pos.is_none() {
                return Err(Error::malformed(format!(
                    "token {} ({:?}) has no POS tag",
                    token.index, token.form
                )));
            }
            if token.deprel.is_none() {
                return Err(Error::malformed(format!(
                    "token {} ({:?}) has no dependency relation",
                    token.index, token.form
                )));
            }
            if let Some(head) = token.head {
                if head >= self.tokens.len() {
                    return Err(Error::malformed(format!(
                        "token {} has head {} outside the sentence",
                        token.index, head
                    )));
                }
                if head == token.index {
                    return Err(Error::malformed(format!(
                        "token {} is its own head",
                        token.index
                    )));
                }
            }
        }
        Ok(())
    }

    /// Indices of the direct dependents of `index`.
    #[must_use]
    pub fn children(&self, index: usize) -> Vec<usize> {
        self.tokens
            .iter()
            .filter(|t| t.head == Some(index))
            .map(|t| t.index)
            .collect()
    }

    /// Head chain from `index` up to the root, excluding `index` itself.
    ///
    /// Bounded by sentence length, so a cyclic head annotation cannot loop.
    #[must_use]
    pub fn ancestors(&self, index: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut current = index;
        for _ in 0..self.tokens.len() {
            match self.tokens.get(current).and_then(|t| t.head) {
                Some(head) if !chain.contains(&head) => {
                    chain.push(head);
                    current = head;
                }
                _ => break,
            }
        }
        chain
    }

    /// Number of dependency edges from `index` to the root.
    #[must_use]
    pub fn depth(&self, index: usize) -> usize {
        self.ancestors(index).len()
    }

    /// Contiguous span covered by `head` and the dependents reachable
    /// through relations accepted by `follow`, as an inclusive index range.
    #[must_use]
    pub fn projection<F>(&self, head: usize, follow: F) -> (usize, usize)
    where
        F: Fn(&DepRel) -> bool,
    {
        let mut lo = head;
        let mut hi = head;
        let mut queue = vec![head];
        let mut seen = vec![false; self.tokens.len()];
        if let Some(slot) = seen.get_mut(head) {
            *slot = true;
        }
        while let Some(node) = queue.pop() {
            for child in self.children(node) {
                if seen[child] {
                    continue;
                }
                let included = self.tokens[child]
                    .deprel
                    .as_ref()
                    .is_some_and(&follow);
                if included {
                    seen[child] = true;
                    lo = lo.min(child);
                    hi = hi.max(child);
                    queue.push(child);
                }
            }
        }
        (lo, hi)
    }

    /// Minimal clause around `index`, as an inclusive token range.
    ///
    /// The clause is the stretch between the nearest clause-delimiting
    /// tokens (punctuation, coordination) on either side, excluding the
    /// delimiters themselves.
    #[must_use]
    pub fn clause_span(&self, index: usize) -> (usize, usize) {
        let mut begin = 0;
        for i in (0..index).rev() {
            if self.tokens[i]
                .deprel
                .as_ref()
                .is_some_and(DepRel::is_clause_delimiter)
            {
                begin = i + 1;
                break;
            }
        }
        let mut end = self.tokens.len().saturating_sub(1);
        for (i, token) in self.tokens.iter().enumerate().skip(index + 1) {
            if token.deprel.as_ref().is_some_and(DepRel::is_clause_delimiter) {
                end = i.saturating_sub(1);
                break;
            }
        }
        (begin, end)
    }

    /// Surface text, forms joined by single spaces.
    #[must_use]
    pub fn text(&self) -> String {
        let forms: Vec<&str> = self.tokens.iter().map(|t| t.form.as_str()).collect();
        forms.join(" ")
    }
}

// =============================================================================
// Document
// =============================================================================

/// An ordered sequence of parsed sentences.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Sentences in document order.
    pub sentences: Vec<Sentence>,
}

impl Document {
    /// Create a document from sentences.
    #[must_use]
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    /// Number of sentences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// True if the document has no sentences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Document-wide token offset of each sentence start.
    ///
    /// Used for lexical distance between mentions in different sentences.
    #[must_use]
    pub fn token_offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.sentences.len());
        let mut total = 0;
        for sentence in &self.sentences {
            offsets.push(total);
            total += sentence.len();
        }
        offsets
    }
}

// =============================================================================
// Tests
// =============================================================================
