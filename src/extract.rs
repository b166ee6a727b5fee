//! Markable extraction from parsed sentences.
//!
//! Extraction is a pure function of one sentence: it never touches
//! document state. A token heads a markable if it is a pronoun, a common
//! noun with a determiner or possessive inside its noun kernel, or a
//! proper noun that is not a mere name component. Pleonastic *es* under an
//! expletive verb is excluded. Nested markables (a possessive inside a
//! larger NP) are extracted separately at their own heads.

use crate::config::ResolverConfig;
use crate::markable::{GrammaticalRole, Markable, MarkableKind};
use crate::token::{DepRel, PosTag, Sentence, Token};

/// Relations that belong to a noun's own phrase: determiners and
/// attributes, name components, genitive attributes. Clausal dependents
/// (relative clauses, appositions) stay outside the span.
fn in_noun_phrase(rel: &DepRel) -> bool {
    matches!(
        rel,
        DepRel::NounKernel | DepRel::NameComponent | DepRel::GenitiveAttribute
    )
}

/// Extracts the ordered markable list from parsed sentences.
#[derive(Debug, Clone, Copy)]
pub struct MarkableExtractor<'a> {
    config: &'a ResolverConfig,
}

impl<'a> MarkableExtractor<'a> {
    /// Create an extractor over a configuration.
    #[must_use]
    pub fn new(config: &'a ResolverConfig) -> Self {
        Self { config }
    }

    /// Extract all markables of `sentence`, in left-to-right head order.
    ///
    /// The sentence is expected to have passed [`Sentence::validate`];
    /// tokens with missing annotations are silently skipped here.
    #[must_use]
    pub fn extract(&self, sentence_index: usize, sentence: &Sentence) -> Vec<Markable> {
        let mut markables: Vec<Markable> = Vec::new();

        for token in &sentence.tokens {
            let Some(pos) = &token.pos else { continue };
            let Some(kind) = MarkableKind::from_pos(pos) else {
                continue;
            };

            match kind {
                // Non-head parts of a multiword name are covered by the
                // head's span, not extracted on their own.
                MarkableKind::ProperName => {
                    if token.deprel == Some(DepRel::NameComponent) {
                        continue;
                    }
                }
                // Bare common nouns ("nach Hause") are not referring
                // expressions; require a determiner or possessive.
                MarkableKind::CommonNoun => {
                    if !self.has_determiner(sentence, token.index) {
                        continue;
                    }
                }
                MarkableKind::PersonalPronoun => {
                    if self.is_pleonastic(sentence, token) {
                        continue;
                    }
                }
                _ => {}
            }

            let span = if kind.is_nominal() {
                sentence.projection(token.index, in_noun_phrase)
            } else {
                (token.index, token.index)
            };

            markables.push(Markable {
                sentence: sentence_index,
                head: token.index,
                span,
                kind,
                form: token.form.clone(),
                lemma: token.lemma.clone(),
                morph: token.morph,
                role: self.role_of(sentence, token),
                embedded: false,
                adverbial: self.is_adverbial(sentence, token),
                existential: self.is_existential(sentence, token),
            });
        }

        // A markable is embedded when another markable's span properly
        // contains it ("sein" inside "sein Haus").
        for i in 0..markables.len() {
            let embedded = markables.iter().enumerate().any(|(j, outer)| {
                j != i && outer.span != markables[i].span && outer.contains(&markables[i])
            });
            markables[i].embedded = embedded;
        }

        markables
    }

    fn role_of(&self, _sentence: &Sentence, token: &Token) -> GrammaticalRole {
        token
            .deprel
            .as_ref()
            .map(GrammaticalRole::from_deprel)
            .unwrap_or(GrammaticalRole::Other)
    }

    fn has_determiner(&self, sentence: &Sentence, index: usize) -> bool {
        sentence.children(index).into_iter().any(|child| {
            matches!(
                sentence.tokens[child].pos,
                Some(PosTag::Determiner) | Some(PosTag::PossessivePronoun)
            )
        })
    }

    /// Pleonastic *es*: the pronoun form *es* dominated by one of the
    /// configured expletive verbs ("es gibt", "es regnet").
    fn is_pleonastic(&self, sentence: &Sentence, token: &Token) -> bool {
        if !token.form.eq_ignore_ascii_case("es") {
            return false;
        }
        sentence
            .ancestors(token.index)
            .into_iter()
            .any(|a| self.config.expletive_verbs.contains(&sentence.tokens[a].lemma))
    }

    /// Inside an adverbial phrase: the token itself or any ancestor is a
    /// modifier dependent.
    fn is_adverbial(&self, sentence: &Sentence, token: &Token) -> bool {
        if token.deprel == Some(DepRel::Modifier) {
            return true;
        }
        sentence
            .ancestors(token.index)
            .into_iter()
            .any(|a| sentence.tokens[a].deprel == Some(DepRel::Modifier))
    }

    /// Argument of an existential construction: the nearest governing verb
    /// is an expletive verb and carries a pleonastic *es* dependent.
    fn is_existential(&self, sentence: &Sentence, token: &Token) -> bool {
        let Some(verb) = sentence
            .ancestors(token.index)
            .into_iter()
            .find(|&a| sentence.tokens[a].pos == Some(PosTag::Verb))
        else {
            return false;
        };
        if !self.config.expletive_verbs.contains(&sentence.tokens[verb].lemma) {
            return false;
        }
        sentence
            .children(verb)
            .into_iter()
            .any(|c| sentence.tokens[c].form.eq_ignore_ascii_case("es"))
    }
}

// =============================================================================
// Tests
// =============================================================================
