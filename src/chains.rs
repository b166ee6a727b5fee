//! Coreference chains: the externally visible partition of markables.
//!
//! A chain is the ordered mention list of one discourse entity. The
//! partition is strict: every extracted markable belongs to exactly one
//! chain, and a one-mention chain means "unresolved". Consumers that write
//! standoff or inline annotation formats work from the (sentence, span)
//! pairs; the bracketed rendering here is a debugging aid, not an output
//! format.

use serde::{Deserialize, Serialize};

use crate::markable::GrammaticalRole;
use crate::salience::{EntityId, SalienceRegistry};
use crate::token::Document;

/// One mention of a chain: where it is and what it looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainMention {
    /// Sentence index.
    pub sentence: usize,
    /// Inclusive token range within the sentence.
    pub span: (usize, usize),
    /// Surface text of the span.
    pub text: String,
    /// Grammatical role of the mention's head.
    pub role: GrammaticalRole,
}

/// One coreference chain, in document order of its mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// Id of the discourse entity behind this chain.
    pub entity: EntityId,
    /// Mentions in resolution order.
    pub mentions: Vec<ChainMention>,
}

impl Chain {
    /// Number of mentions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    /// True if the chain has no mentions (never produced by the resolver).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    /// A chain with a single mention denotes an unresolved markable.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.mentions.len() == 1
    }
}

/// The full partition produced by one document pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSet {
    /// All chains, singletons included, in entity-introduction order.
    pub chains: Vec<Chain>,
    /// Sentences that were skipped as malformed.
    pub skipped_sentences: Vec<usize>,
}

impl ChainSet {
    /// Build the partition from a finished registry.
    pub(crate) fn from_registry(
        registry: &SalienceRegistry,
        document: &Document,
        skipped_sentences: Vec<usize>,
    ) -> Self {
        let chains = registry
            .entities()
            .iter()
            .map(|entity| Chain {
                entity: entity.id,
                mentions: entity
                    .mentions
                    .iter()
                    .map(|&id| {
                        let markable = registry.markable(id);
                        let tokens = &document.sentences[markable.sentence].tokens;
                        let forms: Vec<&str> = tokens[markable.span.0..=markable.span.1]
                            .iter()
                            .map(|t| t.form.as_str())
                            .collect();
                        ChainMention {
                            sentence: markable.sentence,
                            span: markable.span,
                            text: forms.join(" "),
                            role: markable.role,
                        }
                    })
                    .collect(),
            })
            .collect();
        Self {
            chains,
            skipped_sentences,
        }
    }

    /// Number of chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// True if no chains were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Chains with more than one mention.
    pub fn non_singletons(&self) -> impl Iterator<Item = &Chain> {
        self.chains.iter().filter(|c| !c.is_singleton())
    }

    /// Total number of mentions across all chains.
    #[must_use]
    pub fn mention_count(&self) -> usize {
        self.chains.iter().map(Chain::len).sum()
    }

    /// Re-render the document with chain-id brackets around every mention
    /// of a non-singleton chain, one line per sentence:
    ///
    /// ```text
    /// [Anna]_{0} kam nach Hause .
    /// [Sie]_{0} war müde .
    /// ```
    #[must_use]
    pub fn render_bracketed(&self, document: &Document) -> String {
        let mut lines = Vec::with_capacity(document.len());
        for (index, sentence) in document.sentences.iter().enumerate() {
            // (entity, span) pairs of this sentence, outer spans first.
            let mut here: Vec<(EntityId, (usize, usize))> = self
                .non_singletons()
                .flat_map(|chain| {
                    chain
                        .mentions
                        .iter()
                        .filter(|m| m.sentence == index)
                        .map(|m| (chain.entity, m.span))
                        .collect::<Vec<_>>()
                })
                .collect();
            here.sort_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)));

            let mut line = String::new();
            for (t, token) in sentence.tokens.iter().enumerate() {
                if t > 0 {
                    line.push(' ');
                }
                let opening = here.iter().filter(|&&(_, span)| span.0 == t).count();
                for _ in 0..opening {
                    line.push('[');
                }
                line.push_str(&token.form);
                // inner spans close before outer ones
                let mut closing: Vec<&(EntityId, (usize, usize))> =
                    here.iter().filter(|&&(_, span)| span.1 == t).collect();
                closing.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));
                for (entity, _) in closing {
                    line.push_str(&format!("]_{{{}}}", entity));
                }
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    /// Role grid: for every sentence, the grammatical roles each
    /// non-singleton chain realizes there. Indexed
    /// `grid[sentence][chain_rank]`, chain rank following
    /// [`ChainSet::non_singletons`] order.
    #[must_use]
    pub fn entity_grid(&self, document: &Document) -> Vec<Vec<Vec<GrammaticalRole>>> {
        let chains: Vec<&Chain> = self.non_singletons().collect();
        (0..document.len())
            .map(|sentence| {
                chains
                    .iter()
                    .map(|chain| {
                        chain
                            .mentions
                            .iter()
                            .filter(|m| m.sentence == sentence)
                            .map(|m| m.role)
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
