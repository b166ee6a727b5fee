//! Hard filters over (anaphor, candidate) pairs.
//!
//! Each filter is an independent predicate; a candidate survives only if
//! every filter passes. The pipeline is a fixed-order table of named
//! functions rather than a trait hierarchy, so the set reads as data:
//! recency window, i-within-i, morphological agreement, binding
//! principles, semantic class. Evaluation short-circuits on the first
//! rejection.
//!
//! An empty admissible set is a normal outcome, not an error: the anaphor
//! then introduces a singleton entity.

use crate::config::ResolverConfig;
use crate::markable::{Markable, MarkableKind};
use crate::salience::DiscourseEntity;
use crate::token::Document;

/// Everything a filter may consult for one (anaphor, candidate) pair.
///
/// `entity` is the discourse entity behind the candidate mention;
/// `markables` is the document-pass arena, used to look up the entity's
/// co-mentions for the binding principles.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    /// Resolver configuration (window size, exception lists).
    pub config: &'a ResolverConfig,
    /// The document being resolved.
    pub document: &'a Document,
    /// The anaphor under resolution.
    pub anaphor: &'a Markable,
    /// The candidate antecedent mention.
    pub candidate: &'a Markable,
    /// Entity the candidate mention belongs to.
    pub entity: &'a DiscourseEntity,
    /// Markable arena for co-mention lookups.
    pub markables: &'a [Markable],
}

type FilterFn = fn(&FilterContext<'_>) -> bool;

/// One named predicate of the pipeline.
pub struct NamedFilter {
    /// Filter name, used in trace logging.
    pub name: &'static str,
    apply: FilterFn,
}

impl NamedFilter {
    /// Does the candidate survive this filter?
    #[must_use]
    pub fn passes(&self, ctx: &FilterContext<'_>) -> bool {
        (self.apply)(ctx)
    }
}

/// The filter pipeline, in its fixed evaluation order.
pub const FILTERS: &[NamedFilter] = &[
    NamedFilter { name: "recency", apply: recency },
    NamedFilter { name: "span", apply: span },
    NamedFilter { name: "agreement", apply: agreement },
    NamedFilter { name: "binding", apply: binding },
    NamedFilter { name: "semantic", apply: semantic },
];

/// Run the whole pipeline for one pair.
#[must_use]
pub fn admissible(ctx: &FilterContext<'_>) -> bool {
    for filter in FILTERS {
        if !filter.passes(ctx) {
            log::trace!(
                "filter {} rejected {} as antecedent of {}",
                filter.name,
                ctx.candidate,
                ctx.anaphor
            );
            return false;
        }
    }
    true
}

// =============================================================================
// Individual filters
// =============================================================================

/// The candidate must precede the anaphor (no cataphora) and lie within
/// the configured sentence window.
fn recency(ctx: &FilterContext<'_>) -> bool {
    if !ctx.candidate.precedes(ctx.anaphor) {
        return false;
    }
    ctx.anaphor.sentence - ctx.candidate.sentence <= ctx.config.recency_window
}

/// i-within-i: a markable is never its own antecedent, and neither span
/// may contain the other ("sein Haus" cannot antecede its own "sein").
fn span(ctx: &FilterContext<'_>) -> bool {
    let ana = ctx.anaphor;
    let cand = ctx.candidate;
    if ana.sentence == cand.sentence && ana.head == cand.head {
        return false;
    }
    !(cand.contains(ana) || ana.contains(cand))
}

/// Morphological agreement under underspecification.
///
/// Gender, person and number must be compatible; an absent feature never
/// conflicts. Possessive anaphors skip the number check (their number
/// tracks the possessed noun, not the antecedent), and lemmas in the
/// configured syncretism lists skip the affected feature.
fn agreement(ctx: &FilterContext<'_>) -> bool {
    let ana = ctx.anaphor;
    let cand = ctx.candidate;
    let exceptions = &ctx.config.agreement;

    if !ana.morph.agrees_gender(&cand.morph) {
        return false;
    }
    if !exceptions.skips_person(&ana.lemma, &cand.lemma)
        && !ana.morph.agrees_person(&cand.morph)
    {
        return false;
    }
    let skip_number = ana.kind == MarkableKind::PossessivePronoun
        || exceptions.skips_number(&ana.lemma, &cand.lemma);
    if !skip_number && !ana.morph.agrees_number(&cand.morph) {
        return false;
    }
    true
}

/// Binding principles over the anaphor's minimal clause.
///
/// The binding category is the delimiter-bounded clause around the
/// anaphor (see [`crate::token::Sentence::clause_span`]):
///
/// - A reflexive must find its antecedent inside that clause, in the same
///   sentence.
/// - An irreflexive personal pronoun must be free there: no mention of
///   the candidate's entity may sit inside the clause (a reflexive or
///   possessive candidate mention is exempt).
/// - A nominal anaphor must be free in its whole sentence.
fn binding(ctx: &FilterContext<'_>) -> bool {
    let ana = ctx.anaphor;
    let sentence = &ctx.document.sentences[ana.sentence];

    match ana.kind {
        MarkableKind::ReflexivePronoun => {
            if ctx.candidate.sentence != ana.sentence {
                return false;
            }
            let (lo, hi) = sentence.clause_span(ana.head);
            (lo..=hi).contains(&ctx.candidate.head)
        }
        MarkableKind::PersonalPronoun => {
            if matches!(
                ctx.candidate.kind,
                MarkableKind::ReflexivePronoun | MarkableKind::PossessivePronoun
            ) {
                return true;
            }
            let (lo, hi) = sentence.clause_span(ana.head);
            !ctx.entity.mentions.iter().any(|&id| {
                let mention = &ctx.markables[id];
                mention.sentence == ana.sentence && (lo..=hi).contains(&mention.head)
            })
        }
        MarkableKind::CommonNoun | MarkableKind::ProperName => !ctx
            .entity
            .mentions
            .iter()
            .any(|&id| ctx.markables[id].sentence == ana.sentence),
        _ => true,
    }
}

/// Semantic class: animacy values, when both sides carry one, must match.
fn semantic(ctx: &FilterContext<'_>) -> bool {
    ctx.anaphor.morph.agrees_animacy(&ctx.candidate.morph)
}

// =============================================================================
// Tests
// =============================================================================
