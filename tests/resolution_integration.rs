//! Integration tests for the full resolution pipeline:
//! extraction → filters → salience → chains.

use anaphor::{
    resolve_document, ChainSet, DepRel, Document, Gender, MorphFeatures, Number, Person, PosTag,
    Resolver, ResolverConfig, SalienceRegistry, SalienceWeights, Sentence, Token,
};

// =============================================================================
// Document builders
// =============================================================================

fn tok(index: usize, form: &str, lemma: &str, pos: &str, rel: &str, head: Option<usize>) -> Token {
    let mut token = Token::new(index, form, lemma)
        .with_pos(PosTag::from_stts(pos))
        .with_deprel(DepRel::from_tiger(rel));
    if let Some(h) = head {
        token = token.with_head(h);
    }
    token
}

fn fem_sg() -> MorphFeatures {
    MorphFeatures::new()
        .gender(Gender::Feminine)
        .number(Number::Singular)
}

fn masc_sg() -> MorphFeatures {
    MorphFeatures::new()
        .gender(Gender::Masculine)
        .number(Number::Singular)
}

/// "Anna kam nach Hause ."
fn anna_kam_nach_hause() -> Sentence {
    Sentence::new(vec![
        tok(0, "Anna", "Anna", "NE", "SB", Some(1)).with_morph(fem_sg()),
        tok(1, "kam", "kommen", "VVFIN", "ROOT", None),
        tok(2, "nach", "nach", "APPR", "MO", Some(1)),
        tok(3, "Hause", "Haus", "NN", "NK", Some(2)),
        tok(4, ".", ".", "$.", "PUNC", Some(1)),
    ])
}

/// "Sie war müde ."
fn sie_war_muede() -> Sentence {
    Sentence::new(vec![
        tok(0, "Sie", "sie", "PPER", "SB", Some(1))
            .with_morph(fem_sg().person(Person::Third)),
        tok(1, "war", "sein", "VAFIN", "ROOT", None),
        tok(2, "müde", "müde", "ADJD", "PD", Some(1)),
        tok(3, ".", ".", "$.", "PUNC", Some(1)),
    ])
}

/// "Der Mann traf den Jungen ."
fn mann_traf_jungen() -> Sentence {
    Sentence::new(vec![
        tok(0, "Der", "der", "ART", "NK", Some(1)),
        tok(1, "Mann", "Mann", "NN", "SB", Some(2)).with_morph(masc_sg()),
        tok(2, "traf", "treffen", "VVFIN", "ROOT", None),
        tok(3, "den", "der", "ART", "NK", Some(4)),
        tok(4, "Jungen", "Junge", "NN", "OA", Some(2)).with_morph(masc_sg()),
        tok(5, ".", ".", "$.", "PUNC", Some(2)),
    ])
}

/// "Er lachte ."
fn er_lachte() -> Sentence {
    Sentence::new(vec![
        tok(0, "Er", "er", "PPER", "SB", Some(1))
            .with_morph(masc_sg().person(Person::Third)),
        tok(1, "lachte", "lachen", "VVFIN", "ROOT", None),
        tok(2, ".", ".", "$.", "PUNC", Some(1)),
    ])
}

/// "Es regnet ." (no markables: pleonastic *es*)
fn es_regnet() -> Sentence {
    Sentence::new(vec![
        tok(0, "Es", "es", "PPER", "SB", Some(1)),
        tok(1, "regnet", "regnen", "VVFIN", "ROOT", None),
        tok(2, ".", ".", "$.", "PUNC", Some(1)),
    ])
}

fn chain_texts(chains: &ChainSet) -> Vec<Vec<String>> {
    chains
        .chains
        .iter()
        .map(|c| c.mentions.iter().map(|m| m.text.clone()).collect())
        .collect()
}

/// Partition invariant: every mention location occurs in exactly one chain.
fn assert_strict_partition(chains: &ChainSet) {
    let mut seen = std::collections::HashSet::new();
    for chain in &chains.chains {
        for mention in &chain.mentions {
            assert!(
                seen.insert((mention.sentence, mention.span)),
                "mention at {:?} appears in two chains",
                (mention.sentence, mention.span)
            );
        }
    }
}

/// Antecedents strictly precede their anaphors in every chain.
fn assert_no_cataphora(chains: &ChainSet) {
    for chain in &chains.chains {
        for pair in chain.mentions.windows(2) {
            let earlier = (pair[0].sentence, pair[0].span.0);
            let later = (pair[1].sentence, pair[1].span.0);
            assert!(
                earlier < later,
                "mention {:?} resolved to a following mention {:?}",
                later,
                earlier
            );
        }
    }
}

// =============================================================================
// Scenarios from the system description
// =============================================================================

#[test]
fn scenario_a_pronoun_resolves_to_matching_name() {
    // "Anna kam nach Hause. Sie war müde."
    let document = Document::new(vec![anna_kam_nach_hause(), sie_war_muede()]);
    let chains = resolve_document(&document);

    assert_strict_partition(&chains);
    assert_no_cataphora(&chains);
    assert_eq!(
        chain_texts(&chains),
        vec![vec!["Anna".to_string(), "Sie".to_string()]],
        "Sie must form a two-member chain with Anna"
    );
}

#[test]
fn scenario_b_subject_beats_object_on_salience() {
    // "Der Mann traf den Jungen. Er lachte." Both candidates agree with
    // "Er"; the subject must win through the subject-emphasis weight.
    let document = Document::new(vec![mann_traf_jungen(), er_lachte()]);
    let chains = resolve_document(&document);

    assert_strict_partition(&chains);
    let er_chain = chains
        .chains
        .iter()
        .find(|c| c.mentions.iter().any(|m| m.text == "Er"))
        .expect("Er should be in some chain");
    assert!(
        er_chain.mentions.iter().any(|m| m.text == "Der Mann"),
        "Er should resolve to the subject, got {:?}",
        chain_texts(&chains)
    );
}

#[test]
fn scenario_c_document_initial_pronoun_starts_a_singleton() {
    let document = Document::new(vec![er_lachte()]);
    let chains = resolve_document(&document);

    assert_eq!(chains.len(), 1);
    assert!(chains.chains[0].is_singleton());
    assert_eq!(chains.chains[0].mentions[0].text, "Er");
}

#[test]
fn scenario_d_candidates_outside_the_window_never_link() {
    // Anna, then five markable-free sentences, then "Sie war müde."
    let mut sentences = vec![anna_kam_nach_hause()];
    for _ in 0..5 {
        sentences.push(es_regnet());
    }
    sentences.push(sie_war_muede());
    let document = Document::new(sentences);

    let chains = resolve_document(&document);
    assert!(
        chains.chains.iter().all(|c| c.is_singleton()),
        "a candidate 6 sentences back is outside the default window of 4: {:?}",
        chain_texts(&chains)
    );

    // With a wider window the same document links up.
    let wide = Resolver::new(ResolverConfig {
        recency_window: 10,
        ..Default::default()
    })
    .expect("valid config");
    let chains = wide.resolve(&document);
    assert_eq!(chains.non_singletons().count(), 1);
}

// =============================================================================
// Hard-filter guarantees
// =============================================================================

#[test]
fn agreement_overrides_salience() {
    // "Der Mann traf Anna. Sie lachte." The masculine subject is more
    // salient, but "Sie" is feminine and must link to Anna.
    let first = Sentence::new(vec![
        tok(0, "Der", "der", "ART", "NK", Some(1)),
        tok(1, "Mann", "Mann", "NN", "SB", Some(2)).with_morph(masc_sg()),
        tok(2, "traf", "treffen", "VVFIN", "ROOT", None),
        tok(3, "Anna", "Anna", "NE", "OA", Some(2)).with_morph(fem_sg()),
        tok(4, ".", ".", "$.", "PUNC", Some(2)),
    ]);
    let second = Sentence::new(vec![
        tok(0, "Sie", "sie", "PPER", "SB", Some(1))
            .with_morph(fem_sg().person(Person::Third)),
        tok(1, "lachte", "lachen", "VVFIN", "ROOT", None),
        tok(2, ".", ".", "$.", "PUNC", Some(1)),
    ]);
    let chains = resolve_document(&Document::new(vec![first, second]));

    let sie_chain = chains
        .chains
        .iter()
        .find(|c| c.mentions.iter().any(|m| m.text == "Sie"))
        .expect("Sie chain");
    assert!(
        sie_chain.mentions.iter().any(|m| m.text == "Anna"),
        "gender agreement must override salience: {:?}",
        chain_texts(&chains)
    );
}

#[test]
fn non_reflexive_pronoun_never_binds_a_clause_mate() {
    // "Der Mann sah ihn .": "ihn" must not corefer with "Der Mann".
    let document = Document::new(vec![Sentence::new(vec![
        tok(0, "Der", "der", "ART", "NK", Some(1)),
        tok(1, "Mann", "Mann", "NN", "SB", Some(2)).with_morph(masc_sg()),
        tok(2, "sah", "sehen", "VVFIN", "ROOT", None),
        tok(3, "ihn", "er", "PPER", "OA", Some(2))
            .with_morph(masc_sg().person(Person::Third)),
        tok(4, ".", ".", "$.", "PUNC", Some(2)),
    ])]);
    let chains = resolve_document(&document);
    assert!(
        chains.chains.iter().all(|c| c.is_singleton()),
        "co-arguments must stay apart: {:?}",
        chain_texts(&chains)
    );
}

#[test]
fn reflexive_binds_inside_its_clause() {
    // "Der Mann wusch sich ."
    let document = Document::new(vec![Sentence::new(vec![
        tok(0, "Der", "der", "ART", "NK", Some(1)),
        tok(1, "Mann", "Mann", "NN", "SB", Some(2)).with_morph(masc_sg()),
        tok(2, "wusch", "waschen", "VVFIN", "ROOT", None),
        tok(3, "sich", "sich", "PRF", "OA", Some(2)).with_morph(
            MorphFeatures::new().person(Person::Third),
        ),
        tok(4, ".", ".", "$.", "PUNC", Some(2)),
    ])]);
    let chains = resolve_document(&document);
    assert_eq!(
        chain_texts(&chains),
        vec![vec!["Der Mann".to_string(), "sich".to_string()]]
    );
}

#[test]
fn reflexive_ignores_candidates_outside_its_clause() {
    // "Der Mann schlief , weil Anna sich wusch .": "sich" sits in the
    // subordinate clause, so only "Anna" is a possible antecedent.
    let document = Document::new(vec![Sentence::new(vec![
        tok(0, "Der", "der", "ART", "NK", Some(1)),
        tok(1, "Mann", "Mann", "NN", "SB", Some(2)).with_morph(masc_sg()),
        tok(2, "schlief", "schlafen", "VVFIN", "ROOT", None),
        tok(3, ",", ",", "$,", "PUNC", Some(2)),
        tok(4, "weil", "weil", "KOUS", "CP", Some(7)),
        tok(5, "Anna", "Anna", "NE", "SB", Some(7)).with_morph(fem_sg()),
        tok(6, "sich", "sich", "PRF", "OA", Some(7)).with_morph(
            MorphFeatures::new().person(Person::Third),
        ),
        tok(7, "wusch", "waschen", "VVFIN", "MO", Some(2)),
        tok(8, ".", ".", "$.", "PUNC", Some(2)),
    ])]);
    let chains = resolve_document(&document);

    let sich_chain = chains
        .chains
        .iter()
        .find(|c| c.mentions.iter().any(|m| m.text == "sich"))
        .expect("sich chain");
    assert!(
        sich_chain.mentions.iter().any(|m| m.text == "Anna"),
        "reflexive must bind the clause-mate: {:?}",
        chain_texts(&chains)
    );
}

// =============================================================================
// Model properties
// =============================================================================

#[test]
fn resolution_is_deterministic() {
    let document = Document::new(vec![
        mann_traf_jungen(),
        er_lachte(),
        anna_kam_nach_hause(),
        sie_war_muede(),
    ]);
    let first = resolve_document(&document);
    let second = resolve_document(&document);
    assert_eq!(first, second, "identical input must yield identical chains");
}

#[test]
fn decay_is_exactly_exponential() {
    use anaphor::{GrammaticalRole, Markable, MarkableKind};

    let weights = SalienceWeights::default();
    let mut registry = SalienceRegistry::new();
    let entity = registry.introduce(
        Markable {
            sentence: 0,
            head: 0,
            span: (0, 0),
            kind: MarkableKind::ProperName,
            form: "Anna".to_string(),
            lemma: "Anna".to_string(),
            morph: MorphFeatures::default(),
            role: GrammaticalRole::Subject,
            embedded: false,
            adverbial: false,
            existential: false,
        },
        &weights,
    );

    let initial = registry.entity(entity).weights.total();
    let decay = 0.7;
    let mut previous = initial;
    for boundary in 1..=6 {
        registry.decay_unmentioned(boundary, decay);
        let current = registry.entity(entity).weights.total();
        assert!(current <= previous, "decay must be monotone");
        let expected = initial * decay.powi(boundary as i32);
        assert!(
            (current - expected).abs() < 1e-9,
            "after {} boundaries expected {}, got {}",
            boundary,
            expected,
            current
        );
        previous = current;
    }
}

#[test]
fn malformed_sentence_is_skipped_not_fatal() {
    // The middle sentence has a token without POS annotation.
    let broken = Sentence::new(vec![
        Token::new(0, "kaputt", "kaputt").with_deprel(DepRel::Root),
    ]);
    let document = Document::new(vec![anna_kam_nach_hause(), broken, sie_war_muede()]);
    let chains = resolve_document(&document);

    assert_eq!(chains.skipped_sentences, vec![1]);
    assert_eq!(
        chain_texts(&chains),
        vec![vec!["Anna".to_string(), "Sie".to_string()]],
        "resolution continues across the skipped sentence"
    );
}

#[test]
fn bracketed_rendering_shows_resolved_chains() {
    let document = Document::new(vec![anna_kam_nach_hause(), sie_war_muede()]);
    let chains = resolve_document(&document);
    let rendered = chains.render_bracketed(&document);
    assert_eq!(
        rendered,
        "[Anna]_{0} kam nach Hause .\n[Sie]_{0} war müde ."
    );
}

#[test]
fn entity_grid_tracks_roles_across_sentences() {
    use anaphor::GrammaticalRole;

    let document = Document::new(vec![mann_traf_jungen(), er_lachte()]);
    let chains = resolve_document(&document);
    let grid = chains.entity_grid(&document);

    // One non-singleton chain (Mann + Er), subject in both sentences.
    assert_eq!(grid[0][0], vec![GrammaticalRole::Subject]);
    assert_eq!(grid[1][0], vec![GrammaticalRole::Subject]);
}

#[test]
fn partial_config_files_fill_in_defaults() {
    let config: ResolverConfig =
        serde_json::from_str(r#"{ "recency_window": 2, "decay_factor": 0.8 }"#)
            .expect("partial config should deserialize");
    assert_eq!(config.recency_window, 2);
    assert_eq!(config.decay_factor, 0.8);
    assert_eq!(config.weights, SalienceWeights::default());
    assert!(config.validate().is_ok());
}
