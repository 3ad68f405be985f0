use gamesearch_core::{
    BuildError, Document, EngineConfig, Relevance, SearchEngine, SearchError, SearchParams, SearchStatus,
};

fn space_corpus() -> Vec<Document> {
    vec![
        Document::new("a.html", "space adventure").with_title("Space RPG"),
        Document::new("b.html", "fast car").with_title("Racing"),
        Document::new("c.html", "space race rpg").with_title("Space Racing RPG"),
    ]
}

fn engine(docs: Vec<Document>) -> SearchEngine {
    SearchEngine::with_defaults(docs).expect("engine builds")
}

fn ids(report: &gamesearch_core::SearchReport) -> Vec<u32> {
    report.results.iter().map(|h| h.doc_id).collect()
}

#[test]
fn space_rpg_scenario() {
    let engine = engine(space_corpus());

    let ranked: Vec<u32> = engine.rank("space rpg").into_iter().map(|(d, _)| d).collect();
    assert_eq!(ranked, vec![2, 0, 1]);

    let report = engine.search("space rpg", SearchParams::default()).unwrap();
    assert_eq!(report.status, SearchStatus::Hits);
    // B shares no term with the query and falls under the floor
    assert_eq!(ids(&report), vec![2, 0]);

    let c = &report.results[0];
    assert_eq!(c.title_matches, 2);
    assert_eq!(c.relevance, Relevance::High);
    assert_eq!(c.score, 100.0);
    assert!(c.similarity > report.results[1].similarity);
    assert!((report.precision_at_k - 0.2).abs() < 1e-12);
}

#[test]
fn stopword_query_signals_no_results() {
    let engine = engine(space_corpus());
    let report = engine.search("the a an", SearchParams::default()).unwrap();
    assert!(report.results.is_empty());
    assert!(report.is_no_results());
    assert_eq!(report.status, SearchStatus::DegenerateQuery);
    assert_eq!(report.precision_at_k, 0.0);
}

#[test]
fn stopwords_in_the_query_do_not_inflate_the_score() {
    let filler: Vec<String> = (0..150).map(|i| format!("filler{i}")).collect();
    let engine = engine(vec![
        Document::new("crew.html", format!("racing {}", filler.join(" ")))
            .with_title("The Crew")
            .with_field("Publisher", "The Company of the Year"),
        Document::new("chess.html", "chess puzzle"),
    ]);

    let plain = engine.search("racing", SearchParams::default()).unwrap();
    let padded = engine.search("the racing of a", SearchParams::default()).unwrap();
    assert_eq!(ids(&plain), vec![0]);
    assert_eq!(plain.results, padded.results);
    assert_eq!(plain.precision_at_k, padded.precision_at_k);

    let hit = &padded.results[0];
    assert_eq!((hit.title_matches, hit.metadata_matches), (0, 0));
    assert_eq!(hit.relevance, Relevance::Relevant);
    assert!((hit.score - (hit.similarity + 65.0)).abs() < 1e-9);
    assert_eq!(padded.precision_at_k, 0.0);
}

#[test]
fn in_vocabulary_query_below_floor_is_no_results() {
    let engine = engine(space_corpus());
    let report = engine.search("adventure", SearchParams::new(10, 0.99)).unwrap();
    assert_eq!(report.status, SearchStatus::NoResults);
    assert!(report.results.is_empty());
}

#[test]
fn boosting_never_promotes_beyond_top_k() {
    let docs = vec![
        Document::new("0", "space rpg space rpg"),
        Document::new("1", "space adventure exploration galaxy").with_title("space rpg space rpg"),
        Document::new("2", "fast car"),
    ];
    let engine = engine(docs);
    let report = engine.search("space rpg", SearchParams::new(1, 0.0)).unwrap();
    assert_eq!(ids(&report), vec![0]);
    assert_eq!(report.k, 1);
}

#[test]
fn floor_excludes_candidates_whatever_their_boost() {
    let mut docs = space_corpus();
    docs[1] = Document::new("b.html", "fast car")
        .with_title("space rpg space rpg")
        .with_field("Genre", "space rpg");
    let engine = engine(docs);

    let report = engine.search("space rpg", SearchParams::default()).unwrap();
    assert!(!ids(&report).contains(&1));

    let strict = engine.search("space rpg", SearchParams::new(10, 0.5)).unwrap();
    for hit in &strict.results {
        assert!(hit.similarity > 50.0);
    }
    assert_eq!(ids(&strict), vec![2]);
}

#[test]
fn precision_uses_k_as_denominator() {
    let engine = engine(space_corpus());
    let report = engine.search("space rpg", SearchParams::new(3, 0.0)).unwrap();
    let high = report.results.iter().filter(|h| h.relevance == Relevance::High).count();
    assert_eq!(high, 2);
    assert!((report.precision_at_k - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn metadata_matches_feed_the_composite() {
    let docs = vec![
        Document::new("0", "basketball court game").with_title("Hoops").with_field("Genre", "Basketball / Sports"),
        Document::new("1", "basketball court game").with_title("Hoops"),
        Document::new("2", "racing cars"),
    ];
    let mut config = EngineConfig::default();
    config.policy.baseline = 0.0;
    let engine = SearchEngine::build(docs, config).unwrap();
    let report = engine.search("basketball", SearchParams::default()).unwrap();
    assert_eq!(ids(&report), vec![0, 1]);
    let (with_meta, without) = (&report.results[0], &report.results[1]);
    assert_eq!(with_meta.similarity, without.similarity);
    assert_eq!(with_meta.metadata_matches, 1);
    assert_eq!(without.metadata_matches, 0);
    assert!((with_meta.score - without.score - 5.0).abs() < 1e-9);
    assert!(with_meta.score < 100.0);
}

#[test]
fn ties_are_reported_in_document_order() {
    let docs = vec![
        Document::new("0", "shooter arena"),
        Document::new("1", "puzzle indie"),
        Document::new("2", "strategy"),
        Document::new("3", "puzzle indie"),
    ];
    let engine = engine(docs);
    let report = engine.search("puzzle", SearchParams::default()).unwrap();
    assert_eq!(ids(&report), vec![1, 3]);
    assert_eq!(report.results[0].similarity, report.results[1].similarity);
}

#[test]
fn repeated_searches_are_identical() {
    let engine = engine(space_corpus());
    let first = engine.search("space racing rpg", SearchParams::default()).unwrap();
    for _ in 0..5 {
        assert_eq!(engine.search("space racing rpg", SearchParams::default()).unwrap(), first);
    }
}

#[test]
fn weight_vectors_are_unit_or_zero() {
    let mut docs = space_corpus();
    docs.push(Document::new("empty.html", ""));
    docs.push(Document::new("stop.html", "the and of"));
    let engine = engine(docs);
    for row in engine.matrix().rows() {
        assert!(row.iter().all(|w| *w >= 0.0));
        let norm = row.iter().map(|w| w * w).sum::<f32>().sqrt();
        assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-5, "norm {norm}");
    }
    assert!(engine.matrix().row(3).unwrap().iter().all(|w| *w == 0.0));
}

#[test]
fn similarities_stay_in_unit_interval() {
    let engine = engine(space_corpus());
    for q in ["space", "space rpg", "fast car race", "rpg rpg rpg", "zelda", ""] {
        for (_, s) in engine.rank(q) {
            assert!((0.0..=1.0).contains(&s), "{q}: {s}");
        }
    }
}

#[test]
fn empty_corpus_is_fatal() {
    assert!(matches!(SearchEngine::with_defaults(vec![]), Err(BuildError::EmptyCorpus)));
    let only_stopwords = vec![Document::new("0", "the of and"), Document::new("1", "")];
    assert!(matches!(SearchEngine::with_defaults(only_stopwords), Err(BuildError::EmptyCorpus)));
}

#[test]
fn invalid_config_is_fatal() {
    let mut config = EngineConfig::default();
    config.policy.relevant_threshold = 90.0;
    assert!(matches!(SearchEngine::build(space_corpus(), config), Err(BuildError::Config(_))));
}

#[test]
fn invalid_params_are_rejected_not_clamped() {
    let engine = engine(space_corpus());
    let err = engine.search("space", SearchParams::new(0, 0.1)).unwrap_err();
    assert!(matches!(err, SearchError::InvalidParameter { name: "k", .. }));
    let err = engine.search("space", SearchParams::new(10, 1.5)).unwrap_err();
    assert!(matches!(err, SearchError::InvalidParameter { name: "similarity_floor", .. }));
    // engine keeps serving afterwards
    assert!(engine.search("space", SearchParams::default()).is_ok());
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = std::sync::Arc::new(engine(space_corpus()));
    let expected = engine.search("space rpg", SearchParams::default()).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.search("space rpg", SearchParams::default()).unwrap())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}
