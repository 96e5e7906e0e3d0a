//! Integration tests that run the real tokenizer model.
//!
//! These are ignored by default. Run with:
//! cargo test --test model_pipeline -- --ignored
//!
//! Setup: run `sflizer fetch-model` once to download the model. An ignored
//! run without the model fails with a message saying so.

use sflizer::analysis::{analyze_pos, kwic, process_report, FrequencyOptions, KwicOptions, ProcessTable, ProcessType};
use sflizer::nlp::{Annotator, NlpPipeline, Pos};
use sflizer::resources;

fn pipeline() -> NlpPipeline {
    let path = resources::get_tokenizer_path();
    assert!(
        NlpPipeline::is_model_available(),
        "tokenizer model not found at {:?}; run `sflizer fetch-model` first",
        path
    );
    NlpPipeline::load(&path).expect("Failed to load tokenizer model")
}

#[test]
#[ignore = "needs the tokenizer model; run `sflizer fetch-model`"]
fn test_verb_frequency_example() {
    let pipeline = pipeline();

    let tokens = pipeline.annotate("The cat runs. The dog runs fast.");
    let table = analyze_pos(&tokens, Pos::Verb, FrequencyOptions::default());

    assert_eq!(table.get("run"), Some(2), "table was {:?}", table.rows);
}

#[test]
#[ignore = "needs the tokenizer model; run `sflizer fetch-model`"]
fn test_tokens_preserve_surface_order() {
    let pipeline = pipeline();

    let tokens = pipeline.annotate("The cat runs fast now.");
    let surface: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(&surface[..5], &["The", "cat", "runs", "fast", "now"]);

    let the = &tokens[0];
    assert!(the.is_stop);
    assert!(the.is_alpha);
}

#[test]
#[ignore = "needs the tokenizer model; run `sflizer fetch-model`"]
fn test_kwic_over_tagged_text() {
    let pipeline = pipeline();

    let tokens = pipeline.annotate("The cat runs fast now.");
    let rows = kwic(&tokens, "run", Pos::Verb, KwicOptions { window: 2, max_rows: 50 });

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].keyword, "runs");
    assert_eq!(rows[0].left, "The cat");
    assert_eq!(rows[0].right, "fast now");
}

#[test]
#[ignore = "needs the tokenizer model; run `sflizer fetch-model`"]
fn test_auxiliaries_reach_process_report() {
    let pipeline = pipeline();

    let tokens = pipeline.annotate("She knows that the report is ready. They said it was late.");
    let report = process_report(&tokens, &ProcessTable::standard());

    let process_of = |verb: &str| report.rows.iter().find(|r| r.verb == verb).map(|r| r.process);
    assert_eq!(process_of("know"), Some(ProcessType::Mental));
    assert_eq!(process_of("say"), Some(ProcessType::Verbal));
    assert_eq!(process_of("be"), Some(ProcessType::Relational));
}
