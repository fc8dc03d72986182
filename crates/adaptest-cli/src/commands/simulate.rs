//! The `adaptest simulate` command.
//!
//! Drives a full assessment session with a scripted candidate who answers
//! correctly with a configurable probability.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use comfy_table::{Cell, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use adaptest_core::engine::{AssessmentEngine, SubmitOutcome};
use adaptest_core::ladder::DifficultyTier;
use adaptest_core::model::Question;
use adaptest_core::parser;
use adaptest_core::report::{EndReason, SessionReport};
use adaptest_store::config::load_config_from;
use adaptest_store::{InMemoryRepository, JsonResultStore, TemplateSummarizer};

pub async fn execute(
    bank_path: PathBuf,
    accuracy: Option<f64>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    no_summary: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let accuracy = accuracy.unwrap_or(config.sim_accuracy);
    let seed = seed.or(config.seed);
    let output = output.unwrap_or(config.output_dir);

    anyhow::ensure!(
        (0.0..=1.0).contains(&accuracy),
        "accuracy must be between 0.0 and 1.0"
    );

    // Load every bank under the path and pool their questions.
    let banks = if bank_path.is_dir() {
        parser::load_bank_directory(&bank_path)?
    } else {
        vec![parser::parse_bank(&bank_path)?]
    };
    anyhow::ensure!(!banks.is_empty(), "no banks found at {}", bank_path.display());

    let mut warning_count = 0;
    let mut questions = Vec::new();
    for bank in banks {
        warning_count += parser::validate_bank(&bank).len();
        questions.extend(bank.questions);
    }
    if warning_count > 0 {
        eprintln!("Note: bank validation produced {warning_count} warning(s); run `adaptest validate` for details.");
    }

    let store = Arc::new(JsonResultStore::new(output));
    let mut engine = match seed {
        Some(s) => AssessmentEngine::with_seed(
            Arc::new(InMemoryRepository::from_questions(questions)),
            store.clone(),
            s,
        ),
        None => AssessmentEngine::new(
            Arc::new(InMemoryRepository::from_questions(questions)),
            store.clone(),
        ),
    };
    if !no_summary && config.summaries {
        engine = engine.summarizer(Arc::new(TemplateSummarizer::new()));
    }

    // The candidate gets an rng of their own so the engine's draws stay
    // reproducible under a fixed seed.
    let mut candidate_rng = match seed {
        Some(s) => StdRng::seed_from_u64(s.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };

    println!("Simulating one session at {:.0}% candidate accuracy", accuracy * 100.0);

    let (mut session, mut question) = engine.start().await?;
    let report = loop {
        let answers_correctly = candidate_rng.gen_bool(accuracy);
        let selected = pick_option(&question, answers_correctly, &mut candidate_rng);
        let time_taken = Duration::from_millis(candidate_rng.gen_range(900..9000));

        let ordinal = session.next_ordinal();
        let mark = if question.is_correct(selected) { "OK  " } else { "MISS" };
        println!("  Q{ordinal:<3} [{:<9}] {mark} {}", question.tier.to_string(), question.prompt);

        match engine
            .submit_answer(&mut session, &question.id, selected, time_taken)
            .await?
        {
            SubmitOutcome::NextQuestion(next) => question = next,
            SubmitOutcome::Complete(report) => break report,
        }
    };

    print_summary(&report);
    println!("Report saved to: {}", store.path_for(&report).display());

    Ok(())
}

/// Choose an option index: the correct one, or a uniformly random wrong one.
fn pick_option(question: &Question, correct: bool, rng: &mut StdRng) -> usize {
    if correct || question.options.len() < 2 {
        return question.correct_index;
    }
    let offset = rng.gen_range(1..question.options.len());
    (question.correct_index + offset) % question.options.len()
}

fn print_summary(report: &SessionReport) {
    let reason = match report.end_reason {
        EndReason::CapReached => "question cap reached",
        EndReason::PoolExhausted => "question pool exhausted",
        EndReason::EndedEarly => "ended early",
    };
    println!(
        "\nSession complete ({reason}): {}/{} correct, finished at '{}'",
        report.stats.total_correct, report.stats.total_answered, report.final_tier
    );

    let mut table = Table::new();
    table.set_header(vec!["Tier", "Presented", "Correct", "Accuracy"]);
    for tier in DifficultyTier::ALL {
        if let Some(stats) = report.stats.per_tier.get(&tier) {
            table.add_row(vec![
                Cell::new(tier),
                Cell::new(stats.presented),
                Cell::new(stats.correct),
                Cell::new(format!("{:.1}%", stats.accuracy * 100.0)),
            ]);
        }
    }
    println!("{table}");

    if let Some(narrative) = &report.narrative {
        println!("\n{narrative}");
    }
}
