//! Command implementations for the lipogram CLI.

use std::io;
use std::sync::Arc;

use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::candidate::CandidateGenerator;
use crate::candidate::generative::GenerativeGenerator;
use crate::candidate::lexical::LexicalGenerator;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::Config;
use crate::constraint::{BannedSet, Regime};
use crate::error::Result;
use crate::generation::chat::OpenAiChatClient;
use crate::generation::embedder::OpenAiEmbedder;
use crate::metrics::MetricsEvaluator;
use crate::rewrite::engine::{RewriteEngine, RewriteOptions, TokenOutcome};
use crate::rewrite::oneshot::OneShotRewriter;
use crate::rewrite::trace::{TraceSink, WriteTrace};
use crate::synonym::SynonymProvider;
use crate::synonym::dictionary::SynonymDictionary;

/// Execute a CLI command.
pub fn execute_command(args: LipogramArgs) -> Result<()> {
    match &args.command {
        Command::Rewrite(rewrite_args) => rewrite_text(rewrite_args.clone(), &args),
        Command::Check(check_args) => check_text(check_args.clone(), &args),
        Command::Tokenize(tokenize_args) => tokenize_text(tokenize_args.clone(), &args),
    }
}

/// Build the tokenizer for a regime.
///
/// The reading regime needs a morphological dictionary, which the `lindera`
/// feature provides; without it only the surface regime is available.
fn build_tokenizer(regime: Regime) -> Result<Arc<dyn Tokenizer>> {
    match regime {
        Regime::Surface => Ok(Arc::new(UnicodeWordTokenizer::new())),
        Regime::Reading => build_reading_tokenizer(),
    }
}

#[cfg(feature = "lindera")]
fn build_reading_tokenizer() -> Result<Arc<dyn Tokenizer>> {
    use crate::analysis::tokenizer::lindera::LinderaTokenizer;
    Ok(Arc::new(LinderaTokenizer::new("normal", "embedded://ipadic")?))
}

#[cfg(not(feature = "lindera"))]
fn build_reading_tokenizer() -> Result<Arc<dyn Tokenizer>> {
    Err(crate::error::LipogramError::config(
        "the reading regime requires the 'lindera' feature; \
         rebuild with --features lindera",
    ))
}

/// Rewrite text to satisfy the banned-character constraint.
fn rewrite_text(args: RewriteArgs, cli_args: &LipogramArgs) -> Result<()> {
    let regime = Regime::from(args.regime);
    let banned = BannedSet::parse(&args.banned_chars, regime)?;
    let tokenizer = build_tokenizer(regime)?;

    let mut config = Config::from_env()?;
    if let Some(model) = &args.model {
        config = config.with_chat_model(model.clone());
    }

    if cli_args.verbosity() > 1 {
        println!("Banned characters: {banned}");
        println!("Model: {}", config.chat_model);
    }

    let (rewritten, outcomes) = match args.mode {
        RewriteMode::Oneshot => {
            let client = Arc::new(OpenAiChatClient::new(
                config.api_key.clone(),
                config.chat_model.clone(),
            ));
            let rewriter = OneShotRewriter::new(client, regime);
            (rewriter.rewrite(&args.text, &banned)?, Vec::new())
        }
        RewriteMode::Sequential => {
            let generator = build_generator(&args, &config, regime)?;

            let mut engine = RewriteEngine::new(tokenizer.clone(), generator).with_options(
                RewriteOptions {
                    regime,
                    max_attempts: args.max_attempts,
                    similarity_threshold: args.threshold,
                },
            );
            if cli_args.verbosity() > 1 {
                engine =
                    engine.with_trace(Arc::new(WriteTrace::new(io::stderr())) as Arc<dyn TraceSink>);
            }

            let report = engine.rewrite_with_report(&args.text, &banned)?;
            (report.text, report.outcomes)
        }
    };

    let metrics = if args.metrics {
        let evaluator = MetricsEvaluator::new(tokenizer, regime);
        Some(evaluator.evaluate(&args.text, &rewritten, &banned)?)
    } else {
        None
    };

    let replaced = outcomes
        .iter()
        .filter(|o| matches!(o, TokenOutcome::Replaced { .. }))
        .count();
    let unresolved = outcomes
        .iter()
        .filter(|o| matches!(o, TokenOutcome::Unresolved { .. }))
        .count();

    output_result(
        "Rewrite complete",
        &RewriteResult {
            original: args.text,
            rewritten,
            replaced,
            unresolved,
            outcomes,
            metrics,
        },
        cli_args,
    )?;

    Ok(())
}

/// Build the candidate generator for the selected strategy.
fn build_generator(
    args: &RewriteArgs,
    config: &Config,
    regime: Regime,
) -> Result<Arc<dyn CandidateGenerator>> {
    match args.strategy {
        Strategy::Generative => {
            let client = Arc::new(OpenAiChatClient::new(
                config.api_key.clone(),
                config.chat_model.clone(),
            ));
            Ok(Arc::new(GenerativeGenerator::new(client, regime)))
        }
        Strategy::Lexical => {
            let provider: Arc<dyn SynonymProvider> = match &args.synonyms {
                Some(path) => Arc::new(SynonymDictionary::load_from_file(
                    &path.to_string_lossy(),
                )?),
                None => Arc::new(SynonymDictionary::empty()),
            };
            let embedder = Arc::new(OpenAiEmbedder::new(
                config.api_key.clone(),
                config.embed_model.clone(),
            ));
            Ok(Arc::new(LexicalGenerator::new(provider, embedder)))
        }
    }
}

/// Check text against a banned set without rewriting.
fn check_text(args: CheckArgs, cli_args: &LipogramArgs) -> Result<()> {
    let regime = Regime::from(args.regime);
    let banned = BannedSet::parse(&args.banned_chars, regime)?;
    let tokenizer = build_tokenizer(regime)?;

    let evaluator = MetricsEvaluator::new(tokenizer, regime);
    let check = evaluator.check_constraint(&args.text, &banned)?;

    output_result(
        "Constraint check",
        &CheckResult {
            text: args.text,
            check,
        },
        cli_args,
    )?;

    Ok(())
}

/// Dump the tokenization of a text.
fn tokenize_text(args: TokenizeArgs, cli_args: &LipogramArgs) -> Result<()> {
    let regime = Regime::from(args.regime);
    let tokenizer = build_tokenizer(regime)?;
    let tokens = tokenizer.tokenize(&args.text)?;

    output_result(
        "Tokenization",
        &TokenizationResult {
            tokenizer: tokenizer.name().to_string(),
            tokens,
        },
        cli_args,
    )?;

    Ok(())
}
