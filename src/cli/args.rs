//! Command line argument parsing for the lipogram CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::constraint::Regime;

/// lipogram - constrained text rewriting under banned-character rules
#[derive(Parser, Debug, Clone)]
#[command(name = "lipogram")]
#[command(about = "Rewrite text so it avoids a set of banned characters")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LipogramArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LipogramArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rewrite text to avoid the banned characters
    Rewrite(RewriteArgs),

    /// Check text against a banned set without rewriting
    Check(CheckArgs),

    /// Dump the tokenization of a text (debugging aid)
    Tokenize(TokenizeArgs),
}

/// Arguments for rewriting
#[derive(Parser, Debug, Clone)]
pub struct RewriteArgs {
    /// Text to rewrite
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Banned characters, comma-separated (e.g. "e" or "さ,い")
    #[arg(short, long, env = "LIPOGRAM_BANNED_CHARS", value_name = "CHARS")]
    pub banned_chars: String,

    /// Constraint regime
    #[arg(short, long, default_value = "surface")]
    pub regime: RegimeArg,

    /// Candidate generation strategy
    #[arg(short, long, default_value = "generative")]
    pub strategy: Strategy,

    /// Rewrite mode
    #[arg(short, long, default_value = "sequential")]
    pub mode: RewriteMode,

    /// Chat model to use (overrides LIPOGRAM_CHAT_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Per-token generation attempt budget (default: strategy-specific)
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Minimum similarity score for lexical candidates
    #[arg(long, default_value = "0.5")]
    pub threshold: f64,

    /// Synonym dictionary file (JSON) for the lexical strategy
    #[arg(long, value_name = "FILE")]
    pub synonyms: Option<PathBuf>,

    /// Include post-hoc evaluation metrics in the output
    #[arg(long)]
    pub metrics: bool,
}

/// Arguments for constraint checking
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Text to check
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Banned characters, comma-separated
    #[arg(short, long, env = "LIPOGRAM_BANNED_CHARS", value_name = "CHARS")]
    pub banned_chars: String,

    /// Constraint regime
    #[arg(short, long, default_value = "surface")]
    pub regime: RegimeArg,
}

/// Arguments for the tokenization dump
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Text to tokenize
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Constraint regime (selects the tokenizer)
    #[arg(short, long, default_value = "surface")]
    pub regime: RegimeArg,
}

/// Constraint regimes available in the CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegimeArg {
    /// Banned characters apply to the written form, case-insensitively
    Surface,
    /// Banned characters apply to surface and phonetic reading
    Reading,
}

impl From<RegimeArg> for Regime {
    fn from(arg: RegimeArg) -> Self {
        match arg {
            RegimeArg::Surface => Regime::Surface,
            RegimeArg::Reading => Regime::Reading,
        }
    }
}

/// Candidate generation strategies
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Prompt a chat model for each replacement
    Generative,
    /// Synonym dictionary ranked by contextual embeddings
    Lexical,
}

/// Rewrite modes
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteMode {
    /// Per-token sequential loop with validation and retries
    Sequential,
    /// Single whole-text completion, no per-token validation (baseline)
    Oneshot,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
