//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{LipogramArgs, OutputFormat};
use crate::error::Result;
use crate::metrics::{ConstraintCheck, RewriteMetrics};
use crate::rewrite::engine::TokenOutcome;

/// Result structure for the rewrite command.
#[derive(Debug, Serialize, Deserialize)]
pub struct RewriteResult {
    pub original: String,
    pub rewritten: String,
    pub replaced: usize,
    pub unresolved: usize,
    pub outcomes: Vec<TokenOutcome>,
    pub metrics: Option<RewriteMetrics>,
}

/// Result structure for the check command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResult {
    pub text: String,
    pub check: ConstraintCheck,
}

/// Result structure for the tokenize command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizationResult {
    pub tokenizer: String,
    pub tokens: Vec<Token>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &LipogramArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &LipogramArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("RewriteResult") => {
            output_rewrite_result_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("CheckResult") => {
            output_check_result_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("TokenizationResult") => {
            output_tokenization_human(&value, args)
        }
        _ => output_generic_human(&value, args),
    }
}

/// Output a rewrite result in human format.
fn output_rewrite_result_human(value: &serde_json::Value, args: &LipogramArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        if let Some(original) = obj.get("original").and_then(|o| o.as_str()) {
            if args.verbosity() > 1 {
                println!("Original:  {original}");
            }
        }
        if let Some(rewritten) = obj.get("rewritten").and_then(|r| r.as_str()) {
            println!("{rewritten}");
        }

        if args.verbosity() > 0 {
            let replaced = obj.get("replaced").and_then(|r| r.as_u64()).unwrap_or(0);
            let unresolved = obj.get("unresolved").and_then(|u| u.as_u64()).unwrap_or(0);
            println!();
            println!("Replaced tokens: {replaced}");
            if unresolved > 0 {
                println!("Unresolved tokens: {unresolved}");
            }
        }

        if let Some(metrics) = obj.get("metrics").filter(|m| !m.is_null()) {
            println!();
            println!("Metrics:");
            println!("────────");
            if let Some(constraint) = metrics.get("constraint").and_then(|c| c.as_object()) {
                let violated = constraint
                    .get("violated")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                println!("Constraint violated: {violated}");
                if violated {
                    if let Some(found) = constraint.get("found").and_then(|f| f.as_array()) {
                        let chars: Vec<String> =
                            found.iter().filter_map(|c| c.as_str().map(String::from)).collect();
                        let list = chars.join(", ");
                        println!("Banned characters found: {list}");
                    }
                    if let Some(count) = constraint.get("count").and_then(|c| c.as_u64()) {
                        println!("Occurrences: {count}");
                    }
                }
            }
            if let Some(vrr) = metrics.get("vrr").and_then(|v| v.as_f64()) {
                println!("Vocabulary replacement rate: {vrr:.3}");
            }
            if let Some(ttr) = metrics.get("ttr").and_then(|t| t.as_f64()) {
                println!("Type-token ratio: {ttr:.3}");
            }
        }
    }
    Ok(())
}

/// Output a check result in human format.
fn output_check_result_human(value: &serde_json::Value, _args: &LipogramArgs) -> Result<()> {
    if let Some(obj) = value.as_object()
        && let Some(check) = obj.get("check").and_then(|c| c.as_object())
    {
        let violated = check
            .get("violated")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        if violated {
            println!("VIOLATED");
            if let Some(found) = check.get("found").and_then(|f| f.as_array()) {
                let chars: Vec<String> =
                    found.iter().filter_map(|c| c.as_str().map(String::from)).collect();
                let list = chars.join(", ");
                println!("Banned characters found: {list}");
            }
            if let Some(count) = check.get("count").and_then(|c| c.as_u64()) {
                println!("Occurrences: {count}");
            }
        } else {
            println!("CLEAN");
        }
    }
    Ok(())
}

/// Output a tokenization dump in human format.
fn output_tokenization_human(value: &serde_json::Value, _args: &LipogramArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        if let Some(name) = obj.get("tokenizer").and_then(|n| n.as_str()) {
            println!("Tokenizer: {name}");
        }
        if let Some(tokens) = obj.get("tokens").and_then(|t| t.as_array()) {
            for token in tokens {
                let surface = token.get("surface").and_then(|s| s.as_str()).unwrap_or("");
                let reading = token.get("reading").and_then(|r| r.as_str()).unwrap_or("");
                let pos = token.get("pos").and_then(|p| p.as_str()).unwrap_or("");
                println!("  {surface}\t{reading}\t{pos}");
            }
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &LipogramArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LipogramArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}
