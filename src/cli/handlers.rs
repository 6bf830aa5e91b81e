// src/cli/handlers.rs
use std::io::Read;

use anyhow::{Context as _, Result};
use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalArgs;
use crate::config::{Config, FailurePolicy};
use crate::encoder::{EncoderStatus, LazyEncoder};
use crate::error::EncoderError;
use crate::exit::LazytokExit;
use crate::provider::HubProvider;
use crate::tokens;

/// Loaded config plus the encoder built from it.
pub struct Session {
    pub config: Config,
    pub encoder: LazyEncoder<HubProvider>,
}

impl Session {
    /// Loads `lazytok.toml`, the environment, then command-line overrides.
    ///
    /// # Errors
    /// Returns error if the config file or an env override is invalid.
    pub fn open(global: &GlobalArgs) -> Result<Self> {
        let mut config = Config::load()?;
        apply_flags(&mut config, global);
        let encoder = LazyEncoder::from_config(&config.encoder);
        Ok(Self { config, encoder })
    }
}

pub fn apply_flags(config: &mut Config, global: &GlobalArgs) {
    if let Some(id) = &global.identifier {
        config.encoder.identifier.clone_from(id);
    }
    if global.fail_fast {
        config.encoder.on_failure = FailurePolicy::FailFast;
    }
    if global.offline {
        config.encoder.offline = true;
    }
    if global.remote_timeout.is_some() {
        config.encoder.remote_timeout_secs = global.remote_timeout;
    }
}

/// Returns `text`, or stdin when it is absent or `-`.
///
/// # Errors
/// Returns error if stdin cannot be read.
pub fn read_text(text: Option<String>) -> Result<String> {
    match text {
        Some(t) if t != "-" => Ok(t),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Parses ids given as separate args and/or comma separated lists.
///
/// # Errors
/// Returns the first token that is not a `u32`.
pub fn parse_ids(raw: &[String]) -> std::result::Result<Vec<u32>, String> {
    raw.iter()
        .flat_map(|arg| arg.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>().map_err(|_| s.to_string()))
        .collect()
}

fn report_encoder_error(e: &EncoderError) -> LazytokExit {
    eprintln!("{} {e}", "error:".red().bold());
    match e {
        EncoderError::Initialization(_) => LazytokExit::InitFailed,
        EncoderError::Encode(_) | EncoderError::Decode(_) => LazytokExit::Error,
    }
}

fn warn_if_fallback(encoder: &LazyEncoder<HubProvider>) {
    if encoder.status() == EncoderStatus::Fallback {
        eprintln!(
            "{} tokenizer unavailable, using character fallback",
            "warning:".yellow().bold()
        );
    }
}

/// Handles the encode command.
///
/// # Errors
/// Returns error if input cannot be read or output cannot be serialized.
pub fn handle_encode(global: &GlobalArgs, text: Option<String>, json: bool) -> Result<LazytokExit> {
    let session = Session::open(global)?;
    let text = read_text(text)?;
    let ids = match session.encoder.encode(&text) {
        Ok(ids) => ids,
        Err(e) => return Ok(report_encoder_error(&e)),
    };
    warn_if_fallback(&session.encoder);

    if json {
        println!("{}", serde_json::to_string(&ids)?);
    } else {
        let line: Vec<String> = ids.iter().map(ToString::to_string).collect();
        println!("{}", line.join(" "));
    }
    Ok(LazytokExit::Success)
}

/// Handles the decode command.
///
/// # Errors
/// Returns error if the config cannot be loaded.
pub fn handle_decode(global: &GlobalArgs, raw: &[String]) -> Result<LazytokExit> {
    let ids = match parse_ids(raw) {
        Ok(ids) => ids,
        Err(bad) => {
            eprintln!("{} '{bad}' is not a token id", "error:".red().bold());
            return Ok(LazytokExit::InvalidInput);
        }
    };
    let session = Session::open(global)?;
    match session.encoder.decode(&ids) {
        Ok(text) => {
            warn_if_fallback(&session.encoder);
            println!("{text}");
            Ok(LazytokExit::Success)
        }
        Err(e) => Ok(report_encoder_error(&e)),
    }
}

/// Handles the count command.
///
/// # Errors
/// Returns error if input cannot be read.
pub fn handle_count(global: &GlobalArgs, text: Option<String>) -> Result<LazytokExit> {
    let session = Session::open(global)?;
    let text = read_text(text)?;
    match tokens::count(&session.encoder, &text) {
        Ok(n) => {
            warn_if_fallback(&session.encoder);
            println!("{n}");
            Ok(LazytokExit::Success)
        }
        Err(e) => Ok(report_encoder_error(&e)),
    }
}

/// Handles the truncate command.
///
/// # Errors
/// Returns error if input cannot be read.
pub fn handle_truncate(
    global: &GlobalArgs,
    text: Option<String>,
    max: Option<usize>,
) -> Result<LazytokExit> {
    let session = Session::open(global)?;
    let text = read_text(text)?;
    let budget = max.unwrap_or(session.config.budget.max_tokens);
    match tokens::truncate_to_budget(&session.encoder, &text, budget) {
        Ok(out) => {
            warn_if_fallback(&session.encoder);
            print!("{out}");
            Ok(LazytokExit::Success)
        }
        Err(e) => Ok(report_encoder_error(&e)),
    }
}

#[derive(Serialize)]
struct StatusReport {
    identifier: String,
    status: EncoderStatus,
    policy: FailurePolicy,
    cache_root: String,
    error: Option<String>,
}

/// Handles the status command.
///
/// # Errors
/// Returns error if the config cannot be loaded or the report serialized.
pub fn handle_status(global: &GlobalArgs, json: bool) -> Result<LazytokExit> {
    let session = Session::open(global)?;
    let cache_root = HubProvider::from_config(&session.config.encoder)
        .cache_root()
        .display()
        .to_string();
    let status = session.encoder.wait();
    let report = StatusReport {
        identifier: session.encoder.identifier().to_string(),
        status,
        policy: session.encoder.policy(),
        cache_root,
        error: session.encoder.acquisition_error().map(|e| e.to_string()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_status(&report);
    }

    Ok(match status {
        EncoderStatus::Failed => LazytokExit::InitFailed,
        _ => LazytokExit::Success,
    })
}

fn print_status(report: &StatusReport) {
    let status = match report.status {
        EncoderStatus::Ready => report.status.to_string().green().bold(),
        EncoderStatus::Fallback => report.status.to_string().yellow().bold(),
        _ => report.status.to_string().red().bold(),
    };
    println!("{:<12} {}", "tokenizer:".dimmed(), report.identifier);
    println!("{:<12} {status}", "status:".dimmed());
    println!("{:<12} {:?}", "policy:".dimmed(), report.policy);
    println!("{:<12} {}", "cache:".dimmed(), report.cache_root);
    if let Some(e) = &report.error {
        println!("{:<12} {e}", "error:".dimmed());
    }
}
