// src/prompt.rs
use crate::error::{BotError, BotResult};
use crate::types::{PairChoice, RunConfig};
use std::io::{self, BufRead, Write};

/// Ask which action pair to drive. Blank defaults to wrap/unwrap.
pub fn collect_pair_choice() -> BotResult<PairChoice> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let answer = ask(
        &mut lines,
        "Action pair: [1] wrap/unwrap, [2] stake/unstake (press enter for 1): ",
    )?;
    parse_pair_choice(&answer)
}

/// Collect the run configuration from two plain-text prompts. A blank cycle
/// count means one cycle; a blank interval means back-to-back execution.
pub fn collect_run_config() -> BotResult<RunConfig> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let cycles = ask(
        &mut lines,
        "How many cycles would you like to run? (press enter for 1): ",
    )?;
    let hours = ask(
        &mut lines,
        "How often (in hours) should a cycle start? (press enter for back-to-back): ",
    )?;
    parse_run_config(&cycles, &hours)
}

fn ask<B: BufRead>(lines: &mut io::Lines<B>, prompt: &str) -> BotResult<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => Ok(String::new()),
    }
}

fn parse_run_config(cycles: &str, hours: &str) -> BotResult<RunConfig> {
    let cycles = cycles.trim();
    let hours = hours.trim();

    let cycle_count = if cycles.is_empty() {
        1
    } else {
        cycles
            .parse::<u32>()
            .map_err(|_| BotError::Config(format!("invalid cycle count {cycles:?}")))?
    };
    let interval_hours = if hours.is_empty() {
        None
    } else {
        Some(
            hours
                .parse::<f64>()
                .map_err(|_| BotError::Config(format!("invalid interval {hours:?}")))?,
        )
    };

    let config = RunConfig {
        cycle_count,
        interval_hours,
    };
    config.validate()?;
    Ok(config)
}

fn parse_pair_choice(answer: &str) -> BotResult<PairChoice> {
    match answer.trim() {
        "" | "1" => Ok(PairChoice::WrapUnwrap),
        "2" => Ok(PairChoice::StakeUnstake),
        other => Err(BotError::Config(format!(
            "invalid action pair choice {other:?}"
        ))),
    }
}
