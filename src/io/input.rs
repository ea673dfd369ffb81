// src/io/input.rs

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::simulation::config::SimulationConfig;
use crate::simulation::error::{SimError, SimResult};

/// Ask for the run's settings one line at a time.
///
/// A blank answer (or end of input) keeps the value from `defaults`. Only the
/// first character of the verbose answer matters: `y` or `Y` turns it on.
pub fn prompt_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    defaults: SimulationConfig,
) -> SimResult<SimulationConfig> {
    let mut config = defaults;

    config.num_servers = ask(
        input,
        output,
        "Number of servers at the counter",
        "number of servers",
        config.num_servers,
    )?;
    config.hours_in_work_day = ask(
        input,
        output,
        "Hours in a work day",
        "hours in a work day",
        config.hours_in_work_day,
    )?;
    config.avg_clients_per_day = ask(
        input,
        output,
        "Average number of clients per day",
        "average clients per day",
        config.avg_clients_per_day,
    )?;
    config.clock_ticks_per_hour = ask(
        input,
        output,
        "Number of clock ticks per hour",
        "clock ticks per hour",
        config.clock_ticks_per_hour,
    )?;

    let default_answer = if config.verbose { 'y' } else { 'n' };
    write!(output, "Provide verbose output? (y/n) [{default_answer}]: ")?;
    output.flush()?;
    if let Some(answer) = read_answer(input)? {
        config.verbose = matches!(answer.chars().next(), Some('y' | 'Y'));
    }
    writeln!(output)?;

    Ok(config)
}

/// Parse a seed given as text, e.g. from an environment variable.
pub fn parse_seed(raw: &str) -> SimResult<u64> {
    raw.trim().parse().map_err(|_| SimError::Input {
        field: "seed",
        value: raw.to_string(),
    })
}

fn ask<T, R, W>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    field: &'static str,
    default: T,
) -> SimResult<T>
where
    T: FromStr + std::fmt::Display,
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt} [{default}]: ")?;
    output.flush()?;

    match read_answer(input)? {
        None => Ok(default),
        Some(answer) => answer.parse().map_err(|_| SimError::Input {
            field,
            value: answer,
        }),
    }
}

/// Next trimmed line, `None` when blank or at end of input.
fn read_answer<R: BufRead>(input: &mut R) -> SimResult<Option<String>> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer.to_string()))
    }
}
