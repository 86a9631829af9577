//! Question helpers shared by the interactive builders.

use crate::error::CliError;
use crate::prompt::Prompter;
use std::fmt::Display;
use std::str::FromStr;

/// A typed enumeration the operator picks from a list.
pub trait Choice: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;
}

pub fn ask_bool(prompter: &dyn Prompter, message: &str, current: bool) -> Result<bool, CliError> {
    prompter.confirm(message, current)
}

/// Free text; an empty answer keeps `current`.
pub fn ask_string(prompter: &dyn Prompter, message: &str, current: &str) -> Result<String, CliError> {
    let default = (!current.is_empty()).then_some(current);
    let answer = prompter.input(message, default)?;
    Ok(if answer.trim().is_empty() {
        current.to_string()
    } else {
        answer.trim().to_string()
    })
}

/// Answer that unsets an optional value.
pub const CLEAR: &str = "-";

/// Optional free text. An empty answer keeps `current`; [`CLEAR`] unsets it.
pub fn ask_optional(
    prompter: &dyn Prompter,
    message: &str,
    current: Option<&str>,
) -> Result<Option<String>, CliError> {
    let message = match current {
        Some(_) => format!("{} (\"{}\" to clear)", message, CLEAR),
        None => message.to_string(),
    };
    let answer = prompter.input(&message, current)?;
    Ok(match answer.trim() {
        "" => current.map(str::to_string),
        CLEAR => None,
        answer => Some(answer.to_string()),
    })
}

/// Ask until the answer parses as `N`.
pub fn ask_number<N>(prompter: &dyn Prompter, message: &str, current: N) -> Result<N, CliError>
where
    N: FromStr + Display + Copy,
{
    let default = current.to_string();
    loop {
        let answer = prompter.input(message, Some(&default))?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(current);
        }
        match answer.parse() {
            Ok(value) => return Ok(value),
            Err(_) => eprintln!("{:?} is not a number", answer),
        }
    }
}

pub fn ask_choice<C: Choice>(prompter: &dyn Prompter, message: &str, current: C) -> Result<C, CliError> {
    let labels: Vec<&str> = C::ALL.iter().map(Choice::label).collect();
    let default = C::ALL.iter().position(|c| *c == current).unwrap_or(0);
    let index = prompter.select(message, &labels, default)?;
    C::ALL
        .get(index)
        .copied()
        .ok_or_else(|| CliError::Prompt(format!("selection {} out of range", index)))
}

/// Comma separated list; an empty answer keeps `current`.
pub fn ask_list(prompter: &dyn Prompter, message: &str, current: &[String]) -> Result<Vec<String>, CliError> {
    let answer = ask_string(prompter, message, &current.join(","))?;
    Ok(answer
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}
