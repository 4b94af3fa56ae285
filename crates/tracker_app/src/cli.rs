//! Command-line parsing.

use std::path::PathBuf;

use tracker_core::{parse_problem_code, resolve, resolve_contest, ProblemCoordinate};

use crate::settings::SETTINGS_FILENAME;

pub(crate) const USAGE: &str = "\
usage: cf-tracker [--config <file>] <command>

commands:
  resolve <url>                     print the problem a URL points at
  problem <url|code>                fetch name and rating
  solved <handle> <url|code>        check a user's recent submissions
  contest <id|url>                  list the problems of a contest
  range <id|url> <from> <to>        fetch metadata for an index range, e.g. A E
  statement <html-file> <page-url>  extract a saved problem page";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Resolve { url: String },
    Problem { coordinate: ProblemCoordinate },
    Solved { handle: String, coordinate: ProblemCoordinate },
    Contest { contest_id: String },
    Range { contest_id: String, from: String, to: String },
    Statement { file: PathBuf, page_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub config: PathBuf,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum UsageError {
    #[error("missing command")]
    MissingCommand,
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("{command}: expected {expected} argument(s), got {got}")]
    Arity {
        command: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("--config needs a file")]
    MissingConfig,
    #[error("{0:?} is neither a problem URL nor a problem code")]
    NotAProblem(String),
    #[error("{0:?} is neither a contest ID nor a contest URL")]
    NotAContest(String),
}

pub(crate) fn parse(args: &[String]) -> Result<Invocation, UsageError> {
    let mut config = PathBuf::from(SETTINGS_FILENAME);
    let mut rest = args;
    if let Some(first) = rest.first() {
        if first == "--config" {
            let path = rest.get(1).ok_or(UsageError::MissingConfig)?;
            config = PathBuf::from(path);
            rest = &rest[2..];
        }
    }

    let (name, operands) = rest.split_first().ok_or(UsageError::MissingCommand)?;
    let command = match name.as_str() {
        "resolve" => {
            let [url] = operands_of::<1>("resolve", operands)?;
            Command::Resolve { url }
        }
        "problem" => {
            let [target] = operands_of::<1>("problem", operands)?;
            Command::Problem {
                coordinate: problem_target(&target)?,
            }
        }
        "solved" => {
            let [handle, target] = operands_of::<2>("solved", operands)?;
            Command::Solved {
                handle,
                coordinate: problem_target(&target)?,
            }
        }
        "contest" => {
            let [target] = operands_of::<1>("contest", operands)?;
            Command::Contest {
                contest_id: contest_target(&target)?,
            }
        }
        "range" => {
            let [target, from, to] = operands_of::<3>("range", operands)?;
            Command::Range {
                contest_id: contest_target(&target)?,
                from,
                to,
            }
        }
        "statement" => {
            let [file, page_url] = operands_of::<2>("statement", operands)?;
            Command::Statement {
                file: PathBuf::from(file),
                page_url,
            }
        }
        other => return Err(UsageError::UnknownCommand(other.to_string())),
    };

    Ok(Invocation { config, command })
}

fn operands_of<const N: usize>(
    command: &'static str,
    operands: &[String],
) -> Result<[String; N], UsageError> {
    <[String; N]>::try_from(operands.to_vec()).map_err(|_| UsageError::Arity {
        command,
        expected: N,
        got: operands.len(),
    })
}

/// A full problem URL or a short code such as `1000B2`.
fn problem_target(target: &str) -> Result<ProblemCoordinate, UsageError> {
    resolve(target)
        .or_else(|| parse_problem_code(target))
        .ok_or_else(|| UsageError::NotAProblem(target.to_string()))
}

fn contest_target(target: &str) -> Result<String, UsageError> {
    resolve_contest(target).ok_or_else(|| UsageError::NotAContest(target.to_string()))
}
