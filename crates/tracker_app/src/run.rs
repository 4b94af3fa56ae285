//! Executes one parsed command and prints its outcome.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracker_core::{
    attempt_summary, decode_page, extract, is_solved, resolve, ProblemContent, ProblemMetadata,
};
use tracker_engine::{ApiError, HandleError, TrackerCommand, TrackerHandle, TrackerResponse};
use tracker_logging::{tracker_debug, tracker_info};

use crate::cli::Command;
use crate::settings::AppSettings;

#[derive(Debug, thiserror::Error)]
pub(crate) enum AppError {
    #[error("{0} is not a problem URL")]
    Unresolved(String),
    #[error(transparent)]
    Handle(#[from] HandleError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no response within {0:?}")]
    NoResponse(std::time::Duration),
    #[error("response does not match the command")]
    Mismatch,
    #[error("could not read {path:?}: {source}")]
    ReadPage { path: PathBuf, source: io::Error },
}

pub(crate) fn execute(command: Command, settings: &AppSettings) -> Result<(), AppError> {
    match command {
        Command::Resolve { url } => {
            let coordinate = resolve(&url).ok_or_else(|| AppError::Unresolved(url.clone()))?;
            println!("contest {} problem {}", coordinate.contest_id(), coordinate.index());
            Ok(())
        }
        Command::Statement { file, page_url } => {
            let bytes = fs::read(&file).map_err(|source| AppError::ReadPage {
                path: file.clone(),
                source,
            })?;
            let page = decode_page(&bytes, None);
            tracker_debug!("decoded {:?} as {}", file, page.encoding_label);
            print_content(&extract(&page.html, &page_url));
            Ok(())
        }
        Command::Problem { coordinate } => {
            let response = request(
                settings,
                TrackerCommand::ProblemMetadata {
                    coordinate: coordinate.clone(),
                },
            )?;
            match response {
                TrackerResponse::ProblemMetadata(Ok(metadata)) => {
                    print_metadata(&metadata);
                    Ok(())
                }
                TrackerResponse::ProblemMetadata(Err(err)) if err.is_not_found() => {
                    println!("{coordinate}: no such problem");
                    Ok(())
                }
                TrackerResponse::ProblemMetadata(Err(err)) => Err(err.into()),
                _ => Err(AppError::Mismatch),
            }
        }
        Command::Solved { handle, coordinate } => {
            let response = request(
                settings,
                TrackerCommand::SubmissionHistory {
                    handle: handle.clone(),
                    max_count: settings.submission_count,
                },
            )?;
            let TrackerResponse::SubmissionHistory(history) = response else {
                return Err(AppError::Mismatch);
            };
            let history = history?;
            let summary = attempt_summary(&coordinate, &history);
            let verdict = if is_solved(&coordinate, &history) {
                "solved"
            } else {
                "not solved"
            };
            println!(
                "{handle} {coordinate}: {verdict} ({} attempts, {} accepted, last {} submissions checked)",
                summary.attempts,
                summary.accepted,
                history.len()
            );
            Ok(())
        }
        Command::Contest { contest_id } => {
            let response = request(settings, TrackerCommand::ContestProblems { contest_id })?;
            let TrackerResponse::ContestProblems(problems) = response else {
                return Err(AppError::Mismatch);
            };
            for problem in problems? {
                println!("{:<4} {}", problem.coordinate.index(), problem.name);
            }
            Ok(())
        }
        Command::Range {
            contest_id,
            from,
            to,
        } => {
            let response = request(
                settings,
                TrackerCommand::ProblemRange {
                    contest_id,
                    from,
                    to,
                },
            )?;
            let TrackerResponse::ProblemRange(results) = response else {
                return Err(AppError::Mismatch);
            };
            for (index, result) in results {
                match result {
                    Ok(metadata) => print_metadata(&metadata),
                    Err(err) => println!("{index}: {err}"),
                }
            }
            Ok(())
        }
    }
}

/// Submit one command and block until its response arrives.
fn request(settings: &AppSettings, command: TrackerCommand) -> Result<TrackerResponse, AppError> {
    let handle = TrackerHandle::new(settings.api.clone())?;
    let request_id = handle.submit(command);
    let deadline = settings.response_deadline();
    loop {
        let event = handle
            .recv_timeout(deadline)
            .ok_or(AppError::NoResponse(deadline))?;
        if event.request_id == request_id {
            tracker_info!("request {} completed", request_id);
            return Ok(event.response);
        }
        tracker_debug!("ignoring stale response {}", event.request_id);
    }
}

fn print_metadata(metadata: &ProblemMetadata) {
    let rating = match metadata.rating {
        0 => "unrated".to_string(),
        rating => rating.to_string(),
    };
    println!("{} {} [{}]", metadata.coordinate, metadata.name, rating);
}

fn print_content(content: &ProblemContent) {
    let sections = [
        ("Name", &content.name),
        ("Time limit", &content.time_limit),
        ("Memory limit", &content.memory_limit),
        ("Statement", &content.statement),
        ("Input", &content.input_format),
        ("Output", &content.output_format),
        ("Note", &content.notes),
    ];
    for (title, section) in sections {
        match section {
            Some(text) => println!("== {title}\n{text}\n"),
            None => println!("== {title}\n(missing)\n"),
        }
    }
    for (number, test) in content.tests.iter().enumerate() {
        println!("== Sample {}\n-- input\n{}\n-- output\n{}\n", number + 1, test.input, test.output);
    }
    for image in &content.images {
        println!("image: {image}");
    }
}
