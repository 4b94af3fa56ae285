use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tracker_core::{ContestProblem, ProblemCoordinate, ProblemMetadata, Submission};
use tracker_logging::tracker_debug;

use crate::api::{fetch_problem_range, PlatformApi, ReqwestApiClient};
use crate::error::ApiError;
use crate::settings::ApiSettings;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCommand {
    ProblemMetadata {
        coordinate: ProblemCoordinate,
    },
    SubmissionHistory {
        handle: String,
        max_count: usize,
    },
    ContestProblems {
        contest_id: String,
    },
    /// Inclusive index range of one contest, e.g. `A..=E`.
    ProblemRange {
        contest_id: String,
        from: String,
        to: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerResponse {
    ProblemMetadata(Result<ProblemMetadata, ApiError>),
    SubmissionHistory(Result<Vec<Submission>, ApiError>),
    ContestProblems(Result<Vec<ContestProblem>, ApiError>),
    ProblemRange(Vec<(String, Result<ProblemMetadata, ApiError>)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerEvent {
    pub request_id: RequestId,
    pub response: TrackerResponse,
}

#[derive(Debug, thiserror::Error)]
pub enum HandleError {
    #[error("api client: {0}")]
    Api(#[from] ApiError),
    #[error("runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Runs API calls off the caller's thread.
///
/// Commands are executed concurrently on a private runtime; each completion
/// arrives as a [`TrackerEvent`] tagged with the ID `submit` returned. A caller
/// that no longer wants a result simply ignores its event.
pub struct TrackerHandle {
    cmd_tx: mpsc::Sender<(RequestId, TrackerCommand)>,
    event_rx: mpsc::Receiver<TrackerEvent>,
    next_id: AtomicU64,
}

impl TrackerHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, HandleError> {
        let api = ReqwestApiClient::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn PlatformApi>) -> Result<Self, HandleError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<(RequestId, TrackerCommand)>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok((request_id, command)) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let response = run_command(api.as_ref(), command).await;
                    let _ = event_tx.send(TrackerEvent {
                        request_id,
                        response,
                    });
                });
            }
            tracker_debug!("tracker handle dropped; stopping runtime");
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn submit(&self, command: TrackerCommand) -> RequestId {
        let request_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let _ = self.cmd_tx.send((request_id, command));
        request_id
    }

    pub fn try_recv(&self) -> Option<TrackerEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<TrackerEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn run_command(api: &dyn PlatformApi, command: TrackerCommand) -> TrackerResponse {
    match command {
        TrackerCommand::ProblemMetadata { coordinate } => {
            TrackerResponse::ProblemMetadata(api.fetch_problem_metadata(&coordinate).await)
        }
        TrackerCommand::SubmissionHistory { handle, max_count } => {
            TrackerResponse::SubmissionHistory(
                api.fetch_submission_history(&handle, max_count).await,
            )
        }
        TrackerCommand::ContestProblems { contest_id } => {
            TrackerResponse::ContestProblems(api.fetch_contest_problem_list(&contest_id).await)
        }
        TrackerCommand::ProblemRange {
            contest_id,
            from,
            to,
        } => TrackerResponse::ProblemRange(
            fetch_problem_range(api, &contest_id, &from, &to).await,
        ),
    }
}
