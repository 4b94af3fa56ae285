use futures_util::StreamExt;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracker_core::{
    index_range, ContestProblem, ProblemCoordinate, ProblemMetadata, Submission,
};
use tracker_logging::{tracker_debug, tracker_trace, tracker_warn};
use url::Url;

use crate::error::{ApiError, FailureKind};
use crate::settings::ApiSettings;
use crate::wire::{
    Envelope, ProblemsetResult, StandingsResult, WireProblem, WireSubmission, STATUS_OK,
};

/// Platform API operations. One call is one request; nothing is retried.
#[async_trait::async_trait]
pub trait PlatformApi: Send + Sync {
    /// Look `coordinate` up in the full problem catalog.
    async fn fetch_problem_metadata(
        &self,
        coordinate: &ProblemCoordinate,
    ) -> Result<ProblemMetadata, ApiError>;

    /// Up to `max_count` most recent submissions of `handle`, newest first.
    async fn fetch_submission_history(
        &self,
        handle: &str,
        max_count: usize,
    ) -> Result<Vec<Submission>, ApiError>;

    async fn fetch_contest_problem_list(
        &self,
        contest_id: &str,
    ) -> Result<Vec<ContestProblem>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    client: reqwest::Client,
    base: Url,
    max_bytes: u64,
}

impl ReqwestApiClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidRequest, err.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base,
            max_bytes: settings.max_bytes,
        })
    }

    fn endpoint(&self, method: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self
            .base
            .join(method)
            .map_err(|err| ApiError::new(FailureKind::InvalidRequest, err.to_string()))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    /// GET `url` and return the `result` member of an `OK` envelope.
    async fn call<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracker_debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            let comment = match read_body(response, self.max_bytes).await {
                Ok(body) => serde_json::from_slice::<Envelope>(&body)
                    .ok()
                    .and_then(|envelope| envelope.comment),
                Err(_) => None,
            };
            tracker_warn!("{} answered {}", url, status);
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                comment.unwrap_or_else(|| status.to_string()),
            ));
        }

        let body = read_body(response, self.max_bytes).await?;
        let envelope: Envelope = serde_json::from_slice(&body).map_err(|err| {
            tracker_warn!("malformed response from {}: {}", url, err);
            ApiError::new(FailureKind::Malformed, err.to_string())
        })?;

        if envelope.status != STATUS_OK {
            tracker_warn!(
                "{} returned status {} ({:?})",
                url,
                envelope.status,
                envelope.comment
            );
            let message = envelope
                .comment
                .clone()
                .unwrap_or_else(|| format!("status {}", envelope.status));
            return Err(ApiError::new(
                FailureKind::Rejected {
                    comment: envelope.comment,
                },
                message,
            ));
        }

        let result = envelope.result.ok_or_else(|| {
            tracker_warn!("malformed response from {}: missing result", url);
            ApiError::new(FailureKind::Malformed, "missing result")
        })?;
        serde_json::from_value(result).map_err(|err| {
            tracker_warn!("malformed result from {}: {}", url, err);
            ApiError::new(FailureKind::Malformed, err.to_string())
        })
    }
}

#[async_trait::async_trait]
impl PlatformApi for ReqwestApiClient {
    async fn fetch_problem_metadata(
        &self,
        coordinate: &ProblemCoordinate,
    ) -> Result<ProblemMetadata, ApiError> {
        // Catalog IDs are numbers; a non-canonical ID can never match one.
        let Some(wanted) = canonical_contest_id(coordinate.contest_id()) else {
            return Err(not_found(coordinate));
        };

        let url = self.endpoint("problemset.problems", &[])?;
        let catalog: ProblemsetResult = self.call(url).await?;
        tracker_trace!("catalog has {} problems", catalog.problems.len());

        catalog
            .problems
            .into_iter()
            .find(|problem| {
                problem.contest_id == Some(wanted)
                    && problem.index.eq_ignore_ascii_case(coordinate.index())
            })
            .map(|problem| ProblemMetadata {
                name: problem.name,
                rating: problem.rating.unwrap_or(0),
                coordinate: ProblemCoordinate::new(coordinate.contest_id(), problem.index),
            })
            .ok_or_else(|| not_found(coordinate))
    }

    async fn fetch_submission_history(
        &self,
        handle: &str,
        max_count: usize,
    ) -> Result<Vec<Submission>, ApiError> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(ApiError::new(FailureKind::InvalidRequest, "empty handle"));
        }
        if max_count == 0 {
            return Ok(Vec::new());
        }

        let count = max_count.to_string();
        let url = self.endpoint(
            "user.status",
            &[("handle", handle), ("from", "1"), ("count", count.as_str())],
        )?;
        let submissions: Vec<WireSubmission> = self.call(url).await?;

        Ok(submissions
            .into_iter()
            .filter_map(|submission| {
                let contest_id = submission.problem.contest_id.or(submission.contest_id);
                let Some(contest_id) = contest_id else {
                    tracker_trace!(
                        "skipping submission for {} without contest",
                        submission.problem.index
                    );
                    return None;
                };
                Some(Submission::new(
                    ProblemCoordinate::new(contest_id.to_string(), submission.problem.index),
                    submission.verdict.unwrap_or_default(),
                ))
            })
            .collect())
    }

    async fn fetch_contest_problem_list(
        &self,
        contest_id: &str,
    ) -> Result<Vec<ContestProblem>, ApiError> {
        let contest_id = contest_id.trim();
        if canonical_contest_id(contest_id).is_none() {
            return Err(ApiError::new(
                FailureKind::InvalidRequest,
                format!("invalid contest id {contest_id:?}"),
            ));
        }

        let url = self.endpoint(
            "contest.standings",
            &[("contestId", contest_id), ("from", "1"), ("count", "1")],
        )?;
        let standings: StandingsResult = self.call(url).await?;

        Ok(standings
            .problems
            .into_iter()
            .map(|problem: WireProblem| ContestProblem {
                coordinate: ProblemCoordinate::new(contest_id, problem.index),
                name: problem.name,
            })
            .collect())
    }
}

/// Metadata for every index in `from..=to` of one contest.
///
/// Lookups run concurrently; results come back in index order. An invalid
/// range yields no results.
pub async fn fetch_problem_range(
    api: &dyn PlatformApi,
    contest_id: &str,
    from: &str,
    to: &str,
) -> Vec<(String, Result<ProblemMetadata, ApiError>)> {
    let Some(indices) = index_range(from, to) else {
        tracker_warn!("invalid problem range {}..={}", from, to);
        return Vec::new();
    };

    let lookups = indices.into_iter().map(move |index| async move {
        let coordinate = ProblemCoordinate::new(contest_id, index.as_str());
        let result = api.fetch_problem_metadata(&coordinate).await;
        (index, result)
    });
    futures_util::future::join_all(lookups).await
}

fn canonical_contest_id(contest_id: &str) -> Option<u64> {
    contest_id
        .parse::<u64>()
        .ok()
        .filter(|id| id.to_string() == contest_id)
}

fn not_found(coordinate: &ProblemCoordinate) -> ApiError {
    ApiError::new(
        FailureKind::NotFound,
        format!("problem {coordinate} not in catalog"),
    )
}

async fn read_body(response: reqwest::Response, max_bytes: u64) -> Result<Vec<u8>, ApiError> {
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(too_large(max_bytes, content_len));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            return Err(too_large(max_bytes, next_len));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn too_large(max_bytes: u64, actual: u64) -> ApiError {
    ApiError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
