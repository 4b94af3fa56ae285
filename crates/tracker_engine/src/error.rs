use std::fmt;

/// Failure of a platform API call.
///
/// [`ApiError::is_not_found`] is the only confirmed absence; transient
/// failures must never be read as "the problem does not exist".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == FailureKind::NotFound
    }

    /// The same call may succeed later; callers may retry with backoff.
    /// `NotFound`, `InvalidRequest`, `Rejected` and `TooLarge` are final.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::HttpStatus(_)
                | FailureKind::Timeout
                | FailureKind::Network
                | FailureKind::Malformed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The API answered, but no entry matched.
    NotFound,
    /// The request could not be built from the given arguments.
    InvalidRequest,
    HttpStatus(u16),
    Timeout,
    Network,
    /// HTTP 200 with a body that is not the expected JSON shape.
    Malformed,
    /// The API reported a status other than `OK`.
    Rejected { comment: Option<String> },
    /// The body exceeded `ApiSettings::max_bytes`. Not transient: a retry
    /// meets the same cap, so callers must raise the limit instead.
    TooLarge { max_bytes: u64, actual: Option<u64> },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Malformed => write!(f, "malformed response"),
            FailureKind::Rejected { comment: Some(comment) } => {
                write!(f, "rejected by api ({comment})")
            }
            FailureKind::Rejected { comment: None } => write!(f, "rejected by api"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
        }
    }
}
