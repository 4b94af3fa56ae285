//! Tracker engine: platform API client and the off-thread request handle.
mod api;
mod error;
mod handle;
mod settings;
mod wire;

pub use api::{fetch_problem_range, PlatformApi, ReqwestApiClient};
pub use error::{ApiError, FailureKind};
pub use handle::{
    HandleError, RequestId, TrackerCommand, TrackerEvent, TrackerHandle, TrackerResponse,
};
pub use settings::{ApiSettings, DEFAULT_API_BASE};
