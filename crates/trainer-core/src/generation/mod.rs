//! Asynchronous AI-generation jobs and the bounded-retry poller.
//!
//! One [`GenerationJob`] exists per `(week_id, kind)` key. The state
//! machine:
//!
//! ```text
//! idle      -> requested   (trigger, week id validated)
//! requested -> polling     (submission accepted)
//! requested -> error       (submission failed; polling never starts)
//! polling   -> ready       (status `ready`; content applied exactly once)
//! polling   -> error       (status `error`, or the status fetch itself failed)
//! polling   -> timed_out   (attempt ceiling exhausted)
//! ```
//!
//! Every terminal state stays terminal: retrying means starting a fresh
//! requested cycle. Completion is observed by polling only; there is no
//! push channel.

pub mod tracker;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use trainer_api::models::{
    ContentStatus, DietJobRequest, JobAccepted, WeekStatus, WorkoutJobRequest,
};
use trainer_api::{ApiClient, ApiError};

use crate::plan::{WorkoutPlan, normalize};

/// Fail-fast message when a generation is triggered without a week id.
pub const MSG_MISSING_WEEK_ID: &str = "Define el Week ID primero.";
/// Timeout message: the backend job may still finish on its own.
pub const MSG_TIMED_OUT: &str =
    "Sigue en proceso; puede completarse en segundo plano. Consulta el estado mas tarde.";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What a job generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Workout,
    Diet,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Workout => "workout",
            Self::Diet => "diet",
        };
        f.write_str(s)
    }
}

/// Lifecycle state of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Requested,
    Polling,
    Ready,
    Error,
    TimedOut,
}

impl JobState {
    /// Whether the job can no longer make progress.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Error | Self::TimedOut)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Requested => "requested",
            Self::Polling => "polling",
            Self::Ready => "ready",
            Self::Error => "error",
            Self::TimedOut => "timed_out",
        };
        f.write_str(s)
    }
}

/// Submission parameters for one job.
#[derive(Debug, Clone)]
pub enum GenerationRequest {
    Workout(WorkoutJobRequest),
    Diet(DietJobRequest),
}

impl GenerationRequest {
    pub fn week_id(&self) -> i64 {
        match self {
            Self::Workout(r) => r.week_id,
            Self::Diet(r) => r.week_id,
        }
    }

    pub fn kind(&self) -> JobKind {
        match self {
            Self::Workout(_) => JobKind::Workout,
            Self::Diet(_) => JobKind::Diet,
        }
    }
}

/// Content received from a job that reached `ready`.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedContent {
    /// Already pushed through the normalizer.
    Workout(WorkoutPlan),
    Diet(String),
}

/// One generation job, tracked through its lifecycle.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub week_id: i64,
    pub kind: JobKind,
    pub state: JobState,
    /// Status fetches issued so far.
    pub attempt: u32,
    /// Set exactly once, on the `ready` transition.
    pub content: Option<GeneratedContent>,
    /// User-facing note for the current state (ack text, error, timeout).
    pub message: Option<String>,
}

impl GenerationJob {
    pub fn new(week_id: i64, kind: JobKind) -> Self {
        Self {
            week_id,
            kind,
            state: JobState::Idle,
            attempt: 0,
            content: None,
            message: None,
        }
    }
}

/// Polling parameters. The defaults give the 40 × 3000 ms ≈ 120 s budget.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 40,
            interval: Duration::from_millis(3000),
        }
    }
}

/// Errors raised before a job ever reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("{MSG_MISSING_WEEK_ID}")]
    MissingWeekId,

    /// A job for the same `(week_id, kind)` is still in flight. The
    /// original UI let a second trigger race the first loop over the same
    /// model; here the new trigger is rejected instead.
    #[error("ya hay una generacion de {kind} en curso para la semana {week_id}")]
    JobAlreadyActive { week_id: i64, kind: JobKind },
}

// ---------------------------------------------------------------------------
// Backend seam
// ---------------------------------------------------------------------------

/// The slice of the API the poller needs. Object-safe so tests can hand in
/// a scripted mock.
#[async_trait]
pub trait GenerationApi: Send + Sync {
    async fn submit_workout(&self, request: &WorkoutJobRequest) -> Result<JobAccepted, ApiError>;
    async fn submit_diet(&self, request: &DietJobRequest) -> Result<JobAccepted, ApiError>;
    async fn week_status(&self, week_id: i64) -> Result<WeekStatus, ApiError>;
}

#[async_trait]
impl GenerationApi for ApiClient {
    async fn submit_workout(&self, request: &WorkoutJobRequest) -> Result<JobAccepted, ApiError> {
        self.submit_workout_job(request).await
    }

    async fn submit_diet(&self, request: &DietJobRequest) -> Result<JobAccepted, ApiError> {
        self.submit_diet_job(request).await
    }

    async fn week_status(&self, week_id: i64) -> Result<WeekStatus, ApiError> {
        ApiClient::week_status(self, week_id).await
    }
}

// Compile-time assertion: the seam must stay object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn GenerationApi) {}
};

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Drive one job from `requested` to a terminal state.
///
/// Submits the request, then polls the week status up to
/// `config.max_attempts` times with `config.interval` between attempts.
/// A failed status fetch aborts to `error` immediately — transport errors
/// are not treated as transient. Returns the job in its terminal state;
/// the caller applies `job.content` to the model.
pub async fn run_generation_job(
    api: &dyn GenerationApi,
    request: &GenerationRequest,
    config: &PollerConfig,
) -> GenerationJob {
    let mut job = GenerationJob::new(request.week_id(), request.kind());

    job.state = JobState::Requested;
    let accepted = match request {
        GenerationRequest::Workout(r) => api.submit_workout(r).await,
        GenerationRequest::Diet(r) => api.submit_diet(r).await,
    };

    match accepted {
        Ok(ack) => {
            tracing::info!(
                week_id = job.week_id,
                kind = %job.kind,
                status = %ack.status,
                "generation job submitted"
            );
            job.message = Some(format!("{} (status: {})", ack.message, ack.status));
        }
        Err(err) => {
            tracing::warn!(
                week_id = job.week_id,
                kind = %job.kind,
                error = %err,
                "generation submission failed"
            );
            job.state = JobState::Error;
            job.message = Some(err.to_string());
            return job;
        }
    }

    job.state = JobState::Polling;

    for attempt in 0..config.max_attempts {
        job.attempt = attempt + 1;

        let status = match api.week_status(job.week_id).await {
            Ok(status) => status,
            Err(err) => {
                tracing::warn!(
                    week_id = job.week_id,
                    kind = %job.kind,
                    attempt = job.attempt,
                    error = %err,
                    "status fetch failed, aborting poll loop"
                );
                job.state = JobState::Error;
                job.message = Some(err.to_string());
                return job;
            }
        };

        let content_status = match job.kind {
            JobKind::Workout => status.workout_status,
            JobKind::Diet => status.diet_status,
        };

        match content_status {
            ContentStatus::Ready => {
                job.content = Some(match job.kind {
                    JobKind::Workout => GeneratedContent::Workout(normalize::normalize_from_wire(
                        &status.workout_plan,
                    )),
                    JobKind::Diet => {
                        GeneratedContent::Diet(status.diet_content.unwrap_or_default())
                    }
                });
                job.state = JobState::Ready;
                job.message = Some(match job.kind {
                    JobKind::Workout => "Rutina lista.".to_owned(),
                    JobKind::Diet => "Dieta lista.".to_owned(),
                });
                tracing::info!(
                    week_id = job.week_id,
                    kind = %job.kind,
                    attempt = job.attempt,
                    "generation job ready"
                );
                return job;
            }
            ContentStatus::Error => {
                job.state = JobState::Error;
                job.message = Some(match job.kind {
                    JobKind::Workout => "No se pudo generar la rutina.".to_owned(),
                    JobKind::Diet => "No se pudo generar la dieta.".to_owned(),
                });
                tracing::warn!(
                    week_id = job.week_id,
                    kind = %job.kind,
                    attempt = job.attempt,
                    "generation job reported error"
                );
                return job;
            }
            // pending, generating, or anything the backend invents later:
            // keep waiting.
            _ => {
                tracing::debug!(
                    week_id = job.week_id,
                    kind = %job.kind,
                    attempt = job.attempt,
                    status = %content_status,
                    "generation still in progress"
                );
                if attempt + 1 < config.max_attempts {
                    tokio::time::sleep(config.interval).await;
                }
            }
        }
    }

    tracing::warn!(
        week_id = job.week_id,
        kind = %job.kind,
        attempts = config.max_attempts,
        "generation poll budget exhausted"
    );
    job.state = JobState::TimedOut;
    job.message = Some(MSG_TIMED_OUT.to_owned());
    job
}
