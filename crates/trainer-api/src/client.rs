//! Authenticated HTTP client for the coaching backend.
//!
//! Every helper returns [`ApiError`]; a 401 maps to
//! [`ApiError::Unauthorized`] so callers can send the user back to login,
//! and any other non-success status carries the raw response body.

use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{
    CatalogExercise, Credentials, DietJobRequest, JobAccepted, NewWeek, SaveDiet, SaveWorkout,
    TokenPair, Week, WeekStatus, WeekSummary, WorkoutJobRequest,
};

/// Fallback body text when an error response cannot be read.
const GENERIC_REQUEST_ERROR: &str = "Error en la peticion";

/// HTTP client for the coaching API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Build a client from a config. No per-request timeout is set; the
    /// generation poller bounds waiting with its own attempt ceiling.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn token(&self) -> Result<&str, ApiError> {
        self.config
            .access_token
            .as_deref()
            .ok_or(ApiError::MissingToken)
    }

    /// Map the response status, draining the body into the error on failure.
    async fn check(response: Response) -> Result<Response, ApiError> {
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = match response.text().await {
                Ok(text) if !text.is_empty() => text,
                _ => GENERIC_REQUEST_ERROR.to_owned(),
            };
            return Err(ApiError::Request { status, body });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.api_url(path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token()?)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.config.api_url(path);
        debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token()?)
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// POST where the caller does not care about the response body.
    async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.config.api_url(path);
        debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token()?)
            .json(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------

    /// Obtain a token pair from `POST /api/token/`. The only call that
    /// does not carry the bearer header.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        let url = self.config.api_url("/token/");
        let credentials = Credentials {
            username: username.to_owned(),
            password: password.to_owned(),
        };
        let response = self.http.post(&url).json(&credentials).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    // -----------------------------------------------------------------
    // Catalog
    // -----------------------------------------------------------------

    /// Fetch the exercise catalog. Public endpoint: sends the token when
    /// one is configured but does not require it.
    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogExercise>, ApiError> {
        let url = self.config.api_url("/catalog/videos/");
        debug!(%url, "GET");
        let mut request = self.http.get(&url);
        if let Some(token) = self.config.access_token.as_deref() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    // -----------------------------------------------------------------
    // Weeks
    // -----------------------------------------------------------------

    /// Create a week for a student. Previous weeks are deactivated
    /// server-side; the new week comes back active.
    pub async fn create_week(&self, new_week: &NewWeek) -> Result<Week, ApiError> {
        self.post_json("/plans/weeks/", new_week).await
    }

    /// Fetch the full workout/diet status of one week.
    pub async fn week_status(&self, week_id: i64) -> Result<WeekStatus, ApiError> {
        self.get_json(&format!("/plans/status/?week_id={week_id}"))
            .await
    }

    /// List the week summaries visible to this coach.
    pub async fn list_week_statuses(&self) -> Result<Vec<WeekSummary>, ApiError> {
        self.get_json("/plans/status/").await
    }

    // -----------------------------------------------------------------
    // Workouts / diets
    // -----------------------------------------------------------------

    /// Persist a serialized workout plan for a week.
    pub async fn save_workout(&self, payload: &SaveWorkout) -> Result<(), ApiError> {
        self.post_unit("/plans/workouts/", payload).await
    }

    /// Persist the diet text for a week.
    pub async fn save_diet(&self, payload: &SaveDiet) -> Result<(), ApiError> {
        self.post_unit("/plans/diets/", payload).await
    }

    /// Submit an AI workout-generation job for a week.
    pub async fn submit_workout_job(
        &self,
        request: &WorkoutJobRequest,
    ) -> Result<JobAccepted, ApiError> {
        self.post_json("/plans/workouts/ai/", request).await
    }

    /// Submit an AI diet-generation job for a week.
    pub async fn submit_diet_job(&self, request: &DietJobRequest) -> Result<JobAccepted, ApiError> {
        self.post_json("/plans/diets/ai/", request).await
    }
}
