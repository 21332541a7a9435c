//! The session controller: one coach editing one week.
//!
//! [`PlanSession`] owns the in-memory plan and diet text, the exercise
//! catalog, and the active-job registry. Every mutation goes through it so
//! the change callback fires exactly once per edit. Loading a week status
//! replaces the whole plan, including unsaved edits; callers that care must
//! save first.

use trainer_api::models::WeekStatus;

use crate::catalog::CatalogStore;
use crate::generation::tracker::JobTracker;
use crate::generation::{
    GeneratedContent, GenerationApi, GenerationError, GenerationJob, GenerationRequest, JobState,
    PollerConfig, run_generation_job,
};
use crate::plan::editor::{self, ExerciseField};
use crate::plan::{WorkoutPlan, normalize, serialize};

type ChangeCallback = Box<dyn Fn(&WorkoutPlan) + Send + Sync>;

pub struct PlanSession {
    plan: WorkoutPlan,
    diet: String,
    catalog: CatalogStore,
    jobs: JobTracker,
    on_change: Option<ChangeCallback>,
}

impl std::fmt::Debug for PlanSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanSession")
            .field("plan", &self.plan)
            .field("diet", &self.diet)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl PlanSession {
    pub fn new(catalog: CatalogStore) -> Self {
        Self {
            plan: WorkoutPlan::default(),
            diet: String::new(),
            catalog,
            jobs: JobTracker::new(),
            on_change: None,
        }
    }

    /// Register the observer that runs after every plan mutation.
    pub fn set_on_change(&mut self, callback: impl Fn(&WorkoutPlan) + Send + Sync + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn diet(&self) -> &str {
        &self.diet
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    fn notify(&self) {
        if let Some(callback) = &self.on_change {
            callback(&self.plan);
        }
    }

    // -- ingestion ---------------------------------------------------------

    /// Load a fetched week status into the session. The plan is replaced
    /// wholesale; the diet text only when the backend has content for it.
    pub fn load_week(&mut self, status: &WeekStatus) {
        self.plan = normalize::normalize_from_wire(&status.workout_plan);
        if let Some(content) = &status.diet_content {
            if !content.is_empty() {
                self.diet = content.clone();
            }
        }
        tracing::debug!(
            week_id = status.id,
            days = self.plan.len(),
            "week loaded into session"
        );
        self.notify();
    }

    /// Replace the plan directly (e.g. from an edited plan file).
    pub fn set_plan(&mut self, plan: WorkoutPlan) {
        self.plan = plan;
        self.notify();
    }

    /// Reset to an empty plan, as after creating a fresh week.
    pub fn clear_plan(&mut self) {
        self.plan = WorkoutPlan::default();
        self.notify();
    }

    pub fn set_diet(&mut self, content: impl Into<String>) {
        self.diet = content.into();
    }

    // -- editing -----------------------------------------------------------

    pub fn add_day(&mut self) {
        editor::add_day(&mut self.plan);
        self.notify();
    }

    pub fn remove_day(&mut self, day_index: usize) {
        editor::remove_day(&mut self.plan, day_index);
        self.notify();
    }

    /// Append an exercise seeded with the catalog's first id.
    pub fn add_exercise(&mut self, day_index: usize) {
        editor::add_exercise(&mut self.plan, day_index, self.catalog.first_id());
        self.notify();
    }

    pub fn remove_exercise(&mut self, day_index: usize, exercise_index: usize) {
        editor::remove_exercise(&mut self.plan, day_index, exercise_index);
        self.notify();
    }

    pub fn update_day_name(&mut self, day_index: usize, value: &str) {
        editor::update_day_name(&mut self.plan, day_index, value);
        self.notify();
    }

    pub fn update_exercise_field(
        &mut self,
        day_index: usize,
        exercise_index: usize,
        field: ExerciseField,
        value: &str,
    ) {
        editor::update_exercise_field(&mut self.plan, day_index, exercise_index, field, value);
        self.notify();
    }

    // -- persistence -------------------------------------------------------

    /// The persistable form of the current plan.
    pub fn serialize(&self) -> Vec<trainer_api::models::WireDay> {
        serialize::serialize_to_wire(&self.plan)
    }

    // -- generation --------------------------------------------------------

    /// Run an AI generation job to completion and apply its result.
    ///
    /// Fails fast without touching the backend when the week id is missing
    /// or a job for the same `(week_id, kind)` is already in flight. On
    /// `ready`, workout content replaces the plan (firing the change
    /// callback) and diet content replaces the diet text, exactly once.
    pub async fn run_generation(
        &mut self,
        api: &dyn GenerationApi,
        request: GenerationRequest,
        config: &PollerConfig,
    ) -> Result<GenerationJob, GenerationError> {
        if request.week_id() <= 0 {
            return Err(GenerationError::MissingWeekId);
        }
        let _guard = self.jobs.begin(request.week_id(), request.kind())?;

        let job = run_generation_job(api, &request, config).await;

        if job.state == JobState::Ready {
            match &job.content {
                Some(GeneratedContent::Workout(plan)) => {
                    self.plan = plan.clone();
                    self.notify();
                }
                Some(GeneratedContent::Diet(text)) => {
                    self.diet = text.clone();
                }
                None => {}
            }
        }

        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trainer_api::models::CatalogExercise;

    fn catalog() -> CatalogStore {
        CatalogStore::new(vec![CatalogExercise {
            id: 7,
            title: "Sentadilla".to_owned(),
            description: String::new(),
            video_url: "https://example.com/v/7".to_owned(),
            muscle_group: "Piernas".to_owned(),
            level: Default::default(),
            duration_seconds: None,
            equipment: String::new(),
        }])
    }

    fn status_with(plan: serde_json::Value, diet: Option<&str>) -> WeekStatus {
        serde_json::from_value(json!({
            "id": 11,
            "student": "ana",
            "is_active": true,
            "workout_status": "ready",
            "diet_status": "pending",
            "workout_plan": plan,
            "diet_content": diet,
        }))
        .expect("valid status")
    }

    #[test]
    fn load_week_replaces_plan_and_fills_diet() {
        let mut session = PlanSession::new(catalog());
        session.add_day();
        session.set_diet("borrador");

        let status = status_with(
            json!([{"name": "Lunes", "exercises": [{"exercise_id": 7}]}]),
            Some("dieta nueva"),
        );
        session.load_week(&status);

        assert_eq!(session.plan().len(), 1);
        assert_eq!(session.plan().days[0].name, "Lunes");
        assert_eq!(session.diet(), "dieta nueva");
    }

    #[test]
    fn load_week_keeps_diet_when_backend_has_none() {
        let mut session = PlanSession::new(catalog());
        session.set_diet("borrador");

        session.load_week(&status_with(json!([]), None));
        assert_eq!(session.diet(), "borrador");

        session.load_week(&status_with(json!([]), Some("")));
        assert_eq!(session.diet(), "borrador");
    }

    #[test]
    fn add_exercise_seeds_first_catalog_id() {
        let mut session = PlanSession::new(catalog());
        session.add_day();
        session.add_exercise(0);
        assert_eq!(session.plan().days[0].exercises[0].exercise_id, Some(7));
    }

    #[test]
    fn change_callback_fires_on_each_edit() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let mut session = PlanSession::new(catalog());
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        session.set_on_change(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        session.add_day();
        session.add_exercise(0);
        session.update_day_name(0, "Empuje");
        session.remove_exercise(0, 0);
        session.remove_day(0);

        assert_eq!(hits.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn missing_week_id_fails_before_any_submission() {
        let mut session = PlanSession::new(catalog());
        let request = GenerationRequest::Workout(Default::default());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let result = runtime.block_on(session.run_generation(
            &PanicApi,
            request,
            &PollerConfig::default(),
        ));
        assert!(matches!(result, Err(GenerationError::MissingWeekId)));
    }

    /// An API that must never be reached.
    struct PanicApi;

    #[async_trait::async_trait]
    impl GenerationApi for PanicApi {
        async fn submit_workout(
            &self,
            _: &trainer_api::models::WorkoutJobRequest,
        ) -> Result<trainer_api::models::JobAccepted, trainer_api::ApiError> {
            panic!("submission must not happen without a week id");
        }

        async fn submit_diet(
            &self,
            _: &trainer_api::models::DietJobRequest,
        ) -> Result<trainer_api::models::JobAccepted, trainer_api::ApiError> {
            panic!("submission must not happen without a week id");
        }

        async fn week_status(
            &self,
            _: i64,
        ) -> Result<trainer_api::models::WeekStatus, trainer_api::ApiError> {
            panic!("polling must not happen without a week id");
        }
    }
}
