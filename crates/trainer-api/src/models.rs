use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Generation status of a week's workout or diet content.
///
/// The backend reports `pending`, `generating`, `ready` and `error`; any
/// other value folds into [`ContentStatus::Unknown`], which consumers must
/// treat exactly like `pending` ("keep waiting").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    #[default]
    Pending,
    Generating,
    Ready,
    Error,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Generating => "generating",
            Self::Ready => "ready",
            Self::Error => "error",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

impl FromStr for ContentStatus {
    type Err = std::convert::Infallible;

    /// Total: unrecognized values map to [`ContentStatus::Unknown`], the
    /// same folding the serde deserializer applies.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "pending" => Self::Pending,
            "generating" => Self::Generating,
            "ready" => Self::Ready,
            "error" => Self::Error,
            _ => Self::Unknown,
        })
    }
}

// ---------------------------------------------------------------------------

/// Difficulty level of a catalog exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for ExerciseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beginner => "BEGINNER",
            Self::Intermediate => "INTERMEDIATE",
            Self::Advanced => "ADVANCED",
        };
        f.write_str(s)
    }
}

impl FromStr for ExerciseLevel {
    type Err = ExerciseLevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BEGINNER" => Ok(Self::Beginner),
            "INTERMEDIATE" => Ok(Self::Intermediate),
            "ADVANCED" => Ok(Self::Advanced),
            other => Err(ExerciseLevelParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`ExerciseLevel`] string.
#[derive(Debug, Clone)]
pub struct ExerciseLevelParseError(pub String);

impl fmt::Display for ExerciseLevelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid exercise level: {:?}", self.0)
    }
}

impl std::error::Error for ExerciseLevelParseError {}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// An exercise from the video catalog. Reference metadata only: plans point
/// at it by id and never own it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogExercise {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub video_url: String,
    #[serde(default)]
    pub muscle_group: String,
    #[serde(default)]
    pub level: ExerciseLevel,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub equipment: String,
}

// ---------------------------------------------------------------------------
// Weeks
// ---------------------------------------------------------------------------

/// Payload for creating a week. The backend deactivates the student's
/// previous weeks and marks the new one active.
#[derive(Debug, Clone, Serialize)]
pub struct NewWeek {
    pub student: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A created week, as returned by `POST /api/plans/weeks/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Week {
    pub id: i64,
    pub student: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One row of `GET /api/plans/status/` (the coach's week listing).
#[derive(Debug, Clone, Deserialize)]
pub struct WeekSummary {
    pub id: i64,
    /// Student username, not id.
    pub student: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    #[serde(default)]
    pub workout_status: ContentStatus,
    #[serde(default)]
    pub diet_status: ContentStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// Full status of one week (`GET /api/plans/status/?week_id={id}`).
///
/// `workout_plan` stays raw JSON here; the normalizer in `trainer-core`
/// owns turning it into a typed plan, tolerating any malformed shape.
#[derive(Debug, Clone, Deserialize)]
pub struct WeekStatus {
    pub id: i64,
    pub student: String,
    pub is_active: bool,
    #[serde(default)]
    pub workout_status: ContentStatus,
    #[serde(default)]
    pub diet_status: ContentStatus,
    #[serde(default)]
    pub workout_plan: serde_json::Value,
    #[serde(default)]
    pub workout_content: Option<String>,
    #[serde(default)]
    pub diet_content: Option<String>,
}

// ---------------------------------------------------------------------------
// Plan wire shapes
// ---------------------------------------------------------------------------

/// Nested exercise reference inside a raw plan entry
/// (`{"exercise": {"id": 3, ...}}`).
#[derive(Debug, Clone, Deserialize)]
pub struct RawExerciseRef {
    pub id: Option<i64>,
}

/// One exercise of a raw (wire) day. `sets`, `reps` and `notes` are kept
/// loose on purpose: legacy rows carry numbers and strings interchangeably
/// and ingestion must never fail on them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawExercise {
    #[serde(default)]
    pub exercise_id: Option<i64>,
    #[serde(default)]
    pub exercise: Option<RawExerciseRef>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub sets: Option<serde_json::Value>,
    #[serde(default)]
    pub reps: Option<serde_json::Value>,
    #[serde(default)]
    pub notes: Option<serde_json::Value>,
}

/// One day of a raw (wire) plan. The label arrives as `name` or `day`
/// depending on the endpoint; `order` decides the week layout, not the
/// array position.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDay {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub exercises: Vec<RawExercise>,
}

/// One exercise of a serialized day, ready to persist. Invariant: only
/// produced with a real `exercise_id`; `sets` is `None` when the edited
/// value did not parse as a base-10 integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireExercise {
    pub exercise_id: i64,
    pub sets: Option<i64>,
    pub reps: String,
    pub notes: String,
}

/// One serialized day. Invariant: `exercises` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDay {
    pub day: String,
    pub exercises: Vec<WireExercise>,
}

/// Payload for `POST /api/plans/workouts/`.
#[derive(Debug, Clone, Serialize)]
pub struct SaveWorkout {
    pub week_id: i64,
    pub plan: Vec<WireDay>,
}

/// Payload for `POST /api/plans/diets/`.
#[derive(Debug, Clone, Serialize)]
pub struct SaveDiet {
    pub week_id: i64,
    pub content: String,
}

// ---------------------------------------------------------------------------
// AI generation jobs
// ---------------------------------------------------------------------------

/// Payload for `POST /api/plans/workouts/ai/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkoutJobRequest {
    pub week_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_muscle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_per_week: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_notes: Option<String>,
}

/// Payload for `POST /api/plans/diets/ai/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DietJobRequest {
    pub week_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
}

/// Acknowledgement returned by the AI submission endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct JobAccepted {
    pub message: String,
    pub status: ContentStatus,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Payload for `POST /api/token/`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Token pair returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_status_display_roundtrip() {
        let variants = [
            ContentStatus::Pending,
            ContentStatus::Generating,
            ContentStatus::Ready,
            ContentStatus::Error,
        ];
        for v in &variants {
            let s = v.to_string();
            let parsed: ContentStatus = s.parse().expect("infallible");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn content_status_unknown_folds() {
        let parsed: ContentStatus = "queued".parse().expect("infallible");
        assert_eq!(parsed, ContentStatus::Unknown);

        let deserialized: ContentStatus =
            serde_json::from_value(serde_json::json!("queued")).expect("serde(other) catches it");
        assert_eq!(deserialized, ContentStatus::Unknown);
    }

    #[test]
    fn exercise_level_display_roundtrip() {
        let variants = [
            ExerciseLevel::Beginner,
            ExerciseLevel::Intermediate,
            ExerciseLevel::Advanced,
        ];
        for v in &variants {
            let s = v.to_string();
            let parsed: ExerciseLevel = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn exercise_level_invalid() {
        let result = "ELITE".parse::<ExerciseLevel>();
        assert!(result.is_err());
    }

    #[test]
    fn raw_day_accepts_day_alias_and_nested_exercise() {
        let raw: RawDay = serde_json::from_value(serde_json::json!({
            "day": "Lunes",
            "order": 1,
            "exercises": [
                {"exercise": {"id": 7}, "sets": 4, "reps": "8-10", "notes": ""}
            ]
        }))
        .expect("should deserialize");

        assert_eq!(raw.day.as_deref(), Some("Lunes"));
        assert!(raw.name.is_none());
        assert_eq!(raw.exercises.len(), 1);
        assert_eq!(
            raw.exercises[0].exercise.as_ref().and_then(|e| e.id),
            Some(7)
        );
    }

    #[test]
    fn raw_exercise_tolerates_missing_fields() {
        let raw: RawExercise = serde_json::from_value(serde_json::json!({})).expect("all default");
        assert!(raw.exercise_id.is_none());
        assert!(raw.exercise.is_none());
        assert!(raw.sets.is_none());
    }

    #[test]
    fn job_request_omits_absent_options() {
        let req = WorkoutJobRequest {
            week_id: 3,
            ..Default::default()
        };
        let value = serde_json::to_value(&req).expect("should serialize");
        assert_eq!(value, serde_json::json!({"week_id": 3}));
    }

    #[test]
    fn week_status_defaults_plan_to_null() {
        let status: WeekStatus = serde_json::from_value(serde_json::json!({
            "id": 12,
            "student": "ana",
            "is_active": true,
            "workout_status": "pending",
            "diet_status": "pending"
        }))
        .expect("should deserialize");
        assert!(status.workout_plan.is_null());
        assert!(status.diet_content.is_none());
    }
}
