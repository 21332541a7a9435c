//! On-disk plan TOML format.
//!
//! The CLI emits and consumes week plans as editable TOML: `[[days]]`
//! tables with nested `[[days.exercises]]`. Parsing validates structure
//! (readable TOML, at least one day, unique day names, positive exercise
//! ids); the semantic dropping of incomplete entries stays in the
//! serializer, as it does for every other ingestion path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{DayPlan, ExerciseEntry, WorkoutPlan};

/// Top-level structure of a plan TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanFile {
    #[serde(default)]
    pub days: Vec<DayToml>,
}

/// A single `[[days]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayToml {
    /// Day label ("Lunes", "Empuje", ...).
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseToml>,
}

/// A single `[[days.exercises]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseToml {
    /// Catalog exercise id.
    pub exercise_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reps: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

/// Errors that can occur while parsing and validating a plan file.
#[derive(Debug, Error)]
pub enum PlanFileError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("plan must contain at least one day")]
    NoDays,

    #[error("duplicate day name: {0:?}")]
    DuplicateDayName(String),

    #[error("invalid exercise_id {value} on day {day:?} (must be positive)")]
    InvalidExerciseId { day: String, value: i64 },
}

/// Parse and validate a plan TOML string.
pub fn parse_plan_toml(content: &str) -> Result<PlanFile, PlanFileError> {
    let file: PlanFile = toml::from_str(content)?;
    validate(&file)?;
    Ok(file)
}

fn validate(file: &PlanFile) -> Result<(), PlanFileError> {
    if file.days.is_empty() {
        return Err(PlanFileError::NoDays);
    }

    let mut seen = Vec::new();
    for day in &file.days {
        let lowered = day.name.to_lowercase();
        if seen.contains(&lowered) {
            return Err(PlanFileError::DuplicateDayName(day.name.clone()));
        }
        seen.push(lowered);

        for exercise in &day.exercises {
            if exercise.exercise_id <= 0 {
                return Err(PlanFileError::InvalidExerciseId {
                    day: day.name.clone(),
                    value: exercise.exercise_id,
                });
            }
        }
    }

    Ok(())
}

impl PlanFile {
    /// Export an in-memory plan as a file. Entries without an exercise id
    /// are left out (they could not be re-read anyway) but empty days are
    /// kept so the coach sees what they were editing.
    pub fn from_plan(plan: &WorkoutPlan) -> Self {
        Self {
            days: plan
                .days
                .iter()
                .map(|day| DayToml {
                    name: day.name.clone(),
                    exercises: day
                        .exercises
                        .iter()
                        .filter(|entry| entry.has_exercise())
                        .map(|entry| ExerciseToml {
                            exercise_id: entry.exercise_id.unwrap_or_default(),
                            sets: entry.sets.trim().parse::<i64>().ok(),
                            reps: entry.reps.trim().to_owned(),
                            notes: entry.notes.trim().to_owned(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Turn the file into the in-memory model.
    pub fn into_plan(self) -> WorkoutPlan {
        WorkoutPlan {
            days: self
                .days
                .into_iter()
                .map(|day| DayPlan {
                    name: day.name,
                    exercises: day
                        .exercises
                        .into_iter()
                        .map(|exercise| ExerciseEntry {
                            exercise_id: Some(exercise.exercise_id),
                            sets: exercise.sets.map(|s| s.to_string()).unwrap_or_default(),
                            reps: exercise.reps,
                            notes: exercise.notes,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
