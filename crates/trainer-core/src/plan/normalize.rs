//! Wire-to-model normalization.
//!
//! Pure and total: never returns an error. Malformed input degrades to an
//! empty or partial plan, which matches how the rest of the pipeline treats
//! incomplete data (drop, don't fail).

use serde_json::Value;

use trainer_api::models::{RawDay, RawExercise};

use super::{DayPlan, ExerciseEntry, WorkoutPlan};

/// Normalize the raw `workout_plan` JSON of a week status into a
/// [`WorkoutPlan`].
///
/// Non-array input yields an empty plan; a day that does not deserialize
/// is skipped.
pub fn normalize_from_wire(raw: &Value) -> WorkoutPlan {
    let Some(items) = raw.as_array() else {
        return WorkoutPlan::default();
    };
    let days: Vec<RawDay> = items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();
    normalize_days(&days)
}

/// Normalize already-typed raw days.
///
/// Days and exercises are ordered by their `order` field (missing/null is
/// 0), stable on original position for ties — the array position itself
/// carries no meaning on the wire. Entries without a resolvable exercise
/// id are dropped, and days left empty are dropped with them.
pub fn normalize_days(raw_days: &[RawDay]) -> WorkoutPlan {
    let mut ordered: Vec<&RawDay> = raw_days.iter().collect();
    ordered.sort_by_key(|day| day.order.unwrap_or(0));

    let mut days = Vec::new();
    for (position, raw) in ordered.iter().enumerate() {
        let mut exercises: Vec<&RawExercise> = raw.exercises.iter().collect();
        exercises.sort_by_key(|ex| ex.order.unwrap_or(0));

        let entries: Vec<ExerciseEntry> = exercises
            .into_iter()
            .filter_map(|ex| {
                let id = resolve_exercise_id(ex)?;
                Some(ExerciseEntry {
                    exercise_id: Some(id),
                    sets: loose_text(ex.sets.as_ref()),
                    reps: loose_text(ex.reps.as_ref()),
                    notes: loose_text(ex.notes.as_ref()),
                })
            })
            .collect();

        if entries.is_empty() {
            continue;
        }

        days.push(DayPlan {
            name: day_name(raw, position),
            exercises: entries,
        });
    }

    WorkoutPlan { days }
}

/// Resolve the catalog reference from `exercise_id` or the nested
/// `exercise.id`. A zero id counts as absent.
fn resolve_exercise_id(ex: &RawExercise) -> Option<i64> {
    ex.exercise_id
        .filter(|id| *id != 0)
        .or_else(|| ex.exercise.as_ref().and_then(|r| r.id).filter(|id| *id != 0))
}

/// `name`, then `day`, then `"Dia {n}"` (1-based position after sorting).
fn day_name(raw: &RawDay, position: usize) -> String {
    raw.name
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| raw.day.clone().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| format!("Dia {}", position + 1))
}

/// Legacy rows store numbers where the editor stores text; fold both into
/// the model's string fields.
fn loose_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
