//! In-place editor operations on a [`WorkoutPlan`].
//!
//! All operations are synchronous, mutate the plan directly and return
//! nothing; out-of-range indices are silently ignored. No validation
//! happens here — the serializer decides what is persistable. Callers
//! (the session controller) are responsible for triggering a re-render
//! after each mutation.

use super::{DayPlan, ExerciseEntry, WorkoutPlan};

/// The fixed weekday cycle used for naming new days.
pub const DAY_NAMES: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miercoles",
    "Jueves",
    "Viernes",
    "Sabado",
    "Domingo",
];

/// A mutable field of an [`ExerciseEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseField {
    ExerciseId,
    Sets,
    Reps,
    Notes,
}

/// Append a new empty day, named with the first weekday not already used
/// (case-insensitive match); `"Dia {n}"` once all seven are taken.
pub fn add_day(plan: &mut WorkoutPlan) {
    plan.days.push(DayPlan {
        name: next_day_name(plan),
        exercises: Vec::new(),
    });
}

/// Pick the name for the next day.
pub fn next_day_name(plan: &WorkoutPlan) -> String {
    let used: Vec<String> = plan.days.iter().map(|d| d.name.to_lowercase()).collect();
    DAY_NAMES
        .iter()
        .find(|candidate| !used.contains(&candidate.to_lowercase()))
        .map(|candidate| (*candidate).to_owned())
        .unwrap_or_else(|| format!("Dia {}", plan.days.len() + 1))
}

/// Remove the day at `day_index`. No-op when out of range.
pub fn remove_day(plan: &mut WorkoutPlan, day_index: usize) {
    if day_index < plan.days.len() {
        plan.days.remove(day_index);
    }
}

/// Append an exercise entry to the day, seeded with `default_id` (the
/// catalog's first exercise, or `None` when the store is empty). No-op
/// when the day index is out of range.
pub fn add_exercise(plan: &mut WorkoutPlan, day_index: usize, default_id: Option<i64>) {
    if let Some(day) = plan.days.get_mut(day_index) {
        day.exercises.push(ExerciseEntry {
            exercise_id: default_id,
            ..ExerciseEntry::default()
        });
    }
}

/// Remove one exercise entry. No-op when either index is out of range.
pub fn remove_exercise(plan: &mut WorkoutPlan, day_index: usize, exercise_index: usize) {
    if let Some(day) = plan.days.get_mut(day_index) {
        if exercise_index < day.exercises.len() {
            day.exercises.remove(exercise_index);
        }
    }
}

/// Rename a day. No-op when out of range.
pub fn update_day_name(plan: &mut WorkoutPlan, day_index: usize, value: &str) {
    if let Some(day) = plan.days.get_mut(day_index) {
        day.name = value.to_owned();
    }
}

/// Assign one field of an exercise entry. For [`ExerciseField::ExerciseId`]
/// the value is parsed as an integer; anything unparsable clears the id
/// (the entry then simply never serializes). No-op on invalid indices.
pub fn update_exercise_field(
    plan: &mut WorkoutPlan,
    day_index: usize,
    exercise_index: usize,
    field: ExerciseField,
    value: &str,
) {
    let Some(entry) = plan
        .days
        .get_mut(day_index)
        .and_then(|day| day.exercises.get_mut(exercise_index))
    else {
        return;
    };

    match field {
        ExerciseField::ExerciseId => {
            entry.exercise_id = value.trim().parse::<i64>().ok().filter(|id| *id != 0);
        }
        ExerciseField::Sets => entry.sets = value.to_owned(),
        ExerciseField::Reps => entry.reps = value.to_owned(),
        ExerciseField::Notes => entry.notes = value.to_owned(),
    }
}
