//! Model-to-wire serialization.
//!
//! The inverse of normalization, and the single place the persistence
//! invariants are enforced: the produced payload never contains a day with
//! zero exercises or an exercise without an id. Like the normalizer it is
//! total — malformed entries are dropped, not reported.

use trainer_api::models::{WireDay, WireExercise};

use super::WorkoutPlan;

/// Serialize a plan for `POST /api/plans/workouts/`.
///
/// Day names are trimmed (blank falls back to `"Dia"`); entries with a
/// falsy id are dropped, and days left without exercises are dropped with
/// them. `sets` parses base-10; unparsable input serializes to `None`.
pub fn serialize_to_wire(plan: &WorkoutPlan) -> Vec<WireDay> {
    plan.days
        .iter()
        .filter_map(|day| {
            let exercises: Vec<WireExercise> = day
                .exercises
                .iter()
                .filter(|entry| entry.has_exercise())
                .map(|entry| WireExercise {
                    exercise_id: entry.exercise_id.unwrap_or_default(),
                    sets: entry.sets.trim().parse::<i64>().ok(),
                    reps: entry.reps.trim().to_owned(),
                    notes: entry.notes.trim().to_owned(),
                })
                .collect();

            if exercises.is_empty() {
                return None;
            }

            let name = day.name.trim();
            Some(WireDay {
                day: if name.is_empty() { "Dia" } else { name }.to_owned(),
                exercises,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{DayPlan, ExerciseEntry};

    fn entry(id: Option<i64>, sets: &str, reps: &str, notes: &str) -> ExerciseEntry {
        ExerciseEntry {
            exercise_id: id,
            sets: sets.to_owned(),
            reps: reps.to_owned(),
            notes: notes.to_owned(),
        }
    }

    #[test]
    fn drops_idless_entries_and_empty_days() {
        let plan = WorkoutPlan {
            days: vec![
                DayPlan {
                    name: "Lunes".to_owned(),
                    exercises: vec![entry(None, "3", "10", ""), entry(Some(0), "3", "10", "")],
                },
                DayPlan {
                    name: "Martes".to_owned(),
                    exercises: vec![entry(Some(4), "3", "10", "")],
                },
            ],
        };
        let wire = serialize_to_wire(&plan);
        assert_eq!(wire.len(), 1);
        assert_eq!(wire[0].day, "Martes");
        assert_eq!(wire[0].exercises.len(), 1);
        assert_eq!(wire[0].exercises[0].exercise_id, 4);
    }

    #[test]
    fn sets_coercion_null_on_unparsable() {
        let plan = WorkoutPlan {
            days: vec![DayPlan {
                name: "Lunes".to_owned(),
                exercises: vec![
                    entry(Some(1), "abc", "", ""),
                    entry(Some(2), "4", "", ""),
                    entry(Some(3), " 5 ", "", ""),
                    entry(Some(4), "", "", ""),
                ],
            }],
        };
        let wire = serialize_to_wire(&plan);
        let sets: Vec<Option<i64>> = wire[0].exercises.iter().map(|e| e.sets).collect();
        assert_eq!(sets, vec![None, Some(4), Some(5), None]);
    }

    #[test]
    fn trims_names_reps_and_notes() {
        let plan = WorkoutPlan {
            days: vec![DayPlan {
                name: "  Empuje  ".to_owned(),
                exercises: vec![entry(Some(1), "3", " 8-10 ", " controlado ")],
            }],
        };
        let wire = serialize_to_wire(&plan);
        assert_eq!(wire[0].day, "Empuje");
        assert_eq!(wire[0].exercises[0].reps, "8-10");
        assert_eq!(wire[0].exercises[0].notes, "controlado");
    }

    #[test]
    fn blank_day_name_falls_back() {
        let plan = WorkoutPlan {
            days: vec![DayPlan {
                name: "   ".to_owned(),
                exercises: vec![entry(Some(1), "", "", "")],
            }],
        };
        let wire = serialize_to_wire(&plan);
        assert_eq!(wire[0].day, "Dia");
    }

    #[test]
    fn empty_plan_serializes_to_empty_payload() {
        assert!(serialize_to_wire(&WorkoutPlan::default()).is_empty());
    }
}
