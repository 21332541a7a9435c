//! Normalizer and serializer working as a pipeline over realistic wire
//! payloads.

use serde_json::json;

use trainer_core::plan::editor::{self, ExerciseField};
use trainer_core::plan::{normalize, serialize};

#[test]
fn legacy_payload_normalizes_edits_and_serializes_clean() {
    // Mixed legacy shapes: nested exercise refs, numeric sets, out-of-order
    // days, entries that cannot be kept.
    let raw = json!([
        {
            "day": "Martes",
            "order": 2,
            "exercises": [
                {"exercise": {"id": 12}, "sets": 3, "reps": "12", "order": 2},
                {"exercise_id": 8, "sets": "4", "reps": 10, "order": 1},
                {"sets": 5, "reps": "10"}
            ]
        },
        {
            "name": "Lunes",
            "order": 1,
            "exercises": [{"exercise_id": 0}, {"exercise_id": null}]
        }
    ]);

    let mut plan = normalize::normalize_from_wire(&raw);

    // "Lunes" lost all of its entries, so only "Martes" survives, with its
    // exercises reordered by the order field.
    assert_eq!(plan.len(), 1);
    assert_eq!(plan.days[0].name, "Martes");
    let ids: Vec<Option<i64>> = plan.days[0]
        .exercises
        .iter()
        .map(|e| e.exercise_id)
        .collect();
    assert_eq!(ids, vec![Some(8), Some(12)]);
    assert_eq!(plan.days[0].exercises[1].sets, "3");
    assert_eq!(plan.days[0].exercises[0].reps, "10");

    // Coach keeps editing: a free-text sets value and a new day.
    editor::update_exercise_field(&mut plan, 0, 0, ExerciseField::Sets, "al fallo");
    editor::add_day(&mut plan);
    editor::add_exercise(&mut plan, 1, Some(20));

    let wire = serialize::serialize_to_wire(&plan);

    assert_eq!(wire.len(), 2);
    assert_eq!(wire[0].day, "Martes");
    // Unparsable sets persist as null, the parsable one as a number.
    assert_eq!(wire[0].exercises[0].sets, None);
    assert_eq!(wire[0].exercises[1].sets, Some(3));
    // The fresh day picked the first unused weekday name.
    assert_eq!(wire[1].day, "Lunes");
    assert_eq!(wire[1].exercises[0].exercise_id, 20);
}

#[test]
fn serializing_a_normalized_payload_drops_nothing_new() {
    let raw = json!([
        {"name": "Lunes", "exercises": [
            {"exercise_id": 1, "sets": "3", "reps": "8-10", "notes": "tempo"},
            {"exercise_id": 2, "sets": 4}
        ]},
        {"name": "Jueves", "exercises": [{"exercise_id": 3}]}
    ]);

    let plan = normalize::normalize_from_wire(&raw);
    let wire = serialize::serialize_to_wire(&plan);

    // Everything the normalizer kept is persistable as-is.
    assert_eq!(wire.len(), plan.len());
    let total: usize = wire.iter().map(|d| d.exercises.len()).sum();
    assert_eq!(total, 3);
    assert_eq!(wire[0].exercises[0].sets, Some(3));
    assert_eq!(wire[0].exercises[0].notes, "tempo");
}

#[test]
fn editing_down_to_empty_serializes_to_empty_payload() {
    let raw = json!([
        {"name": "Lunes", "exercises": [{"exercise_id": 1}]}
    ]);
    let mut plan = normalize::normalize_from_wire(&raw);

    editor::update_exercise_field(&mut plan, 0, 0, ExerciseField::ExerciseId, "");

    // The day is still in the model for further editing...
    assert_eq!(plan.len(), 1);
    // ...but has nothing persistable left.
    assert!(serialize::serialize_to_wire(&plan).is_empty());
}
