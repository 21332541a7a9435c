//! The in-memory weekly workout model and its mappings.
//!
//! The model is deliberately permissive while editing: entries without an
//! exercise id and days without exercises are allowed to exist so the coach
//! can see what they are building. The serializer is where the persistence
//! invariants are enforced (no id-less exercise, no empty day ever reaches
//! the wire).

pub mod editor;
pub mod file;
pub mod normalize;
pub mod serialize;

/// One exercise slot in a day. `sets` stays free text until serialization,
/// where it is coerced to a base-10 integer or dropped to null.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExerciseEntry {
    /// Catalog reference. Not validated against the store at write time;
    /// `None` (or a zero id) means the entry is never persisted.
    pub exercise_id: Option<i64>,
    pub sets: String,
    /// Free text, may encode a range ("8-10").
    pub reps: String,
    pub notes: String,
}

impl ExerciseEntry {
    /// Whether this entry carries a persistable exercise reference.
    pub fn has_exercise(&self) -> bool {
        matches!(self.exercise_id, Some(id) if id != 0)
    }
}

/// One day of the week plan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DayPlan {
    pub name: String,
    pub exercises: Vec<ExerciseEntry>,
}

/// The weekly workout plan. Day order is significant (week layout); it is
/// reconstructed from the wire `order` field on ingestion and preserved
/// through editing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkoutPlan {
    pub days: Vec<DayPlan>,
}

impl WorkoutPlan {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }
}
