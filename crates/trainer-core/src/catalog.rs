//! Read-only cache of the exercise catalog.
//!
//! Fetched once per session and looked up by id from then on. Plans
//! reference catalog exercises but never own them; a plan entry can carry
//! an id the store has never seen (stale weeks, deleted videos) and the
//! store simply returns `None` for it.

use trainer_api::models::{CatalogExercise, ExerciseLevel};

/// In-memory exercise catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    exercises: Vec<CatalogExercise>,
}

impl CatalogStore {
    /// Build a store from fetched catalog entries.
    pub fn new(exercises: Vec<CatalogExercise>) -> Self {
        Self { exercises }
    }

    /// Look up an exercise by id. Zero and negative ids never match.
    pub fn get(&self, id: i64) -> Option<&CatalogExercise> {
        if id <= 0 {
            return None;
        }
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Id of the first catalog entry, used to seed new plan entries.
    pub fn first_id(&self) -> Option<i64> {
        self.exercises.first().map(|e| e.id)
    }

    /// All exercises, in catalog order.
    pub fn all(&self) -> &[CatalogExercise] {
        &self.exercises
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }
}

/// Display label for an exercise: `"{title} ({muscle} | {level})"`, with
/// `"General"` standing in for a missing muscle group.
pub fn display_label(exercise: &CatalogExercise) -> String {
    let muscle = if exercise.muscle_group.is_empty() {
        "General"
    } else {
        &exercise.muscle_group
    };
    format!("{} ({} | {})", exercise.title, muscle, level_label(exercise.level))
}

/// Human-facing level label as shown in the coach UI.
pub fn level_label(level: ExerciseLevel) -> &'static str {
    match level {
        ExerciseLevel::Beginner => "Beginner",
        ExerciseLevel::Intermediate => "Intermedio",
        ExerciseLevel::Advanced => "Avanzado",
    }
}
