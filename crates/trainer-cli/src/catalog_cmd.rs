//! `trainer catalog` command: list the exercise video catalog.

use anyhow::{Context, Result};

use trainer_api::ApiClient;
use trainer_api::models::CatalogExercise;
use trainer_core::catalog::{CatalogStore, level_label};

/// Run the catalog command: fetch, filter, print.
pub async fn run_catalog(
    client: &ApiClient,
    muscle: Option<&str>,
    level: Option<&str>,
    verbose: bool,
) -> Result<()> {
    let exercises = client
        .fetch_catalog()
        .await
        .context("failed to fetch the exercise catalog")?;
    let store = CatalogStore::new(exercises);

    let filtered: Vec<&CatalogExercise> = store
        .all()
        .iter()
        .filter(|e| matches_filters(e, muscle, level))
        .collect();

    if filtered.is_empty() {
        println!("No hay ejercicios que coincidan.");
        return Ok(());
    }

    if verbose {
        for exercise in &filtered {
            print_verbose(exercise);
        }
    } else {
        println!("{:<6} {:<32} {:<16} {:<12}", "ID", "TITULO", "MUSCULO", "NIVEL");
        println!("{}", "-".repeat(68));
        for exercise in &filtered {
            let title = truncated(&exercise.title, 30);
            let muscle_display = if exercise.muscle_group.is_empty() {
                "General"
            } else {
                &exercise.muscle_group
            };
            println!(
                "{:<6} {:<32} {:<16} {:<12}",
                exercise.id,
                title,
                muscle_display,
                level_label(exercise.level),
            );
        }
    }

    println!();
    println!("{} ejercicios.", filtered.len());
    Ok(())
}

fn matches_filters(exercise: &CatalogExercise, muscle: Option<&str>, level: Option<&str>) -> bool {
    if let Some(m) = muscle {
        if !exercise
            .muscle_group
            .to_lowercase()
            .contains(&m.to_lowercase())
        {
            return false;
        }
    }
    if let Some(l) = level {
        if !exercise.level.to_string().eq_ignore_ascii_case(l) {
            return false;
        }
    }
    true
}

fn print_verbose(exercise: &CatalogExercise) {
    println!("[{}] {}", exercise.id, exercise.title);
    if !exercise.muscle_group.is_empty() {
        println!("  musculo: {}", exercise.muscle_group);
    }
    println!("  nivel: {}", level_label(exercise.level));
    if let Some(seconds) = exercise.duration_seconds {
        println!("  duracion: {seconds}s");
    }
    if !exercise.equipment.is_empty() {
        println!("  equipo: {}", exercise.equipment);
    }
    println!("  video: {}", exercise.video_url);
    if !exercise.description.is_empty() {
        println!("  {}", exercise.description);
    }
    println!();
}

fn truncated(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
