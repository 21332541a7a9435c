//! `trainer workout` commands: pull, save and generate week plans.

use std::path::Path;

use anyhow::{Context, Result, bail};

use trainer_api::ApiClient;
use trainer_api::models::{SaveWorkout, WorkoutJobRequest};
use trainer_core::PlanSession;
use trainer_core::catalog::CatalogStore;
use trainer_core::generation::{GenerationRequest, JobState, PollerConfig};
use trainer_core::plan::file::{PlanFile, parse_plan_toml};
use trainer_core::plan::{WorkoutPlan, normalize, serialize};

use crate::WorkoutCommands;

/// Dispatch a workout subcommand.
pub async fn run_workout_command(command: WorkoutCommands, client: &ApiClient) -> Result<()> {
    match command {
        WorkoutCommands::Pull { week_id, output } => {
            run_pull(client, week_id, output.as_deref()).await
        }
        WorkoutCommands::Save { week_id, file } => run_save(client, week_id, &file).await,
        WorkoutCommands::Generate {
            week_id,
            focus_muscle,
            days_per_week,
            ai_notes,
            output,
        } => {
            let request = WorkoutJobRequest {
                week_id,
                focus_muscle,
                days_per_week,
                ai_notes,
            };
            run_generate(client, request, output.as_deref()).await
        }
    }
}

/// Download the stored plan of a week as editable TOML.
async fn run_pull(client: &ApiClient, week_id: i64, output: Option<&str>) -> Result<()> {
    let status = client
        .week_status(week_id)
        .await
        .with_context(|| format!("failed to fetch status for week {week_id}"))?;

    let plan = normalize::normalize_from_wire(&status.workout_plan);
    if plan.is_empty() {
        println!("La semana {week_id} no tiene rutina guardada.");
        return Ok(());
    }

    write_plan(&plan, output)?;
    Ok(())
}

/// Upload a plan TOML file as the week's workout.
async fn run_save(client: &ApiClient, week_id: i64, file: &str) -> Result<()> {
    let plan = load_plan_file(Path::new(file))?;
    let wire = serialize::serialize_to_wire(&plan);

    if wire.is_empty() {
        bail!("Agrega ejercicios antes de guardar.");
    }

    tracing::debug!(week_id, days = wire.len(), "uploading workout plan");
    client
        .save_workout(&SaveWorkout {
            week_id,
            plan: wire,
        })
        .await
        .with_context(|| format!("failed to save the plan for week {week_id}"))?;

    println!("Plan guardado para la semana {week_id}.");
    Ok(())
}

/// Submit an AI workout job, wait for it, and show or write the result.
async fn run_generate(
    client: &ApiClient,
    request: WorkoutJobRequest,
    output: Option<&str>,
) -> Result<()> {
    // The session seeds manual edits from the catalog; generation only
    // needs it for consistency with the interactive flow.
    let catalog = client.fetch_catalog().await.unwrap_or_default();
    let mut session = PlanSession::new(CatalogStore::new(catalog));

    println!("Generando rutina para la semana {}...", request.week_id);
    let job = session
        .run_generation(
            client,
            GenerationRequest::Workout(request),
            &PollerConfig::default(),
        )
        .await?;

    match job.state {
        JobState::Ready => {
            println!("Rutina lista.");
            write_plan(session.plan(), output)?;
            Ok(())
        }
        _ => bail!(
            "{}",
            job.message
                .unwrap_or_else(|| "No se pudo generar la rutina.".to_string())
        ),
    }
}

/// Read and validate a plan TOML file into the in-memory model.
fn load_plan_file(path: &Path) -> Result<WorkoutPlan> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plan file {}", path.display()))?;
    let file = parse_plan_toml(&contents)
        .with_context(|| format!("invalid plan file {}", path.display()))?;
    Ok(file.into_plan())
}

/// Write a plan as TOML to a file, or to stdout when no path is given.
fn write_plan(plan: &WorkoutPlan, output: Option<&str>) -> Result<()> {
    let file = PlanFile::from_plan(plan);
    let contents = toml::to_string_pretty(&file).context("failed to serialize the plan")?;

    match output {
        Some(path) => {
            std::fs::write(path, &contents)
                .with_context(|| format!("failed to write plan file {path}"))?;
            println!("Plan escrito en {path}.");
        }
        None => print!("{contents}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_plan_file_roundtrips_sets_as_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[[days]]\nname = \"Lunes\"\n\n[[days.exercises]]\nexercise_id = 3\nsets = 4\n"
        )
        .unwrap();

        let plan = load_plan_file(file.path()).unwrap();
        assert_eq!(plan.days[0].exercises[0].exercise_id, Some(3));
        assert_eq!(plan.days[0].exercises[0].sets, "4");
    }

    #[test]
    fn load_plan_file_rejects_invalid_ids() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[[days]]\nname = \"Lunes\"\n\n[[days.exercises]]\nexercise_id = -2\n"
        )
        .unwrap();

        let err = load_plan_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid plan file"));
    }

    #[test]
    fn write_plan_emits_readable_toml() {
        let plan = WorkoutPlan {
            days: vec![trainer_core::plan::DayPlan {
                name: "Lunes".to_string(),
                exercises: vec![trainer_core::plan::ExerciseEntry {
                    exercise_id: Some(3),
                    sets: "4".to_string(),
                    reps: "8-10".to_string(),
                    notes: String::new(),
                }],
            }],
        };

        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("plan.toml");
        write_plan(&plan, Some(path.to_str().unwrap())).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let reparsed = parse_plan_toml(&written).unwrap();
        assert_eq!(reparsed.days[0].exercises[0].sets, Some(4));
    }
}
