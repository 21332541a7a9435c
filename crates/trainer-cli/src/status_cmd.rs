//! `trainer status` command: show week progress and plan contents.

use anyhow::{Context, Result};

use trainer_api::ApiClient;
use trainer_api::models::ContentStatus;
use trainer_core::plan::normalize;

/// Run the status command.
///
/// When `week_id` is `Some`, shows the full status of that week, including
/// the stored plan. When `None`, lists every week visible to the coach.
pub async fn run_status(client: &ApiClient, week_id: Option<i64>) -> Result<()> {
    match week_id {
        Some(id) => run_week_status(client, id).await,
        None => run_week_listing(client).await,
    }
}

/// Show the full status of a single week.
async fn run_week_status(client: &ApiClient, week_id: i64) -> Result<()> {
    let status = client
        .week_status(week_id)
        .await
        .with_context(|| format!("failed to fetch status for week {week_id}"))?;

    println!("Semana {} — {}", status.id, status.student);
    println!("Activa: {}", if status.is_active { "si" } else { "no" });
    println!(
        "Rutina: {}   Dieta: {}",
        status_icon(status.workout_status),
        status_icon(status.diet_status),
    );
    println!();

    let plan = normalize::normalize_from_wire(&status.workout_plan);
    if plan.is_empty() {
        println!("Sin rutina guardada.");
    } else {
        for day in &plan.days {
            println!("{}:", day.name);
            for entry in &day.exercises {
                let id = entry.exercise_id.unwrap_or_default();
                let mut line = format!("  #{id}");
                if !entry.sets.is_empty() {
                    line.push_str(&format!("  {} series", entry.sets));
                }
                if !entry.reps.is_empty() {
                    line.push_str(&format!("  x {}", entry.reps));
                }
                if !entry.notes.is_empty() {
                    line.push_str(&format!("  ({})", entry.notes));
                }
                println!("{line}");
            }
        }
    }

    if let Some(diet) = status.diet_content.as_deref().filter(|d| !d.is_empty()) {
        println!();
        println!("Dieta:");
        for line in diet.lines() {
            println!("  {line}");
        }
    }

    Ok(())
}

/// List every week with a one-line summary.
async fn run_week_listing(client: &ApiClient) -> Result<()> {
    let weeks = client
        .list_week_statuses()
        .await
        .context("failed to list weeks")?;

    if weeks.is_empty() {
        println!("No hay semanas creadas.");
        return Ok(());
    }

    println!(
        "{:<8} {:<20} {:<12} {:<8} {:<12} {:<12}",
        "ID", "ESTUDIANTE", "INICIO", "ACTIVA", "RUTINA", "DIETA"
    );
    println!("{}", "-".repeat(74));

    for week in &weeks {
        let start = week
            .start_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<20} {:<12} {:<8} {:<12} {:<12}",
            week.id,
            week.student,
            start,
            if week.is_active { "si" } else { "" },
            status_icon(week.workout_status),
            status_icon(week.diet_status),
        );
    }

    Ok(())
}

/// One-word status column, in the coach's language.
fn status_icon(status: ContentStatus) -> &'static str {
    match status {
        ContentStatus::Ready => "lista",
        ContentStatus::Generating => "generando",
        ContentStatus::Error => "error",
        ContentStatus::Pending | ContentStatus::Unknown => "pendiente",
    }
}
