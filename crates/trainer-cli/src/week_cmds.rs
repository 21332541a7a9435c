//! `trainer week` commands.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

use trainer_api::ApiClient;
use trainer_api::models::NewWeek;

use crate::WeekCommands;

/// Dispatch a week subcommand.
pub async fn run_week_command(command: WeekCommands, client: &ApiClient) -> Result<()> {
    match command {
        WeekCommands::Create {
            student,
            start_date,
            end_date,
        } => run_create(client, student, start_date, end_date).await,
    }
}

/// Create a week. The backend deactivates the student's previous weeks, so
/// the new week always starts active and empty.
async fn run_create(
    client: &ApiClient,
    student: i64,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<()> {
    let start = start_date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let end = end_date.unwrap_or(start + Duration::days(6));

    anyhow::ensure!(end >= start, "end date {end} is before start date {start}");

    println!("Creando semana...");
    let week = client
        .create_week(&NewWeek {
            student,
            start_date: start,
            end_date: end,
        })
        .await
        .with_context(|| format!("failed to create a week for student {student}"))?;

    println!(
        "Semana {} creada para el estudiante {} ({} a {}).",
        week.id, week.student, week.start_date, week.end_date
    );
    println!("La semana empieza vacia; usa `trainer workout save` o `trainer workout generate`.");

    Ok(())
}
