//! `trainer diet` commands: save and generate week diets.

use anyhow::{Context, Result, bail};

use trainer_api::ApiClient;
use trainer_api::models::{DietJobRequest, SaveDiet};
use trainer_core::PlanSession;
use trainer_core::catalog::CatalogStore;
use trainer_core::generation::{GenerationRequest, JobState, PollerConfig};

use crate::DietCommands;

/// Dispatch a diet subcommand.
pub async fn run_diet_command(command: DietCommands, client: &ApiClient) -> Result<()> {
    match command {
        DietCommands::Save { week_id, file } => run_save(client, week_id, &file).await,
        DietCommands::Generate {
            week_id,
            notes,
            calories,
            output,
        } => {
            let request = DietJobRequest {
                week_id,
                notes,
                calories,
            };
            run_generate(client, request, output.as_deref()).await
        }
    }
}

/// Upload a text file as the week's diet.
async fn run_save(client: &ApiClient, week_id: i64, file: &str) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read diet file {file}"))?;

    if content.trim().is_empty() {
        bail!("Escribe la dieta antes de guardar.");
    }

    tracing::debug!(week_id, bytes = content.len(), "uploading diet");
    client
        .save_diet(&SaveDiet {
            week_id,
            content: content.trim().to_string(),
        })
        .await
        .with_context(|| format!("failed to save the diet for week {week_id}"))?;

    println!("Dieta guardada para la semana {week_id}.");
    Ok(())
}

/// Submit an AI diet job, wait for it, and show or write the result.
async fn run_generate(
    client: &ApiClient,
    request: DietJobRequest,
    output: Option<&str>,
) -> Result<()> {
    let mut session = PlanSession::new(CatalogStore::default());

    println!("Generando dieta para la semana {}...", request.week_id);
    let job = session
        .run_generation(
            client,
            GenerationRequest::Diet(request),
            &PollerConfig::default(),
        )
        .await?;

    match job.state {
        JobState::Ready => {
            println!("Dieta lista.");
            match output {
                Some(path) => {
                    std::fs::write(path, session.diet())
                        .with_context(|| format!("failed to write diet file {path}"))?;
                    println!("Dieta escrita en {path}.");
                }
                None => println!("{}", session.diet()),
            }
            Ok(())
        }
        _ => bail!(
            "{}",
            job.message
                .unwrap_or_else(|| "No se pudo generar la dieta.".to_string())
        ),
    }
}
