mod catalog_cmd;
mod config;
mod diet_cmds;
mod status_cmd;
mod week_cmds;
mod workout_cmds;

#[cfg(test)]
mod test_util;

use clap::{Parser, Subcommand};

use trainer_api::ApiClient;

use config::TrainerConfig;

#[derive(Parser)]
#[command(name = "trainer", about = "Assign weekly workout and diet plans to coached students")]
struct Cli {
    /// Backend base URL (overrides TRAINER_API_URL env var)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a trainer config file
    Init {
        /// Backend base URL to store
        #[arg(long, default_value = trainer_api::ApiConfig::DEFAULT_URL)]
        api_url: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Log in and store the access token in the config file
    Login {
        /// Backend username
        username: String,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// List the exercise video catalog
    Catalog {
        /// Filter by muscle group (substring, case-insensitive)
        #[arg(long)]
        muscle: Option<String>,
        /// Filter by level: BEGINNER, INTERMEDIATE, ADVANCED
        #[arg(long)]
        level: Option<String>,
        /// Show full details for each exercise
        #[arg(long)]
        verbose: bool,
    },
    /// Week management
    Week {
        #[command(subcommand)]
        command: WeekCommands,
    },
    /// Show week status (omit week_id to list all weeks)
    Status {
        /// Week ID to show status for (omit to list all weeks)
        week_id: Option<i64>,
    },
    /// Workout plan management
    Workout {
        #[command(subcommand)]
        command: WorkoutCommands,
    },
    /// Diet management
    Diet {
        #[command(subcommand)]
        command: DietCommands,
    },
}

#[derive(Subcommand)]
pub enum WeekCommands {
    /// Create a week for a student (deactivates their previous weeks)
    Create {
        /// Student ID to create the week for
        student: i64,
        /// Start date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start_date: Option<chrono::NaiveDate>,
        /// End date (YYYY-MM-DD, defaults to start + 6 days)
        #[arg(long)]
        end_date: Option<chrono::NaiveDate>,
    },
}

#[derive(Subcommand)]
pub enum WorkoutCommands {
    /// Download a week's workout plan as editable TOML
    Pull {
        /// Week ID to pull the plan from
        week_id: i64,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Save a plan TOML file as the week's workout
    Save {
        /// Week ID to save the plan to
        week_id: i64,
        /// Path to the plan TOML file
        file: String,
    },
    /// Generate a workout with AI and wait for the result
    Generate {
        /// Week ID to generate for
        week_id: i64,
        /// Muscle group to emphasize
        #[arg(long)]
        focus_muscle: Option<String>,
        /// Number of training days
        #[arg(long)]
        days_per_week: Option<u32>,
        /// Free-form instructions for the generator
        #[arg(long)]
        ai_notes: Option<String>,
        /// Write the generated plan to this TOML file
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DietCommands {
    /// Save a text file as the week's diet
    Save {
        /// Week ID to save the diet to
        week_id: i64,
        /// Path to the diet text file
        file: String,
    },
    /// Generate a diet with AI and wait for the result
    Generate {
        /// Week ID to generate for
        week_id: i64,
        /// Free-form instructions for the generator
        #[arg(long)]
        notes: Option<String>,
        /// Daily calorie target
        #[arg(long)]
        calories: Option<u32>,
        /// Write the generated diet to this file
        #[arg(long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { api_url, force } => {
            config::cmd_init(&api_url, force)?;
        }
        Commands::Login { username, password } => {
            let resolved = TrainerConfig::resolve(cli.api_url.as_deref())?;
            let client = ApiClient::new(resolved.api_config);
            config::cmd_login(&client, &username, password.as_deref()).await?;
        }
        Commands::Catalog {
            muscle,
            level,
            verbose,
        } => {
            let resolved = TrainerConfig::resolve(cli.api_url.as_deref())?;
            let client = ApiClient::new(resolved.api_config);
            catalog_cmd::run_catalog(&client, muscle.as_deref(), level.as_deref(), verbose)
                .await?;
        }
        Commands::Week { command } => {
            let resolved = TrainerConfig::resolve(cli.api_url.as_deref())?;
            let client = ApiClient::new(resolved.api_config);
            week_cmds::run_week_command(command, &client).await?;
        }
        Commands::Status { week_id } => {
            let resolved = TrainerConfig::resolve(cli.api_url.as_deref())?;
            let client = ApiClient::new(resolved.api_config);
            status_cmd::run_status(&client, week_id).await?;
        }
        Commands::Workout { command } => {
            let resolved = TrainerConfig::resolve(cli.api_url.as_deref())?;
            let client = ApiClient::new(resolved.api_config);
            workout_cmds::run_workout_command(command, &client).await?;
        }
        Commands::Diet { command } => {
            let resolved = TrainerConfig::resolve(cli.api_url.as_deref())?;
            let client = ApiClient::new(resolved.api_config);
            diet_cmds::run_diet_command(command, &client).await?;
        }
    }

    Ok(())
}
