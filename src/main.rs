//! Command-line entry point for the clinic staffing calculator
//!
//! Each invocation loads the saved providers and shift assignments, applies
//! one user action or runs an estimate, and saves the result.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use clinic_staffing::config::AppConfig;
use clinic_staffing::input::EstimationRequest;
use clinic_staffing::shift::{get_shift_windows, is_special_day};
use clinic_staffing::state::storage::open_store;
use clinic_staffing::state::{apply, Command};
use clinic_staffing::types::{AppState, ProviderId, ShiftKey};
use clinic_staffing::{estimate, input, report, utils, StaffingError};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Clinic Staffing - estimate the patients still to be seen today
#[derive(Parser)]
#[command(
    name = "clinic-staffing",
    version,
    about = "Walk-in clinic staffing calculator",
    long_about = "Keeps a list of providers with their patients-per-hour rates, assigns them to the \
                 opening, mid and close shifts, and estimates how many patients remain to be seen \
                 from the current time and the number of patients in the lobby."
)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        global = true,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Data directory override
    #[arg(long, global = true, value_name = "DIR", help = "Override the data directory")]
    data_dir: Option<PathBuf>,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug mode with verbose logging")]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage providers
    Provider {
        #[command(subcommand)]
        action: ProviderAction,
    },
    /// Toggle a provider's assignment to a shift
    Assign {
        /// Shift (opening, mid, close)
        shift: ShiftKey,
        /// Provider ID or unique prefix
        provider: String,
    },
    /// Show the shift windows for a date
    Schedule {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Estimate the remaining patients
    Estimate {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Current time (HH:MM), defaults to now
        #[arg(long)]
        time: Option<String>,
        /// Patients currently in the lobby
        #[arg(long, allow_hyphen_values = true)]
        lobby: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ProviderAction {
    /// Add a provider
    Add {
        /// Provider name
        #[arg(short, long)]
        name: Option<String>,
        /// Patients per hour
        #[arg(short, long, allow_hyphen_values = true)]
        rate: Option<String>,
        /// Lock the provider right away
        #[arg(short, long)]
        submit: bool,
    },
    /// List providers
    List,
    /// Change an editable provider's name
    Rename { provider: String, name: String },
    /// Change an editable provider's patients per hour
    Rate {
        provider: String,
        #[arg(allow_hyphen_values = true)]
        rate: String,
    },
    /// Lock a provider's name and rate
    Submit { provider: String },
    /// Unlock a provider for editing
    Edit { provider: String },
    /// Delete a provider and their shift assignments
    Delete { provider: String },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(data_dir) = &args.data_dir {
        config.storage.data_dir = data_dir.clone();
    }

    clinic_staffing::config::validate_config(&config)?;
    Ok(config)
}

/// Resolve a full provider id or a unique prefix of one
fn resolve_provider(state: &AppState, value: &str) -> Result<ProviderId> {
    if let Ok(id) = value.parse::<ProviderId>() {
        return Ok(id);
    }

    let needle = value.trim().to_lowercase();
    let matches: Vec<ProviderId> = state
        .providers
        .iter()
        .map(|p| p.id)
        .filter(|id| !needle.is_empty() && id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(StaffingError::validation(format!("no provider matches '{}'", value)).into()),
        _ => Err(StaffingError::validation(format!(
            "'{}' matches {} providers, use a longer prefix",
            value,
            matches.len()
        ))
        .into()),
    }
}

/// Translate a provider action into state commands
fn provider_commands(state: &AppState, action: &ProviderAction) -> Result<Vec<Command>> {
    let commands = match action {
        ProviderAction::Add { name, rate, submit } => {
            let add = Command::add_provider();
            let id = add.provider_id();
            let mut commands = vec![add];
            if let Some(name) = name {
                commands.push(Command::SetName {
                    id,
                    value: name.clone(),
                });
            }
            if let Some(rate) = rate {
                commands.push(Command::SetRate {
                    id,
                    value: rate.clone(),
                });
            }
            if *submit {
                commands.push(Command::Submit { id });
            }
            commands
        }
        ProviderAction::List => Vec::new(),
        ProviderAction::Rename { provider, name } => vec![Command::SetName {
            id: resolve_provider(state, provider)?,
            value: name.clone(),
        }],
        ProviderAction::Rate { provider, rate } => vec![Command::SetRate {
            id: resolve_provider(state, provider)?,
            value: rate.clone(),
        }],
        ProviderAction::Submit { provider } => vec![Command::Submit {
            id: resolve_provider(state, provider)?,
        }],
        ProviderAction::Edit { provider } => vec![Command::Unlock {
            id: resolve_provider(state, provider)?,
        }],
        ProviderAction::Delete { provider } => vec![Command::Delete {
            id: resolve_provider(state, provider)?,
        }],
    };

    Ok(commands)
}

/// Apply all commands or none of them
fn apply_all(state: &AppState, commands: Vec<Command>) -> Result<AppState> {
    commands
        .into_iter()
        .try_fold(state.clone(), |current, command| apply(&current, command))
}

fn run(args: Args, config: AppConfig) -> Result<()> {
    let store = open_store(&config.storage);
    let state = store.load()?;
    debug!(
        "Loaded {} providers from {:?} storage",
        state.providers.len(),
        config.storage.backend
    );

    match &args.command {
        Commands::Provider { action } => {
            let commands = provider_commands(&state, action)?;
            if commands.is_empty() {
                println!("{}", report::render_providers(&state));
                return Ok(());
            }

            let next = apply_all(&state, commands)?;
            store.save(&next)?;
            println!("{}", report::render_providers(&next));
        }
        Commands::Assign { shift, provider } => {
            let id = resolve_provider(&state, provider)?;
            let next = apply(&state, Command::ToggleAssignment { shift: *shift, id })?;
            store.save(&next)?;

            let status = if next.shift_assignments.contains(*shift, &id) {
                "assigned to"
            } else {
                "removed from"
            };
            println!("Provider {} {} the {} shift", id, status, shift);
        }
        Commands::Schedule { date } => {
            let date = match date {
                Some(date) => input::parse_date(date)?,
                None => utils::today(),
            };
            let special = is_special_day(date);
            println!("Shifts for {}:", date);
            println!("{}", report::render_schedule(&get_shift_windows(special), special));
        }
        Commands::Estimate {
            date,
            time,
            lobby,
            json,
        } => {
            let date = date
                .clone()
                .unwrap_or_else(|| utils::today().format("%Y-%m-%d").to_string());
            let time = time.clone().unwrap_or_else(|| {
                let (hour, minute) = utils::current_hour_minute();
                format!("{:02}:{:02}", hour, minute)
            });

            let request = EstimationRequest::parse(
                Some(date.as_str()),
                Some(time.as_str()),
                lobby.as_deref(),
            )?;
            let result = estimate(&request.context(&state));
            info!(
                "Estimate for {} at {}: {} remaining patients",
                request.selected_date, request.current_time, result.total
            );

            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", report::render_estimate(&result));
            }
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args, config) {
        match e.downcast_ref::<StaffingError>() {
            Some(kind) if kind.is_user_error() => {
                eprintln!("{}", kind);
                std::process::exit(2);
            }
            _ => {
                error!("{:#}", e);
                std::process::exit(1);
            }
        }
    }
}
