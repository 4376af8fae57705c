use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use yext::api::format_api_error;
use yext::config::Config;
use yext::entity::{Entity, Event, LocationEntity};
use yext::resource::{CustomField, EntityListOptions, Yext};

/// Command line client for the Yext API
#[derive(Parser, Debug)]
#[command(name = "yext", version, about, long_about = None)]
struct Cli {
    /// API key (overrides config and YEXT_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Account id, defaults to `me`
    #[arg(short, long, global = true)]
    account: Option<String>,

    /// API root URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Print raw JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Work with entities
    #[command(subcommand)]
    Entities(EntityCommand),
    /// Work with custom fields
    #[command(subcommand)]
    CustomFields(CustomFieldCommand),
    /// Save the given connection flags to the config file
    Configure,
}

#[derive(Subcommand, Debug)]
enum EntityCommand {
    /// List every entity
    List(EntityListArgs),
    /// Show one entity
    Get { id: String },
    /// Delete an entity
    Delete { id: String },
}

#[derive(Args, Debug)]
struct EntityListArgs {
    /// Restrict to a saved search
    #[arg(long)]
    search_id: Option<String>,

    /// Resolve embedded field placeholders
    #[arg(long)]
    resolve_placeholders: bool,
}

#[derive(Subcommand, Debug)]
enum CustomFieldCommand {
    /// List every custom field
    List,
    /// Show one custom field
    Get { id: String },
    /// Delete a custom field
    Delete { id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    // YEXT_LOG narrows output per module, e.g. `yext::resource=trace`
    let filter = EnvFilter::try_from_env("YEXT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(tracing_level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("yext started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("yext").join("yext.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".yext").join("yext.log");
    }
    PathBuf::from("yext.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = setup_logging(cli.log_level);

    let flags = Config {
        api_key: cli.api_key.clone(),
        account_id: cli.account.clone(),
        base_url: cli.base_url.clone(),
        version: None,
    };

    if let Command::Configure = cli.command {
        // Environment values are never persisted
        let mut stored = Config::load_file();
        stored.apply_overrides(&flags);
        stored.save().context("Failed to save configuration")?;
        println!("Configuration saved");
        return Ok(());
    }

    let mut config = Config::load();
    config.apply_overrides(&flags);

    let yext = Yext::from_config(&config.client_config()?)?;

    if let Err(err) = run(&yext, &cli).await {
        tracing::error!("Command failed: {}", err);
        eprintln!("Error: {}", format_api_error(&err));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(yext: &Yext, cli: &Cli) -> yext::Result<()> {
    match &cli.command {
        Command::Entities(EntityCommand::List(args)) => {
            let opts = EntityListOptions {
                search_id: args.search_id.clone().unwrap_or_default(),
                resolve_placeholders: args.resolve_placeholders,
                ..Default::default()
            };
            let entities = yext.entities.list_all(Some(&opts)).await?;
            for entity in &entities {
                print_entity(&**entity, cli.json)?;
            }
            if !cli.json {
                println!("{} entities", entities.len());
            }
        }
        Command::Entities(EntityCommand::Get { id }) => {
            let (entity, _) = yext.entities.get(id).await?;
            print_entity(&*entity, cli.json)?;
        }
        Command::Entities(EntityCommand::Delete { id }) => {
            yext.entities.delete(id).await?;
            println!("Deleted entity {}", id);
        }
        Command::CustomFields(CustomFieldCommand::List) => {
            let fields = yext.custom_fields.list_all().await?;
            for field in &fields {
                print_custom_field(field, cli.json)?;
            }
            if !cli.json {
                println!("{} custom fields", fields.len());
            }
        }
        Command::CustomFields(CustomFieldCommand::Get { id }) => {
            let (field, _) = yext.custom_fields.get(id).await?;
            print_custom_field(&field, cli.json)?;
        }
        Command::CustomFields(CustomFieldCommand::Delete { id }) => {
            yext.custom_fields.delete(id).await?;
            println!("Deleted custom field {}", id);
        }
        Command::Configure => {}
    }
    Ok(())
}

fn print_entity(entity: &dyn Entity, json: bool) -> yext::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&entity.to_value()?)?);
        return Ok(());
    }

    let name = if let Some(location) = entity.downcast_ref::<LocationEntity>() {
        location.name().unwrap_or("-").to_string()
    } else if let Some(event) = entity.downcast_ref::<Event>() {
        event.name.clone().unwrap_or_else(|| "-".to_string())
    } else {
        "-".to_string()
    };

    println!(
        "{:<24} {:<12} {}",
        entity.entity_id(),
        entity.entity_type(),
        name
    );
    Ok(())
}

fn print_custom_field(field: &CustomField, json: bool) -> yext::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(field)?);
    } else {
        println!("{:<12} {:<16} {}", field.id(), field.field_type, field.name);
    }
    Ok(())
}
