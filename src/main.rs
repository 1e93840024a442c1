use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use starkbank::api::http::format_api_error;
use starkbank::config::Config;
use starkbank::resource::{get_all_resource_keys, get_resource, ops, Resource};
use starkbank::resources::event::{self, Event};
use starkbank::{Client, Query, QueryStream};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command line client for the Stark Bank API
#[derive(Parser, Debug)]
#[command(name = "starkbank", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// "production" or "sandbox"
    #[arg(long, global = true)]
    environment: Option<String>,

    /// Project user id
    #[arg(long, global = true)]
    project_id: Option<String>,

    /// Organization user id
    #[arg(long, global = true)]
    organization_id: Option<String>,

    /// Workspace to act in as an organization
    #[arg(long, global = true)]
    workspace_id: Option<String>,

    /// PEM private key used to sign requests
    #[arg(long, global = true)]
    private_key: Option<PathBuf>,

    /// Language of API error messages ("en-US" or "pt-BR")
    #[arg(long, global = true)]
    language: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the known resources
    Resources,
    /// Stream every record matching the filters
    Query {
        resource: String,
        #[command(flatten)]
        filters: Filters,
    },
    /// Fetch a single page of records
    Page {
        resource: String,
        /// Cursor returned by a previous page
        #[arg(long)]
        cursor: Option<String>,
        #[command(flatten)]
        filters: Filters,
    },
    /// Fetch one record by id
    Get { resource: String, id: String },
    /// Save the global flags to the config file
    Config,
}

#[derive(ClapArgs, Debug, Default)]
struct Filters {
    /// Maximum number of records
    #[arg(long)]
    limit: Option<u32>,
    /// Only records created on or after this date (YYYY-MM-DD)
    #[arg(long)]
    after: Option<NaiveDate>,
    /// Only records created on or before this date (YYYY-MM-DD)
    #[arg(long)]
    before: Option<NaiveDate>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    ids: Vec<String>,
}

impl Filters {
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        if let Some(after) = self.after {
            query = query.after(after);
        }
        if let Some(before) = self.before {
            query = query.before(before);
        }
        if let Some(status) = &self.status {
            query = query.status(status);
        }
        if !self.tags.is_empty() {
            query = query.tags(self.tags.clone());
        }
        if !self.ids.is_empty() {
            query = query.ids(self.ids.clone());
        }
        query
    }
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

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("starkbank started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("starkbank").join("starkbank.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".starkbank").join("starkbank.log");
    }
    PathBuf::from("starkbank.log")
}

fn lookup_resource(name: &str) -> Result<Resource> {
    match get_resource(name) {
        Some(resource) => Ok(resource),
        None => bail!("Unknown resource {:?}. Run `starkbank resources` to list them.", name),
    }
}

fn print_json<T: Serialize>(record: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

fn print_event(event: &Event) -> Result<()> {
    let kind = if event.log.is_resolved() { "resolved" } else { "unresolved" };
    println!("# event {} ({} {} log)", event.id, kind, event.subscription);
    print_json(event)
}

async fn print_stream<T, F>(mut records: QueryStream<T>, print: F) -> Result<()>
where
    T: DeserializeOwned,
    F: Fn(&T) -> Result<()>,
{
    let mut failures = 0;
    while let Some(record) = records.next().await {
        match record {
            Ok(record) => print(&record)?,
            Err(err @ starkbank::Error::Decode { .. }) => {
                failures += 1;
                eprintln!("Skipped record: {}", err);
            }
            Err(err) => bail!(format_api_error(&err)),
        }
    }
    if failures > 0 {
        eprintln!("{} record(s) could not be decoded", failures);
    }
    Ok(())
}

async fn run(command: Command, config: Config) -> Result<()> {
    match command {
        Command::Resources => {
            for key in get_all_resource_keys() {
                println!("{}", key);
            }
        }
        Command::Config => {
            config.save()?;
            match Config::config_path() {
                Some(path) => println!("Saved {}", path.display()),
                None => println!("No config directory on this platform; nothing saved"),
            }
        }
        Command::Query { resource, filters } => {
            let resource = lookup_resource(&resource)?;
            let client = config.build_client()?;
            let query = filters.to_query();

            if resource == event::RESOURCE {
                print_stream(event::query(&client, query), print_event).await?;
            } else {
                let records = ops::query::<Value, Client>(&client, &resource, query);
                print_stream(records, print_json::<Value>).await?;
            }
        }
        Command::Page {
            resource,
            cursor,
            filters,
        } => {
            let resource = lookup_resource(&resource)?;
            let client = config.build_client()?;
            let mut query = filters.to_query();
            if let Some(cursor) = &cursor {
                query = query.cursor(cursor);
            }

            let cursor = if resource == event::RESOURCE {
                let (events, cursor) = event::page(&client, &query)
                    .await
                    .map_err(|e| anyhow::anyhow!(format_api_error(&e)))?;
                for event in &events {
                    print_event(event)?;
                }
                cursor
            } else {
                let (records, cursor) = ops::page::<Value, _>(&client, &resource, &query)
                    .await
                    .map_err(|e| anyhow::anyhow!(format_api_error(&e)))?;
                for record in &records {
                    print_json(record)?;
                }
                cursor
            };

            match cursor {
                Some(cursor) => eprintln!("Next cursor: {}", cursor),
                None => eprintln!("Last page"),
            }
        }
        Command::Get { resource, id } => {
            let resource = lookup_resource(&resource)?;
            let client = config.build_client()?;

            if resource == event::RESOURCE {
                let event = event::get(&client, &id)
                    .await
                    .map_err(|e| anyhow::anyhow!(format_api_error(&e)))?;
                print_event(&event)?;
            } else {
                let record = ops::get::<Value, _>(&client, &resource, &id)
                    .await
                    .map_err(|e| anyhow::anyhow!(format_api_error(&e)))?;
                print_json(&record)?;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();
    config.merge(Config {
        environment: args.environment,
        project_id: args.project_id,
        organization_id: args.organization_id,
        workspace_id: args.workspace_id,
        private_key_path: args.private_key,
        language: args.language,
    });

    run(args.command, config).await
}
