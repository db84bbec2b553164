mod logging;
mod settings;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use storefront_api::{CommerceReport, render_scores, router, serve};
use storefront_core::{CountryCode, Error as CoreError, describe_connection};
use storefront_seed::{FakerSource, LocaleKey, ProductPolicy, SeedError, SeedProfile, Seeder};
use storefront_store::{ScoreService, SqliteAdapter, SqlitePool, connect};
use thiserror::Error;
use tokio::net::TcpListener;

use logging::{LoggingError, init_logging};
use settings::{Settings, SettingsError};

#[derive(Debug, Error)]
enum CliError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("store error: {0}")]
    Store(#[from] CoreError),
    #[error("seed error: {0}")]
    Seed(#[from] SeedError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "storefront", version, about = "Storefront data layer CLI")]
struct Cli {
    /// Settings file (defaults to ./storefront.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Connection string; overrides the settings file and environment.
    #[arg(long, global = true, value_name = "URL")]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reset the commerce tables and fill them with fake data.
    Seed(SeedArgs),
    /// Run the commerce queries and print their results.
    Report(ReportArgs),
    /// Serve the scoring HTTP API.
    Serve(ServeArgs),
    /// Print the best score of every player.
    Scores(ScoresArgs),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Seed(_) => "seed",
            Self::Report(_) => "report",
            Self::Serve(_) => "serve",
            Self::Scores(_) => "scores",
        }
    }
}

#[derive(Args, Debug)]
struct SeedArgs {
    #[arg(long)]
    products: Option<u32>,
    #[arg(long)]
    customers: Option<u32>,
    /// Minimum orders per customer (inclusive).
    #[arg(long)]
    min_orders: Option<u32>,
    /// Maximum orders per customer (inclusive).
    #[arg(long)]
    max_orders: Option<u32>,
    /// Product picked by each order: latest or uniform.
    #[arg(long)]
    policy: Option<ProductPolicy>,
    /// RNG seed; the same seed reproduces the same data.
    #[arg(long)]
    seed: Option<u64>,
    /// Faker locale (en_US, pt_BR); repeatable.
    #[arg(long = "locale", value_name = "LOCALE")]
    locales: Vec<LocaleKey>,
}

impl SeedArgs {
    fn apply(self, mut profile: SeedProfile) -> SeedProfile {
        if let Some(products) = self.products {
            profile.products = products;
        }
        if let Some(customers) = self.customers {
            profile.customers = customers;
        }
        if let Some(min_orders) = self.min_orders {
            profile.min_orders = min_orders;
        }
        if let Some(max_orders) = self.max_orders {
            profile.max_orders = max_orders;
        }
        if let Some(policy) = self.policy {
            profile.policy = policy;
        }
        if let Some(seed) = self.seed {
            profile.seed = seed;
        }
        if !self.locales.is_empty() {
            profile.locales = self.locales;
        }
        profile
    }
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Country code for the per-country customer listing.
    #[arg(long, default_value = "US")]
    country: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Listen address; defaults to `server.bind` from the settings.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

#[derive(Args, Debug)]
struct ScoresArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.apply_env();
    if let Some(url) = cli.database_url {
        settings.database_url = url;
    }
    init_logging(&settings.logging)?;

    log_command_started(cli.command.name(), &settings.database_url);

    let pool = connect(&settings.database_url, &settings.store.options()).await?;
    let outcome = match cli.command {
        Command::Seed(args) => run_seed(&pool, args.apply(settings.seed.clone())).await,
        Command::Report(args) => run_report(&pool, args).await,
        Command::Serve(args) => {
            let bind = args.bind.unwrap_or_else(|| settings.server.bind.clone());
            run_serve(&pool, &bind).await
        }
        Command::Scores(args) => run_scores(&pool, args).await,
    };
    pool.close().await;

    match &outcome {
        Ok(()) => tracing::info!(event = "command_finished", status = "success"),
        Err(err) => tracing::warn!(event = "command_finished", status = "error", error = %err),
    }
    outcome
}

fn log_command_started(command: &str, database_url: &str) {
    let connection = describe_connection(database_url);
    tracing::info!(
        event = "command_started",
        command,
        engine = %connection.engine_label(),
        database = %connection.redacted
    );
}

async fn run_seed(pool: &SqlitePool, profile: SeedProfile) -> Result<(), CliError> {
    let seeder = Seeder::new(profile)?;
    let mut faker = FakerSource::new(seeder.profile().seed, &seeder.profile().locales);
    let report = seeder.run(pool, &mut faker).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn run_report(pool: &SqlitePool, args: ReportArgs) -> Result<(), CliError> {
    let country = CountryCode::new(args.country)?;
    let queries = SqliteAdapter::new(pool.clone());
    let report = CommerceReport::collect(&queries, country).await?;
    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

async fn run_serve(pool: &SqlitePool, bind: &str) -> Result<(), CliError> {
    let scores = ScoreService::new(pool.clone());
    scores.ensure_schema().await?;
    let listener = TcpListener::bind(bind).await?;
    serve(listener, router(scores)).await?;
    Ok(())
}

async fn run_scores(pool: &SqlitePool, args: ScoresArgs) -> Result<(), CliError> {
    let scores = ScoreService::new(pool.clone());
    scores.ensure_schema().await?;
    let top = scores.top_scores().await?;
    match args.format {
        OutputFormat::Text => print!("{}", render_scores(&top)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&top)?),
    }
    Ok(())
}
