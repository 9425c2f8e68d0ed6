use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::{Config, Environment, File};
use log::{LevelFilter, debug, info};
use tokio::net::TcpListener;

use rosterd::account::{AccountRepository, AccountService};
use rosterd::api::{self, AppState};
use rosterd::auth::AuthState;
use rosterd::config::AppConfig;
use rosterd::db::Database;
use rosterd::employee::{EmployeeRepository, EmployeeService};
use rosterd::uploads::ImageStore;

const APP_NAME: &str = "rosterd";

fn main() {
    if let Err(err) = try_main() {
        let _ = writeln!(io::stderr(), "{err:?}");
        std::process::exit(1);
    }
}

#[tokio::main]
async fn async_main(ctx: RuntimeContext, cmd: ServeCommand) -> Result<()> {
    handle_serve(&ctx, cmd).await
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    let ctx = RuntimeContext::new(cli.common.clone())?;
    ctx.init_logging();
    debug!("data dir: {}", ctx.data_dir.display());

    match cli.command {
        Command::Serve(cmd) => async_main(ctx, cmd),
    }
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Rosterd - employee directory API server.",
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    common: CommonOpts,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Args)]
struct CommonOpts {
    /// Override the config file path
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Reduce output to only errors
    #[arg(short, long, action = clap::ArgAction::SetTrue, global = true)]
    quiet: bool,
    /// Increase logging verbosity (stackable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Enable debug logging (equivalent to -v)
    #[arg(long, global = true)]
    debug: bool,
    /// Output machine readable JSON logs
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve(ServeCommand),
}

#[derive(Debug, Clone, Args)]
struct ServeCommand {
    /// Override the bind host
    #[arg(long)]
    host: Option<String>,
    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

/// Resolved runtime configuration and paths.
struct RuntimeContext {
    common: CommonOpts,
    config: AppConfig,
    data_dir: PathBuf,
}

impl RuntimeContext {
    fn new(common: CommonOpts) -> Result<Self> {
        let config_file = common.config.clone().or_else(default_config_file);

        let mut builder = Config::builder();
        if let Some(path) = &config_file {
            builder = builder.add_source(File::from(path.clone()).required(false));
        }

        let built = builder
            .add_source(
                Environment::with_prefix("ROSTERD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("loading configuration")?;

        let config: AppConfig = built.try_deserialize().context("parsing configuration")?;

        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME);

        Ok(Self {
            common,
            config,
            data_dir,
        })
    }

    fn effective_log_level(&self) -> LevelFilter {
        if self.common.quiet {
            LevelFilter::Error
        } else if self.common.verbose >= 2 {
            LevelFilter::Trace
        } else if self.common.debug || self.common.verbose == 1 {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    fn init_logging(&self) {
        use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

        let level = match self.effective_log_level() {
            LevelFilter::Off => "off",
            LevelFilter::Error => "error",
            LevelFilter::Warn => "warn",
            LevelFilter::Info => "info",
            LevelFilter::Debug => "debug",
            LevelFilter::Trace => "trace",
        };

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("rosterd={level},tower_http={level}")));

        // JSON output for log shippers, pretty format otherwise
        if self.common.json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(io::stderr().is_terminal())
                        .with_writer(io::stderr),
                )
                .try_init()
                .ok();
        }

        // Also init env_logger for compatibility with log crate users
        let mut builder =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
        builder.filter_level(self.effective_log_level());
        let _ = builder.try_init();
    }
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}

async fn handle_serve(ctx: &RuntimeContext, cmd: ServeCommand) -> Result<()> {
    info!("Starting employee directory server...");

    // Initialize database
    let db_path = ctx
        .config
        .database
        .path
        .clone()
        .unwrap_or_else(|| ctx.data_dir.join("roster.db"));
    info!("Database path: {}", db_path.display());
    let database = Database::new(&db_path).await?;

    // Initialize authentication from config; a missing or weak signing
    // secret halts startup here.
    let auth_config = ctx.config.auth.clone();
    auth_config
        .validate()
        .context("Invalid auth configuration")?;
    let auth_state = AuthState::new(auth_config).context("Initializing session signing keys")?;
    info!(
        "Auth mode: {}",
        if auth_state.production_mode() {
            "production"
        } else {
            "development"
        }
    );

    // Upload storage
    let uploads_dir = ctx
        .config
        .uploads
        .dir
        .clone()
        .unwrap_or_else(|| ctx.data_dir.join("uploads"));
    std::fs::create_dir_all(&uploads_dir)
        .with_context(|| format!("creating uploads directory: {}", uploads_dir.display()))?;
    info!("Uploads directory: {}", uploads_dir.display());

    let accounts = AccountService::new(AccountRepository::new(database.pool().clone()));
    let employees = EmployeeService::new(EmployeeRepository::new(database.pool().clone()));
    let images = ImageStore::new(uploads_dir);

    let state = AppState {
        auth: auth_state,
        accounts,
        employees,
        images,
    };

    let app = api::create_router_with_config(state, ctx.config.uploads.max_upload_size_mb);

    let host = cmd.host.unwrap_or_else(|| ctx.config.server.host.clone());
    let port = cmd.port.unwrap_or(ctx.config.server.port);
    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("binding {host}:{port}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("serving HTTP")?;

    Ok(())
}
