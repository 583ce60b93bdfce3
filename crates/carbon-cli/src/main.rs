//! `carbon`: record activity and report on a user's carbon footprint.
//!
//! # Usage
//!
//! ```text
//! carbon init
//! carbon add transport --user 1 --label Car --amount 42.0 --date 2023-03-01
//! carbon report --user 1 --from 2023-01-01 --to 2023-03-31
//! carbon query "SELECT * FROM User_Profile"
//! carbon serve --port 8080
//! ```

mod console;
mod render;
mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context as _, bail};
use carbon_core::{
  catalog::{self, Catalog},
  category::RecordKind,
  query::QueryRunner,
  report::report,
  request::{
    ActivityForm, DateRange, EnrollmentForm, ReportForm, UserForm, format_date,
  },
  store::EmissionStore,
};
use carbon_store_sqlite::SqliteStore;
use clap::{Parser, Subcommand, ValueEnum};
use settings::{Settings, expand_tilde};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "carbon", version, about = "Carbon emission ledger")]
struct Cli {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "carbon.toml")]
  config: PathBuf,

  /// Store file; overrides the config file and `CARBON_STORE_PATH`.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create the store and load the demo data, replacing any existing file.
  Init {
    /// Reset a store that is already initialised.
    #[arg(long)]
    force: bool,
  },
  /// List users as `id - name`.
  Users,
  /// Add a user.
  AddUser {
    #[arg(long)]
    name:     String,
    #[arg(long)]
    email:    String,
    #[arg(long)]
    location: String,
  },
  /// Log an activity or offset.
  Add {
    /// transport, energy, waste, industrial or offset.
    kind:   RecordKind,
    #[arg(long)]
    user:   i64,
    /// Vehicle type, energy source, waste type, activity type or offset type.
    #[arg(long)]
    label:  String,
    /// Distance, consumption, weight, emission or offset amount.
    #[arg(long)]
    amount: String,
    /// Defaults to today.
    #[arg(long)]
    date:   Option<String>,
  },
  /// Enroll a user in a sustainability program.
  Enroll {
    #[arg(long)]
    user:    i64,
    #[arg(long)]
    program: i64,
    /// Defaults to today.
    #[arg(long)]
    date:    Option<String>,
  },
  /// Show the type labels commonly used for a record kind.
  Suggest { kind: RecordKind },
  /// Build an emission report for one user.
  Report {
    #[arg(long)]
    user: i64,
    /// Defaults to January 1st of the current year.
    #[arg(long)]
    from: Option<String>,
    /// Defaults to today.
    #[arg(long)]
    to:   Option<String>,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
  },
  /// Run one SQL statement.
  Query {
    sql:  String,
    #[arg(long)]
    json: bool,
  },
  /// Interactive SQL console with history.
  Console,
  /// List or run canned queries.
  Catalog {
    #[command(subcommand)]
    action: CatalogAction,
  },
  /// Serve the JSON API.
  Serve {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
  },
}

#[derive(Subcommand, Debug)]
enum CatalogAction {
  List {
    #[arg(long, value_enum)]
    catalog: Option<CatalogArg>,
  },
  Run {
    name: String,
    #[arg(long)]
    json: bool,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CatalogArg {
  Basic,
  Analytical,
}

impl From<CatalogArg> for Catalog {
  fn from(arg: CatalogArg) -> Self {
    match arg {
      CatalogArg::Basic => Catalog::Basic,
      CatalogArg::Analytical => Catalog::Analytical,
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)?;
  if let Some(store) = &cli.store {
    settings.store_path = expand_tilde(store);
  }
  let store = SqliteStore::new(&settings.store_path);

  if !matches!(cli.command, Command::Init { .. }) && !store.is_initialized().await? {
    bail!(
      "no store at {}; run `carbon init` to create one",
      store.path().display()
    );
  }

  run(cli.command, store, settings).await
}

fn today() -> String { format_date(chrono::Local::now().date_naive()) }

async fn run(command: Command, store: SqliteStore, settings: Settings) -> anyhow::Result<()> {
  match command {
    Command::Init { force } => {
      if !force && store.is_initialized().await? {
        bail!(
          "store at {} is already initialised; pass --force to reset it",
          store.path().display()
        );
      }
      store.initialize().await.context("failed to initialise store")?;
      println!("Initialised {} with demo data.", store.path().display());
    }

    Command::Users => {
      println!("{}", render::users(&store.list_users().await?));
    }

    Command::AddUser { name, email, location } => {
      let input = UserForm { full_name: name, email, location }.validate()?;
      let user = store.add_user(input).await?;
      println!("Added user {}", user.choice_label());
    }

    Command::Add { kind, user, label, amount, date } => {
      let form = ActivityForm { kind, user_id: user, label, amount, date: date.unwrap_or_else(today) };
      let id = store.record_activity(form.validate()?).await?;
      println!("Recorded {kind} entry {id} for user {user}");
    }

    Command::Enroll { user, program, date } => {
      let form = EnrollmentForm { user_id: user, program_id: program, date: date.unwrap_or_else(today) };
      store.enroll(form.validate()?).await?;
      println!("Enrolled user {user} in program {program}");
    }

    Command::Suggest { kind } => {
      for label in kind.suggestions() {
        println!("{label}");
      }
    }

    Command::Report { user, from, to, json } => {
      let default = DateRange::year_to_date(chrono::Local::now().date_naive());
      let request = ReportForm {
        user_id: user,
        from:    from.unwrap_or_else(|| format_date(default.from)),
        to:      to.unwrap_or_else(|| format_date(default.to)),
      }
      .validate()?;
      let report = report(&store, request).await?;
      if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
      } else {
        println!("{}", render::report(&report));
      }
    }

    Command::Query { sql, json } => {
      let outcome = QueryRunner::new(&store).run(&sql).await?;
      if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
      } else {
        println!("{}", render::outcome(&outcome));
      }
    }

    Command::Console => console::run(&store).await?,

    Command::Catalog { action: CatalogAction::List { catalog: which } } => {
      let queries: Vec<_> = match which {
        Some(which) => catalog::catalog(which.into()).iter().collect(),
        None => catalog::all().collect(),
      };
      println!("{}", render::catalog(&queries));
    }

    Command::Catalog { action: CatalogAction::Run { name, json } } => {
      let (query, outcome) = QueryRunner::new(&store).run_canned(&name).await?;
      if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
      } else {
        println!("-- {}\n{}", query.name, render::outcome(&outcome));
      }
    }

    Command::Serve { host, port } => {
      let mut settings = settings;
      if let Some(host) = host {
        settings.host = host;
      }
      if let Some(port) = port {
        settings.port = port;
      }

      let app = axum::Router::new().nest("/api", carbon_api::api_router(Arc::new(store)));
      let address = settings.address();

      tracing::info!("Listening on http://{address}/api");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
      axum::serve(listener, app).await.context("server error")?;
    }
  }
  Ok(())
}
