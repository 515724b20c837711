//! `persons`: command-line client for the person API.
//!
//! # Usage
//!
//! ```text
//! persons --url http://localhost:8080 list
//! persons create --first-name Essadeq --last-name "EL AAMIRI" --birth-date 1999-01-07
//! persons update 3 --first-name Salima
//! persons --config ~/.config/persons/config.toml delete 3
//! ```

mod client;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use client::ApiClient;
use persons_core::{PersonId, PersonInput};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "persons", about = "Client for the person records API")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the server (default: http://localhost:8080).
  #[arg(long, env = "PERSONS_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
  /// List every stored person.
  List,
  /// Show one person.
  Get { id: i64 },
  /// List persons whose first name contains FRAGMENT.
  Search { fragment: String },
  /// Create a person.
  Create {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name:  String,
    /// YYYY-MM-DD
    #[arg(long)]
    birth_date: NaiveDate,
  },
  /// Update a person; omitted fields keep their current value.
  Update {
    id:            i64,
    #[arg(long)]
    first_name:    Option<String>,
    #[arg(long)]
    last_name:     Option<String>,
    #[arg(long)]
    birth_date:    Option<NaiveDate>,
    /// Correct the stored creation timestamp (RFC 3339).
    #[arg(long)]
    creation_date: Option<DateTime<Utc>>,
  },
  /// Delete a person.
  Delete { id: i64 },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

/// CLI flag, then config file, then [`DEFAULT_URL`].
fn resolve_url(flag: Option<String>, file: &ConfigFile) -> String {
  flag
    .or_else(|| (!file.url.is_empty()).then(|| file.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let client = ApiClient::new(resolve_url(args.url, &file_cfg))?;
  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::List => print_json(&client.list().await?),
    Command::Get { id } => print_json(&client.get(PersonId(id)).await?),
    Command::Search { fragment } => print_json(&client.search(&fragment).await?),
    Command::Create { first_name, last_name, birth_date } => {
      let input = PersonInput::new(first_name, last_name, birth_date);
      print_json(&client.create(&input).await?)
    }
    Command::Update {
      id,
      first_name,
      last_name,
      birth_date,
      creation_date,
    } => {
      let Some(current) = client.get(PersonId(id)).await? else {
        bail!("no person with id {id}");
      };
      let mut input = PersonInput::from(current);
      if let Some(v) = first_name {
        input.first_name = v;
      }
      if let Some(v) = last_name {
        input.last_name = v;
      }
      if let Some(v) = birth_date {
        input.birth_date = v;
      }
      input.creation_date = creation_date;
      input.last_modification_date = None;

      match client.update(&input).await? {
        Some(updated) => print_json(&updated),
        None => bail!("server refused the update of person {id}"),
      }
    }
    Command::Delete { id } => {
      if !client.delete(PersonId(id)).await? {
        bail!("person {id} was not deleted");
      }
      print_json(&true)
    }
  }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
