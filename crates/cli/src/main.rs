use clap::{Parser, Subcommand, ValueEnum};
use intake_core::config::{submission_key_style_from_env_value, PATHOLOGICAL_KEY_ENV};
use intake_core::loader::stored_sections;
use intake_core::{
    defaults, load_medical_file, read_record_file, render, IntakeConfig, IntakeModel,
    IntakeSession, PatientContext, RenderFormat, SectionKind,
};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Clinical intake consolidation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical defaults of one or all sections
    Defaults {
        /// Section key (e.g. family_background)
        #[arg(long)]
        section: Option<String>,
    },
    /// Normalize a stored medical file and print the editable model
    Normalize {
        /// Medical file JSON, as returned by the persistence API
        file: PathBuf,
    },
    /// Consolidate a stored medical file into the outbound payload
    Consolidate {
        /// Medical file JSON, as returned by the persistence API
        file: PathBuf,
        /// Wrap the payload in a submission envelope for this medical file
        #[arg(long)]
        medical_file_id: Option<u64>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

impl From<Format> for RenderFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => RenderFormat::Json,
            Format::Yaml => RenderFormat::Yaml,
        }
    }
}

/// Entry point for the intake CLI.
///
/// # Environment Variables
/// - `INTAKE_PATHOLOGICAL_KEY`: `canonical` (default) or `legacy` spelling of the pathological
///   section key in submission envelopes
/// - `RUST_LOG`: log filter (logs go to stderr)
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("intake=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = IntakeConfig::new(submission_key_style_from_env_value(
        std::env::var(PATHOLOGICAL_KEY_ENV).ok(),
    )?);

    let cli = Cli::parse();

    match cli.command {
        Commands::Defaults { section } => {
            let value = match section {
                Some(key) => {
                    let kind = SectionKind::from_key(&key)
                        .ok_or_else(|| anyhow::anyhow!("unknown section '{key}'"))?;
                    Value::Object(defaults(kind).clone())
                }
                None => Value::Object(
                    SectionKind::ALL
                        .into_iter()
                        .map(|kind| (kind.key().to_string(), Value::Object(defaults(kind).clone())))
                        .collect::<Map<String, Value>>(),
                ),
            };
            println!("{}", render(&value, RenderFormat::Json)?);
        }
        Commands::Normalize { file } => {
            let response = read_record_file(&file)?;
            tracing::info!(sections = ?stored_sections(&response), "stored sections");

            let model = IntakeModel::from_medical_file(&response);
            let context = PatientContext::from_response(&response);
            if let Some(age) = context.age_on(chrono::Local::now().date_naive()) {
                tracing::info!(age, "patient age");
            }
            println!("{}", render(&model, RenderFormat::Json)?);
        }
        Commands::Consolidate {
            file,
            medical_file_id,
            format,
        } => {
            let (model, _) = load_medical_file(&file)?;
            let session = IntakeSession::new(model);

            let output = match medical_file_id {
                Some(id) => render(&session.submission(id, &config), format.into())?,
                None => render(&session.consolidate(), format.into())?,
            };
            println!("{output}");
        }
    }

    Ok(())
}
