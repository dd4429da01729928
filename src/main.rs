use std::io::{self, BufRead, Write};

use clap::Parser;
use lookup_form::api::{HttpLookupService, LookupError, LookupService};
use lookup_form::config::{ConfigError, LookupConfig, Timeouts};
use lookup_form::form::{LookupForm, SubmitError};
use lookup_form::render::CANCEL_LABEL;
use lookup_form::validate::{Field, FormSchema, Revision};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("lookup client setup failed: {0}")]
    Client(#[from] LookupError),
    #[error("{0}")]
    Submit(#[from] SubmitError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "lookup-form", about = "Employee lookup form")]
struct Cli {
    /// Lookup service base URL; overrides `LOOKUP_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Form revision; overrides `LOOKUP_REVISION`.
    #[arg(long, value_enum)]
    revision: Option<Revision>,

    #[arg(long)]
    request_timeout_secs: Option<u64>,

    #[arg(long)]
    connect_timeout_secs: Option<u64>,

    #[arg(long, help = "Look up this name once and exit")]
    name: Option<String>,

    #[arg(long, help = "Employee ID, used by the preview revision")]
    employee_id: Option<String>,

    #[arg(short, long, default_value_t = false, help = "Log lookup activity to stderr")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    let config = resolve_config(&cli)?;
    tracing::info!(endpoint = %config.endpoint(), revision = %config.revision, "lookup form ready");

    let service = HttpLookupService::from_config(&config)?;
    let mut form = LookupForm::new(FormSchema::for_revision(config.revision), service);

    match cli.name {
        Some(name) => run_once(&mut form, name, cli.employee_id).await,
        None => run_interactive(&mut form).await,
    }
}

fn resolve_config(cli: &Cli) -> Result<LookupConfig, CliError> {
    let env = LookupConfig::from_env()?;
    let base_url = cli.base_url.as_deref().unwrap_or(&env.base_url);
    let revision = cli.revision.unwrap_or(env.revision);
    let timeouts = Timeouts {
        request_secs: cli.request_timeout_secs.unwrap_or(env.timeouts.request_secs),
        connect_secs: cli.connect_timeout_secs.unwrap_or(env.timeouts.connect_secs),
    };
    Ok(LookupConfig::new(base_url, revision, timeouts)?)
}

async fn run_once<S: LookupService>(
    form: &mut LookupForm<S>,
    name: String,
    employee_id: Option<String>,
) -> Result<(), CliError> {
    form.set_field(Field::Username, name);
    if let Some(employee_id) = employee_id {
        form.set_field(Field::EmployeeId, employee_id);
    }

    let view = form.submit().await?;
    println!("{view}");
    form.reset();
    Ok(())
}

async fn run_interactive<S: LookupService>(form: &mut LookupForm<S>) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock();

    loop {
        let fields = form.schema().fields.clone();
        for (index, spec) in fields.iter().enumerate() {
            let Some(value) = prompt(&mut lines, &format!("{} ({})", spec.label, spec.placeholder))? else {
                return Ok(());
            };
            if index == 0 && value.is_empty() {
                return Ok(());
            }
            form.set_field(spec.field, value);
        }

        match form.submit().await {
            Ok(view) => println!("{view}"),
            Err(SubmitError::Invalid(errors)) => {
                for error in errors.errors() {
                    eprintln!("  {}", error.message);
                }
                continue;
            }
            Err(SubmitError::Request(e)) => {
                eprintln!("Tra cứu thất bại: {e}");
                form.reset();
                continue;
            }
        }

        if prompt(&mut lines, &format!("[{CANCEL_LABEL}] Enter"))?.is_none() {
            return Ok(());
        }
        form.reset();
    }
}

/// Print `label` and read one line; `None` on end of input.
fn prompt(lines: &mut impl BufRead, label: &str) -> Result<Option<String>, CliError> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if lines.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}
