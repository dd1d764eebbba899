use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use env_logger::{Env, Target};

use fieldbuilder::{
    BuilderOptions, DEFAULT_ENDPOINT, DRAFT_KEY, FieldBuilder, FieldDraft, FileSlot, MemorySlot,
    Slot, default_data_dir,
};

const LOG_FILE_NAME: &str = "fieldbuilder.log";

#[derive(Debug, Parser)]
#[command(
    name = "fieldbuilder",
    version,
    about = "Edit a multi-select field definition in the terminal"
)]
struct Cli {
    /// Endpoint receiving the submitted field definition
    #[arg(long, env = "FIELDBUILDER_ENDPOINT", value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Directory holding the persisted draft (defaults to the platform data dir)
    #[arg(long = "draft-dir", value_name = "DIR", conflicts_with = "ephemeral")]
    draft_dir: Option<PathBuf>,

    /// Keep the draft in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Skip duplicate and length highlighting in the choices editor
    #[arg(long = "no-highlight")]
    no_highlight: bool,

    /// Where log records are written (the terminal belongs to the UI)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Redraw interval in milliseconds
    #[arg(long = "tick-rate-ms", value_name = "MS", default_value_t = 100)]
    tick_rate_ms: u64,

    /// Quit immediately even while a save is in flight
    #[arg(long = "no-confirm-exit")]
    no_confirm_exit: bool,

    /// Print the JSON Schema of the field definition and exit
    #[arg(long = "print-schema")]
    print_schema: bool,

    /// Remove the persisted draft and exit
    #[arg(long = "clear-draft", conflicts_with = "ephemeral")]
    clear_draft: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if cli.print_schema {
        let schema = schemars::schema_for!(FieldDraft);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let draft_dir = match cli.draft_dir.clone() {
        Some(dir) => dir,
        None => default_data_dir().map_err(Report::msg)?,
    };

    if cli.clear_draft {
        FileSlot::new(&draft_dir)
            .remove(DRAFT_KEY)
            .map_err(Report::msg)
            .wrap_err("failed to clear the stored draft")?;
        eprintln!("cleared draft in {}", draft_dir.display());
        return Ok(());
    }

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| draft_dir.join(LOG_FILE_NAME));
    init_logging(&log_path)?;

    let options = BuilderOptions::default()
        .with_endpoint(cli.endpoint.clone())
        .with_tick_rate(Duration::from_millis(cli.tick_rate_ms.max(1)))
        .with_highlighting(!cli.no_highlight)
        .with_confirm_exit(!cli.no_confirm_exit);

    let mut builder = FieldBuilder::new().with_options(options);
    builder = if cli.ephemeral {
        builder.with_slot(MemorySlot::new())
    } else {
        builder.with_slot(FileSlot::new(&draft_dir))
    };

    log::info!("starting field builder (endpoint {})", cli.endpoint);
    let delivered = builder.run().map_err(Report::msg)?;

    if let Some(value) = delivered {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .wrap_err("failed to initialise logging")?;
    Ok(())
}
