use std::io::{stderr, stdout, BufWriter, Write};
use std::path::Path;
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use pick_ticket_engine::catalog::InMemoryCatalog;
use pick_ticket_engine::codec::PickTicketCodec;
use pick_ticket_engine::config::PipelineConfig;
use pick_ticket_engine::delivery::LocalDirectoryDelivery;
use pick_ticket_engine::engine::{OrderPipeline, PipelineError, PipelineReport};
use pick_ticket_engine::models::Order;
use pick_ticket_engine::storage::InMemoryOrderStore;

const USAGE_EXIT_CODE: i32 = 1;
const REJECTED_INPUT_EXIT_CODE: i32 = 2;
const COLLABORATOR_EXIT_CODE: i32 = 3;

enum Command {
    Import,
    Submit,
    Export,
    Inspect
}

impl Command {
    fn parse(command: &str) -> Option<Self> {
        match command.to_lowercase().as_str() {
            "import" => Some(Command::Import),
            "submit" => Some(Command::Submit),
            "export" => Some(Command::Export),
            "inspect" => Some(Command::Inspect),
            _ => None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Four commands and one positional input do not warrant pulling in clap yet.
    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1).and_then(|command| Command::parse(command)) else {
        print_usage();
        exit(USAGE_EXIT_CODE);
    };

    let Some(path) = args.get(2) else {
        print_usage();
        exit(USAGE_EXIT_CODE);
    };

    let log_level = args.get(3)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);

    setup_logging(log_level);

    let input = tokio::fs::read(path).await
        .with_context(|| format!("Unable to read input at path: {path}"))?;
    let config = PipelineConfig::from_env()?;

    let timer = Instant::now();

    match command {
        Command::Import => {
            let pipeline = create_pipeline(config)?;
            let report = exit_on_failure("Import", pipeline.import_csv(&input).await);
            write_report_to_stdout(&report)?;
        }
        Command::Submit => {
            let pipeline = create_pipeline(config)?;
            let report = exit_on_failure("Submit", pipeline.submit_json(&input).await);
            write_report_to_stdout(&report)?;
        }
        Command::Export => {
            let order = Order::from_json_slice(&input)?;
            write_to_stdout(&PickTicketCodec::encode(&order)?)?;
        }
        Command::Inspect => {
            let batch = PickTicketCodec::new(config.decode_mode).decode(&input)?;
            write_to_stdout(&batch.to_json()?)?;
        }
    }

    info!("Finished in: {:?}", timer.elapsed());

    Ok(())
}

/// Reports a failed pipeline run and exits, telling bad input apart from an unavailable collaborator.
fn exit_on_failure(command: &str, result: Result<PipelineReport, PipelineError>) -> PipelineReport {
    match result {
        Ok(report) => report,
        Err(error) if error.is_client_error() => {
            error!("{command} rejected: {error}");
            exit(REJECTED_INPUT_EXIT_CODE);
        }
        Err(error) => {
            error!("{command} failed: {error}");
            exit(COLLABORATOR_EXIT_CODE);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: pick-ticket-engine [import|submit|export|inspect] [input] [log_level:optional]");
    eprintln!("  import  <tickets>.csv   upload a pick ticket file and deliver it to the partner");
    eprintln!("  submit  <order>.json    upload a single order and deliver it to the partner");
    eprintln!("  export  <order>.json    print the pick ticket for an order");
    eprintln!("  inspect <tickets>.csv   print the orders held in a pick ticket file as JSON");
    eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
    eprintln!("Exit codes: 1 usage, 2 rejected input, 3 store or delivery failure");
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the command output, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn create_pipeline(
    config: PipelineConfig
) -> Result<OrderPipeline<InMemoryOrderStore, InMemoryCatalog, LocalDirectoryDelivery>> {
    let catalog = match &config.catalog_path {
        Some(path) => load_catalog(path)?,
        None => InMemoryCatalog::new()
    };

    let delivery = LocalDirectoryDelivery::new(&config.outbox);

    Ok(OrderPipeline::new(Arc::new(InMemoryOrderStore::new()), Arc::new(catalog), Arc::new(delivery), config))
}

fn load_catalog(path: &Path) -> Result<InMemoryCatalog> {
    InMemoryCatalog::from_csv_path(path)
        .with_context(|| format!("Unable to load catalog at path: {}", path.display()))
}

fn write_report_to_stdout(report: &PipelineReport) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "orders,line_items,resolved_names,rejected,remote_path")?;
    writeln!(
        output,
        "{},{},{},{},{}",
        report.orders,
        report.line_items,
        report.resolved_names,
        report.rejected.join(";"),
        report.remote_path.as_deref().unwrap_or_default()
    )?;

    output.flush()?;

    Ok(())
}

fn write_to_stdout(contents: &str) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    output.write_all(contents.as_bytes())?;

    if !contents.ends_with('\n') {
        writeln!(output)?;
    }

    output.flush()?;

    Ok(())
}
