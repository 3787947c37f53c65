use clap::{Parser, ValueEnum};
use reportql::core::Dataset;
use reportql::settings::CliOverrides;
use reportql::{
    ReportError, ReportExecutor, ReportRequest, ReportStore, Settings, Voter, logging,
    parse_columns, parse_filters, parse_sort, render,
};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Parser)]
#[command(name = "reportql_run")]
#[command(about = "Run one report over a voter dataset and print the page", long_about = None)]
struct Args {
    #[command(flatten)]
    overrides: CliOverrides,

    /// Report request file (JSON: filters, sorting, columns, page, perPage)
    #[arg(short = 'r', long)]
    request: Option<PathBuf>,

    /// Run a saved report by id (its own filters, sorting and columns apply)
    #[arg(long, conflicts_with_all = ["request", "filter", "sort", "columns"])]
    saved: Option<Uuid>,

    /// Filter expression, e.g. "age >= 18 and city = 'Recife'"
    #[arg(short = 'w', long = "where")]
    filter: Option<String>,

    /// Sort keys, e.g. "age desc, name"
    #[arg(short = 's', long)]
    sort: Option<String>,

    /// Columns to keep, e.g. "name, phone"
    #[arg(short = 'c', long)]
    columns: Option<String>,

    #[arg(long)]
    page: Option<usize>,

    #[arg(long)]
    per_page: Option<usize>,

    /// Output format: json or table
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

/// Request file first, then inline flags on top of it
fn build_request(args: &Args) -> Result<ReportRequest, ReportError> {
    let mut request = match &args.request {
        Some(path) => ReportRequest::from_json(&fs::read_to_string(path)?)?,
        None => ReportRequest::default(),
    };
    if let Some(filter) = &args.filter {
        request.filters = parse_filters(filter)?;
    }
    if let Some(sort) = &args.sort {
        request.sorting = parse_sort(sort)?;
    }
    if let Some(columns) = &args.columns {
        request.columns = parse_columns(columns)?;
    }
    request.page = args.page.or(request.page);
    request.per_page = args.per_page.or(request.per_page);
    Ok(request)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let settings = Settings::load(&args.overrides)?;
    logging::init(&settings.log_level);

    let Some(dataset_path) = &settings.dataset else {
        eprintln!("Error: no dataset given (use --dataset or REPORTQL_DATASET)");
        std::process::exit(1);
    };
    let dataset = Dataset::<Voter>::load_json(dataset_path)?;
    let options = settings.engine_options();

    let response = match args.saved {
        Some(id) => {
            let mut store = ReportStore::open(&settings.data_dir)?;
            store.run_saved(id, &dataset.records, args.page, args.per_page, &options)?
        }
        None => ReportExecutor::run(&dataset.records, &build_request(&args)?, &options)?,
    };

    // Determine output writer (stdout or file)
    let mut output: Box<dyn Write> = if let Some(path) = &args.output {
        Box::new(File::create(path)?)
    } else {
        Box::new(io::stdout())
    };

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut output, &response)?;
            writeln!(output)?;
        }
        OutputFormat::Table => write!(output, "{}", render::table(&response))?,
    }
    output.flush()?;

    Ok(())
}
