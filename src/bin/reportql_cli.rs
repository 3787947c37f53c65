use clap::Parser;
use reportql::core::Dataset;
use reportql::settings::CliOverrides;
use reportql::storage::NewReport;
use reportql::{
    EngineOptions, ReportError, ReportExecutor, ReportRequest, ReportStore, Settings, Voter,
    logging, parse_columns, parse_filters, parse_sort, render,
};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use uuid::Uuid;

/// reportql interactive shell
#[derive(Parser, Debug)]
#[command(name = "reportql_cli")]
#[command(about = "Interactive report shell over a local voter dataset", long_about = None)]
struct Args {
    #[command(flatten)]
    overrides: CliOverrides,
}

/// Report being edited in the shell
struct Session {
    dataset: Dataset<Voter>,
    store: ReportStore,
    options: EngineOptions,
    request: ReportRequest,
}

enum Flow {
    Continue,
    Quit,
}

impl Session {
    fn execute(&mut self, line: &str) -> Result<Flow, ReportError> {
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, r)| (c, r.trim()));

        match command.to_ascii_lowercase().as_str() {
            "quit" | "exit" | "\\q" => return Ok(Flow::Quit),
            "help" | "\\?" | "\\h" => print_help(),
            "where" | "filter" => {
                self.request.filters = parse_filters(rest)?;
                println!("{} filter(s) set", self.request.filters.len());
            }
            "sort" => {
                self.request.sorting = parse_sort(rest)?;
                println!("{} sort key(s) set", self.request.sorting.len());
            }
            "columns" | "select" => {
                self.request.columns = parse_columns(rest)?;
                if self.request.columns.is_empty() {
                    println!("all columns");
                } else {
                    println!("columns: {}", self.request.columns.join(", "));
                }
            }
            "page" => self.request.page = Some(parse_number(rest)?),
            "per-page" | "perpage" => self.request.per_page = Some(parse_number(rest)?),
            "next" => self.request.page = Some(self.request.page.unwrap_or(1) + 1),
            "prev" => self.request.page = Some(self.request.page.unwrap_or(1).saturating_sub(1).max(1)),
            "run" | "show" => {
                let response = ReportExecutor::run(&self.dataset.records, &self.request, &self.options)?;
                print!("{}", render::table(&response));
            }
            "json" => println!("{}", serde_json::to_string_pretty(&self.request)?),
            "reset" => {
                self.request = ReportRequest::default();
                println!("report cleared");
            }
            "save" => {
                let report = self.store.create(NewReport {
                    filters: self.request.filters.clone(),
                    sorting: self.request.sorting.clone(),
                    columns: self.request.columns.clone(),
                    ..NewReport::named(rest)
                })?;
                println!("saved as {} ({})", report.name, report.id);
            }
            "load" => {
                let report = self.store.get(parse_id(rest)?)?;
                self.request = report.request(None, self.request.per_page);
                println!("loaded {}", report.name);
            }
            "reports" | "list" => {
                let reports = self.store.list(false);
                if reports.is_empty() {
                    println!("no saved reports");
                }
                for report in reports {
                    println!(
                        "{}  {:<30} used {} time(s){}",
                        report.id,
                        report.name,
                        report.usage_count,
                        if report.is_public { "  [public]" } else { "" }
                    );
                }
            }
            "exec" => {
                let id = parse_id(rest)?;
                let response = self.store.run_saved(
                    id,
                    &self.dataset.records,
                    self.request.page,
                    self.request.per_page,
                    &self.options,
                )?;
                print!("{}", render::table(&response));
            }
            "delete" => {
                let removed = self.store.delete(parse_id(rest)?)?;
                println!("deleted {}", removed.name);
            }
            "validate" => {
                let invalid = self.dataset.validate();
                println!("{} of {} voters invalid", invalid.len(), self.dataset.len());
                for (idx, violations) in invalid.iter().take(20) {
                    for violation in violations {
                        println!("  #{idx}: {violation}");
                    }
                }
            }
            other => println!("Unknown command: {other}. Type 'help' for help."),
        }
        Ok(Flow::Continue)
    }
}

fn parse_number(input: &str) -> Result<usize, ReportError> {
    input
        .parse()
        .map_err(|_| ReportError::InvalidArgument(format!("expected a positive number, got '{input}'")))
}

fn parse_id(input: &str) -> Result<Uuid, ReportError> {
    Uuid::parse_str(input).map_err(|_| ReportError::InvalidArgument(format!("invalid report id '{input}'")))
}

fn print_help() {
    println!("Report definition:");
    println!("  where <expr>        - e.g. where age >= 18 and city = 'Recife' or isDonor = true");
    println!("  sort <keys>         - e.g. sort age desc, name");
    println!("  columns <list>      - e.g. columns name, phone (or * for all)");
    println!("  page <n>, per-page <n>, next, prev");
    println!("  run                 - Run the report");
    println!("  json                - Show the report as JSON");
    println!("  reset               - Clear the report");
    println!("Saved reports:");
    println!("  save <name>, load <id>, exec <id>, delete <id>, reports");
    println!("Other:");
    println!("  validate            - Check the dataset against the voter schema");
    println!("  help, quit");
    println!("\nOperators: = != > < >= <= contains, not contains, starts with, ends with,");
    println!("           between .. and .., in (..), not in (..), is empty, is not empty");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let settings = Settings::load(&args.overrides)?;
    logging::init(&settings.log_level);

    let dataset = match &settings.dataset {
        Some(path) => Dataset::<Voter>::load_json(path)?,
        None => {
            eprintln!("No dataset configured (use --dataset or REPORTQL_DATASET); starting empty");
            Dataset::new("empty", Vec::new())
        }
    };

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║                 reportql shell                           ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!("Dataset: {} ({} voters)", dataset.name, dataset.len());

    let mut session = Session {
        dataset,
        store: ReportStore::open(&settings.data_dir)?,
        options: settings.engine_options(),
        request: ReportRequest::default(),
    };

    // Initialize rustyline editor for history and line editing
    let mut rl = DefaultEditor::new()?;
    let history_file = dirs::home_dir().map(|mut p| {
        p.push(".reportql_history");
        p
    });
    if let Some(ref path) = history_file {
        let _ = rl.load_history(path); // Ignore error if file doesn't exist
    }

    println!("Type 'help' for command help, 'quit' or 'exit' to quit.\n");

    loop {
        match rl.readline("reportql> ") {
            Ok(input) => {
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                match session.execute(input) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(e) => println!("Error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("quit");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err:?}");
                return Err(err.into());
            }
        }
    }

    // Save history before exiting
    if let Some(ref path) = history_file {
        let _ = rl.save_history(path);
    }
    println!("\n╔══════════════════════════════════════════════════════════╗");
    println!("║                    Session closed                        ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    Ok(())
}
