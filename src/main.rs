use clap::Parser;
use reportql::core::Dataset;
use reportql::network::ServerState;
use reportql::settings::CliOverrides;
use reportql::{ReportStore, Server, Settings, Voter, logging};
use tracing::warn;

/// reportql report server
#[derive(Parser, Debug)]
#[command(name = "reportql")]
#[command(about = "Serves voter reports over line-delimited JSON", long_about = None)]
struct Args {
    #[command(flatten)]
    overrides: CliOverrides,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let settings = Settings::load(&args.overrides)?;
    logging::init(&settings.log_level);

    let dataset = match &settings.dataset {
        Some(path) => Dataset::<Voter>::load_json(path)?,
        None => {
            warn!("no dataset configured; serving an empty voter list");
            Dataset::new("empty", Vec::new())
        }
    };
    let invalid = dataset.validate();

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║             reportql Server Starting...                  ║");
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║ Configuration:                                           ║");
    println!("║  • Dataset:      {:<39} ║", dataset.name);
    println!("║  • Voters:       {:<39} ║", format!("{} ({} invalid)", dataset.len(), invalid.len()));
    println!("║  • Host:Port:    {:<39} ║", settings.address());
    println!("║  • Data Dir:     {:<39} ║", settings.data_dir.display());
    println!("║  • Chaining:     {:<39} ║", format!("{:?}", settings.chaining).to_lowercase());
    println!("╚══════════════════════════════════════════════════════════╝");

    let store = ReportStore::open(&settings.data_dir)?;
    let server = Server::new(ServerState::new(dataset, store, settings.engine_options()));
    server.start(&settings.address()).await?;

    Ok(())
}
