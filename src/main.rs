use anyhow::Result;
use clap::Parser;
use nginx_logs::analyzer::{LogAnalyzer, ProcessOptions};
use nginx_logs::config::get_config;
use nginx_logs::display::DisplayManager;
use nginx_logs::file_discovery::FileDiscovery;
use nginx_logs::logging::init_logging;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "nginx-logs")]
#[command(about = "Count views of a URL across nginx access logs")]
#[command(version)]
struct Cli {
    /// URL to count, matched exactly (e.g. /blog/)
    url: String,

    /// Directory to scan for access logs
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Count the views by date
    #[arg(long)]
    date: bool,

    /// Timezone days are counted in (e.g. America/Los_Angeles)
    #[arg(long)]
    tz: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli).await {
        handle_error(e, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.url.is_empty() {
        anyhow::bail!("Please specify a URL to find");
    }

    let config = get_config()?;
    let _guard = init_logging(&config.logging, &config.paths.log_directory)?;

    let options = ProcessOptions {
        url: cli.url,
        directory: cli.input.unwrap_or_else(|| config.input.directory.clone()),
        by_date: cli.date,
        timezone: cli.tz.unwrap_or_else(|| config.report.timezone.clone()),
        json_output: cli.json,
    };

    let analyzer = LogAnalyzer::new(
        FileDiscovery::new(config.input.file_prefix.clone()),
        DisplayManager::new(config.report.json_pretty),
    );
    analyzer.run(&options).await
}

fn handle_error(e: anyhow::Error, json: bool) -> ! {
    if json {
        println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
    } else {
        eprintln!("Error: {:#}", e);
    }
    process::exit(1);
}
