mod report;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use prune_core::config::{DEFAULT_BASE_URL, DEFAULT_SERVICE_URL};
use prune_core::{ClientConfig, PruneClient, PruneResult, DEFAULT_THRESHOLD};

#[derive(Parser, Debug)]
#[command(name = "prune-code", version)]
#[command(about = "Prune a source file down to the code relevant to a focus query")]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Source file to prune
    code_file: PathBuf,

    /// Focus query, e.g. "authentication logic"
    query: String,

    /// Relevance threshold between 0.0 and 1.0
    #[arg(default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    #[arg(long, default_value = DEFAULT_SERVICE_URL, help = "Prune endpoint of the service")]
    service_url: String,

    #[arg(long, default_value = DEFAULT_BASE_URL, help = "Service root used for the health check")]
    base_url: String,

    #[arg(long, default_value_t = 30, help = "Request timeout in seconds")]
    timeout: u64,

    #[arg(long, help = "Do not probe the service before pruning")]
    skip_health_check: bool,

    #[arg(long, help = "Print the result as JSON")]
    json: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let result = run(&cli)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", report::render_summary(&result));
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<PruneResult> {
    let code = read_code(&cli.code_file)?;

    let config = ClientConfig::default()
        .with_service_url(&cli.service_url)
        .with_base_url(&cli.base_url)
        .with_timeout(Duration::from_secs(cli.timeout));
    let client = PruneClient::new(config);

    // Advisory only: the service can still go away before the prune call,
    // which then reports its own connection error.
    if !cli.skip_health_check && !client.check_health() {
        bail!(
            "pruning service is not running at {}; start it and try again",
            client.config().base_url
        );
    }

    log::info!("pruning {} with query {:?}", cli.code_file.display(), cli.query);
    let result = client.prune(&code, &cli.query, cli.threshold)?;
    Ok(result)
}

fn read_code(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("file not found: {}", path.display());
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
