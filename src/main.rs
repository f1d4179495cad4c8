use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use pharmapapers::{EntrezClient, EntrezConfig};
use pharmapapers::config::{API_KEY_ENV, DEFAULT_MAX_RESULTS};
use pharmapapers::csv::save_rows;
use pharmapapers::pipeline::find_papers;

/// Fetch research papers from PubMed with pharmaceutical/biotech company affiliations
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// PubMed search query
    query: String,

    /// Filename to save results (if not provided, print to console)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Maximum number of results to return
    #[arg(short, long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,

    /// PubMed API key
    #[arg(short = 'k', long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Contact email sent to NCBI with each request
    #[arg(long)]
    email: Option<String>,

    /// Tool name sent to NCBI with each request
    #[arg(long, default_value = "pharmapapers")]
    tool: String,
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = EntrezConfig::new()
        .with_tool(&cli.tool)
        .with_api_key(cli.api_key.clone());
    if let Some(email) = &cli.email {
        config = config.with_email(email);
    }
    let client = EntrezClient::new(config).context("Failed to build PubMed client")?;

    let report = find_papers(&client, &cli.query, cli.max_results)
        .with_context(|| format!("Failed to fetch papers for query '{}'", cli.query))?;
    save_rows(&report.rows, cli.file.as_deref()).context("Failed to write results")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        debug!("Debug logging enabled");
        match run(&cli) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Error: {e:#}");
                if cli.debug {
                    eprintln!("{e:?}");
                }
                ExitCode::FAILURE
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "get-papers-list",
            "cancer immunotherapy",
            "-f",
            "out.csv",
            "-d",
            "-m",
            "25",
            "-k",
            "secret",
        ])
        .unwrap();
        assert_eq!(cli.query, "cancer immunotherapy");
        assert_eq!(cli.file, Some(PathBuf::from("out.csv")));
        assert!(cli.debug);
        assert_eq!(cli.max_results, 25);
        assert_eq!(cli.api_key.as_deref(), Some("secret"));
        assert_eq!(cli.tool, "pharmapapers");
    }

    #[test]
    fn test_cli_requires_query() {
        assert!(Cli::try_parse_from(["get-papers-list"]).is_err());
    }
}
