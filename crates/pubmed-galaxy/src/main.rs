//! PubMed Galaxy - Entry Point
//!
//! Runs the HTTP API or performs one-off lookups from the command line.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pubmed_galaxy::formatters::render_network;
use pubmed_galaxy::models::{ResponseFormat, normalize_doi};
use pubmed_galaxy::server::GalaxyServer;
use pubmed_galaxy::{Config, NetworkBuilder, PubMedClient, RecordSource};

#[derive(Parser, Debug)]
#[command(name = "pubmed-galaxy")]
#[command(about = "Research network backend over the PubMed E-utilities")]
#[command(version)]
struct Cli {
    /// NCBI API key (optional, enables 10 req/s)
    #[arg(long, env = "NCBI_API_KEY", global = true)]
    api_key: Option<String>,

    /// Contact email sent to NCBI with every request
    #[arg(long, env = "NCBI_EMAIL", global = true)]
    email: Option<String>,

    /// E-utilities base URL
    #[arg(long, env = "EUTILS_BASE_URL", global = true)]
    eutils_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to bind
        #[arg(long, default_value = "5000", env = "PORT")]
        port: u16,

        /// Directory with the built presentation bundle
        #[arg(long, env = "STATIC_DIR")]
        static_dir: Option<PathBuf>,
    },

    /// Build the research network for a DOI and print it
    Network {
        /// DOI of the root paper
        doi: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = ResponseFormat::Markdown)]
        format: ResponseFormat,
    },

    /// Print the PMID a DOI resolves to
    Resolve {
        /// DOI to resolve
        doi: String,
    },
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so lookups can be piped.
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::new(cli.api_key, cli.email);
    if let Some(url) = cli.eutils_url {
        config = config.with_eutils_url(url);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        has_api_key = config.has_api_key(),
        rate_limit = ?config.rate_limit_interval,
        "Starting PubMed galaxy"
    );

    let client = PubMedClient::new(config)?;

    match cli.command {
        Command::Serve { host, port, static_dir } => {
            let server = GalaxyServer::new(client).with_static_dir(static_dir);
            server.run_http(SocketAddr::new(host, port)).await?;
        }
        Command::Network { doi, format } => {
            let Some(doi) = normalize_doi(&doi) else {
                eprintln!("DOI is required");
                return Ok(ExitCode::FAILURE);
            };
            let builder = NetworkBuilder::new(Arc::new(client));
            let Some(network) = builder.build(&doi).await else {
                eprintln!("Could not fetch research data for {doi}");
                return Ok(ExitCode::FAILURE);
            };
            println!("{}", render_network(&network, format)?);
        }
        Command::Resolve { doi } => {
            let Some(doi) = normalize_doi(&doi) else {
                eprintln!("DOI is required");
                return Ok(ExitCode::FAILURE);
            };
            let Some(pmid) = client.resolve_doi(&doi).await else {
                eprintln!("Could not find PMID for {doi}");
                return Ok(ExitCode::FAILURE);
            };
            println!("{pmid}");
        }
    }

    Ok(ExitCode::SUCCESS)
}
