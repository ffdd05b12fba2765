//! PubMed Galaxy
//!
//! Backend for a citation "galaxy" visualization. Resolves a DOI against the
//! NCBI PubMed E-utilities, fetches the paper and a bounded neighbourhood of
//! citing, referenced and similar papers, and groups their authors into
//! researchers.
//!
//! # Features
//!
//! - **Rate-limited**: one explicit interval gate per client (3 req/s, 10 with a key)
//! - **Graceful degradation**: only DOI resolution and the root fetch are fatal
//! - **HTTP API**: `/api/research-network`, `/api/doi-to-pmid`, `/api/health`
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pubmed_galaxy::{config::Config, network::NetworkBuilder, PubMedClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = PubMedClient::new(config)?;
//!     let builder = NetworkBuilder::new(Arc::new(client));
//!
//!     if let Some(network) = builder.build("10.1038/nature12373").await {
//!         println!("{} researchers", network.researchers.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod citations;
pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod network;
pub mod server;

pub use client::PubMedClient;
pub use config::Config;
pub use error::{ApiError, ClientError};
pub use network::{NetworkBuilder, RecordSource};
