//! roiview: backend proxy and diagnostics for the ROI viewer.
//!
//! `roiview serve` runs the HTTP proxy; `roiview fetch` queries the backend
//! directly and prints what it returns.
#![allow(clippy::uninlined_format_args)]

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use roiview_core::{BackendConfig, BoundingBox, BACKEND_URL_ENV};
use roiview_io::BackendClient;
use roiview_server::{router, ProxyState};
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Core(#[from] roiview_core::Error),

    #[error("Backend error: {0}")]
    Backend(#[from] roiview_io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Backend resource to fetch.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Resource {
    /// Full ROI list (`/api/roi/all`)
    Rois,
    /// Aggregate statistics (`/api/stats`)
    Stats,
}

/// Multi-channel ROI viewer backend proxy.
#[derive(Parser)]
#[command(name = "roiview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP proxy in front of the backend
    Serve {
        /// Backend base address (defaults to the built-in backend)
        #[arg(long, env = BACKEND_URL_ENV)]
        backend_url: Option<String>,

        /// Address to listen on
        #[arg(long, env = "ROIVIEW_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,

        /// Upstream request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },

    /// Fetch a backend resource and print a summary
    Fetch {
        /// Resource to fetch
        #[arg(value_enum)]
        resource: Resource,

        /// Backend base address (defaults to the built-in backend)
        #[arg(long, env = BACKEND_URL_ENV)]
        backend_url: Option<String>,

        /// Print the raw JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            backend_url,
            bind,
            timeout_secs,
        } => {
            let config = BackendConfig::resolve(backend_url.as_deref())?;
            serve(config, bind, Duration::from_secs(timeout_secs))
        }

        Commands::Fetch {
            resource,
            backend_url,
            json,
            timeout_secs,
        } => {
            let config = BackendConfig::resolve(backend_url.as_deref())?;
            let client = BackendClient::new(config, Duration::from_secs(timeout_secs))?;
            fetch(&client, resource, json)
        }
    }
}

fn serve(config: BackendConfig, bind: SocketAddr, timeout: Duration) -> Result<()> {
    let state = ProxyState::new(config, timeout)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(bind).await?;
        info!(
            "proxying {} on http://{}",
            state.config().base_url(),
            listener.local_addr()?
        );
        axum::serve(listener, router(state)).await?;
        Ok(())
    })
}

fn fetch(client: &BackendClient, resource: Resource, json: bool) -> Result<()> {
    match resource {
        Resource::Rois => {
            let rois = client.fetch_rois()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rois)?);
                return Ok(());
            }
            println!("Backend: {}", client.config().base_url());
            println!("ROIs: {}", rois.len());
            if let Some(bb) = BoundingBox::from_rois(&rois) {
                println!("X range: {:.1} - {:.1}", bb.min_x, bb.max_x);
                println!("Y range: {:.1} - {:.1}", bb.min_y, bb.max_y);
            }
            for (idx, roi) in rois.iter().take(5).enumerate() {
                println!(
                    "  #{:<4} x={:>10.1} y={:>10.1} cy0={:.0} cy1={:.0}",
                    idx, roi.x, roi.y, roi.cy0, roi.cy1
                );
            }
            if rois.len() > 5 {
                println!("  ... {} more", rois.len() - 5);
            }
        }
        Resource::Stats => {
            let stats = client.fetch_stats()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            println!("Backend: {}", client.config().base_url());
            println!("Filtered ROIs: {}", stats.filtered_rois);
            println!("Total in CSV: {}", stats.total_rois_in_csv);
            println!("Filter: {}", stats.filter_criteria);
            println!(
                "Images loaded: {}",
                if stats.images_loaded() { "yes" } else { "no" }
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_backend_url_env_on_every_subcommand() {
        let cli = Cli::command();
        for name in ["serve", "fetch"] {
            let sub = cli.find_subcommand(name).unwrap();
            let arg = sub
                .get_arguments()
                .find(|a| a.get_id() == "backend_url")
                .unwrap();
            assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new(BACKEND_URL_ENV)));
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli =
            Cli::try_parse_from(["roiview", "serve", "--backend-url", "http://h:5000"]).unwrap();
        let Commands::Serve {
            backend_url,
            bind,
            timeout_secs,
        } = cli.command
        else {
            panic!("expected serve");
        };
        assert_eq!(backend_url.as_deref(), Some("http://h:5000"));
        assert_eq!(bind, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(timeout_secs, 30);
    }
}
