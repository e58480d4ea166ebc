// ABOUTME: CLI argument definitions for the ghpic application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, ProxySection};
use crate::proxy::ProxyMode;
use crate::uploader::NamingPolicy;

#[derive(Parser, Debug)]
#[command(name = "ghpic")]
#[command(about = "Host images in a GitHub repository", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Force colored output even when piped
    #[arg(long, global = true, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Load this config file after the standard locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload image files to the repository, one at a time
    Upload {
        /// Image files to upload
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// GitHub token with contents write access
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Target repository (owner/name)
        #[arg(long)]
        repo: Option<String>,

        /// Branch to commit to (repository default when omitted)
        #[arg(long)]
        branch: Option<String>,

        /// Remote naming policy
        #[arg(long, value_enum)]
        naming: Option<NamingPolicy>,

        /// Public base URL substituted into result links
        #[arg(long)]
        display_base: Option<String>,

        /// GitHub API base URL
        #[arg(long)]
        api_url: Option<String>,

        /// Send API requests through this proxy
        #[arg(long, value_name = "URL")]
        https_proxy: Option<String>,

        /// Output as JSON
        #[arg(long, conflicts_with = "table")]
        json: bool,

        /// Pretty print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,

        /// Output as a table
        #[arg(long)]
        table: bool,
    },
    /// Run the caching CORS proxy in front of raw.githubusercontent.com
    Serve {
        /// Address to listen on
        #[arg(long, short)]
        bind: Option<String>,

        /// Upstream base URL requests are forwarded to
        #[arg(long)]
        upstream: Option<String>,

        /// Forwarding behaviour
        #[arg(long, value_enum)]
        mode: Option<ProxyMode>,

        /// Cache lifetime in seconds
        #[arg(long)]
        cache_seconds: Option<u64>,

        /// Value of Access-Control-Allow-Origin
        #[arg(long)]
        allowed_origin: Option<String>,

        /// Give up on the upstream after this many seconds
        #[arg(long, value_name = "SECS")]
        upstream_timeout: Option<u64>,
    },
    /// Print the effective configuration
    Config,
}

impl Commands {
    /// Flags given on the command line, as a config layer that overrides files
    pub fn config_overrides(&self) -> Config {
        match self {
            Commands::Upload {
                repo,
                branch,
                naming,
                display_base,
                api_url,
                https_proxy,
                ..
            } => Config {
                repo: repo.clone(),
                branch: branch.clone(),
                naming: *naming,
                display_base: display_base.clone(),
                api_url: api_url.clone(),
                https_proxy: https_proxy.clone(),
                ..Default::default()
            },
            Commands::Serve {
                bind,
                upstream,
                mode,
                cache_seconds,
                allowed_origin,
                upstream_timeout,
            } => Config {
                proxy: Some(ProxySection {
                    upstream: upstream.clone(),
                    mode: *mode,
                    cache_seconds: *cache_seconds,
                    allowed_origin: allowed_origin.clone(),
                    bind: bind.clone(),
                    upstream_timeout_secs: *upstream_timeout,
                }),
                ..Default::default()
            },
            Commands::Config => Config::default(),
        }
    }
}
