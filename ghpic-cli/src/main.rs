// ABOUTME: Main entry point for the ghpic application
// ABOUTME: Uploads images to a GitHub repository or serves them through the edge proxy

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use ghpic_cli::cli::{Cli, Commands};
use ghpic_cli::cli_output::CliOutput;
use ghpic_cli::config::Config;
use ghpic_cli::output::{JsonFormatter, OutputFormat, TableFormatter, TextFormatter};
use ghpic_cli::proxy;
use ghpic_cli::uploader::{self, SelectedFile};
use secrecy::SecretString;
use std::env;
use std::io::IsTerminal;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let use_color = resolve_color(&cli);
    let output = CliOutput::with_color(use_color);

    match run(cli, use_color, &output).await {
        Ok(code) => code,
        Err(e) => {
            output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, use_color: bool, output: &CliOutput) -> Result<ExitCode> {
    let mut config = Config::load()?;
    if let Some(ref path) = cli.config {
        config = config.merge(Config::load_from_file(path)?);
    }
    config = config.merge(cli.command.config_overrides());
    config.validate()?;

    match cli.command {
        Commands::Upload {
            files,
            token,
            json,
            pretty,
            table,
            ..
        } => {
            let token = token.map(|t| SecretString::new(t.into_boxed_str()));
            let settings = config.upload_settings(token, cli.verbose);
            let files: Vec<SelectedFile> = files.into_iter().map(SelectedFile::new).collect();

            let results = uploader::upload_batch(&settings, &files).await;

            let formatted = if json {
                JsonFormatter::new(pretty).format_results(&results)?
            } else if table {
                TableFormatter::new(use_color).format_results(&results)?
            } else {
                TextFormatter::new(use_color).format_results(&results)?
            };
            println!("{}", formatted);

            let failures = results.failure_count();
            if failures == 0 {
                if !json {
                    output.success(&format!("Uploaded {} file(s)", results.success_count()));
                }
                Ok(ExitCode::SUCCESS)
            } else {
                if !json {
                    output.warning(&format!(
                        "{} of {} upload(s) failed",
                        failures,
                        results.len()
                    ));
                }
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Serve { .. } => {
            let section = config.proxy_section();
            let proxy_config = section.proxy_config()?;
            let addr = section.bind_addr()?;

            output.info(&format!(
                "Serving {} on http://{} (Ctrl-C to stop)",
                proxy_config.upstream_base(),
                addr
            ));
            proxy::serve(proxy_config, addr).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config => {
            let rendered = toml::to_string_pretty(&config)?;
            if rendered.trim().is_empty() {
                output.info("No configuration found; built-in defaults apply");
            } else {
                print!("{}", rendered);
            }
            if env::var_os("GITHUB_TOKEN").is_some() {
                output.info("GITHUB_TOKEN is set (value hidden)");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `--force-color` wins, then `--no-color`, `NO_COLOR` and dumb terminals
/// turn color off, otherwise color follows whether stdout is a terminal
fn resolve_color(cli: &Cli) -> bool {
    if cli.force_color {
        return true;
    }
    if cli.no_color
        || env::var_os("NO_COLOR").is_some()
        || env::var("TERM").unwrap_or_default() == "dumb"
    {
        return false;
    }
    std::io::stdout().is_terminal()
}
