use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use profilescope_core::{
    metrics, normalize, providers::GitHubProvider, Config, Exporter, ProfileReport,
    ProfileResolver, Resolution, ResolvedProfile,
};
use profilescope_tui::{sparkline, App, SnapshotWriter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "profilescope")]
#[command(version, about = "Evaluate GitHub profiles and organizations from the terminal", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Resolve a profile and print its metrics
    Show {
        /// Username, organization or profile URL
        identifier: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a profile and write a report (.json, .md or .txt)
    Export {
        /// Username, organization or profile URL
        identifier: String,
        /// Output file; the format follows the extension
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    // The TUI owns the terminal, so its logs go to a file
    let log_file = if cli.command.is_none() {
        Some(log_path(&config))
    } else {
        None
    };
    init_logging(log_file.as_ref())?;

    let provider = GitHubProvider::from_config(&config.github)?;
    let resolver = ProfileResolver::new(Box::new(provider));

    match cli.command {
        Some(Commands::Show { identifier, json }) => {
            let profile = resolve_once(&resolver, &identifier).await?;
            let report = ProfileReport::new(&profile);
            if json {
                println!("{}", Exporter::to_json(&report)?);
            } else {
                print!("{}", Exporter::to_text(&report, config.ui.thousands_separator));
                println!(
                    "{}",
                    sparkline::series_sparkline(&metrics::chart_series(&profile.record))
                );
            }
        }
        Some(Commands::Export { identifier, output }) => {
            let profile = resolve_once(&resolver, &identifier).await?;
            let report = ProfileReport::new(&profile);
            Exporter::export_to_file(&report, &output, config.ui.thousands_separator)?;
            tracing::info!("Report written to {}", output.display());
            println!("Report written to {}", output.display());
        }
        None => {
            let app = App::new().with_separator(config.ui.thousands_separator);
            let snapshots = SnapshotWriter::new(config.export.snapshot_path());
            profilescope_tui::run_tui(
                app,
                Arc::new(resolver),
                Box::new(snapshots),
                config.ui.developer_url.clone(),
            )
            .await?;
        }
    }

    Ok(())
}

async fn resolve_once(resolver: &ProfileResolver, raw: &str) -> anyhow::Result<ResolvedProfile> {
    let identifier = normalize(raw);
    tracing::info!("Looking up: {}", identifier);

    match resolver.resolve(&identifier).await {
        Some(Resolution::Resolved(profile)) => Ok(profile),
        Some(Resolution::Failed(message)) => anyhow::bail!(message),
        None => anyhow::bail!("no username or organization given"),
    }
}

fn log_path(config: &Config) -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("profilescope"))
        .unwrap_or_else(|| config.export.directory())
        .join("profilescope.log")
}

fn init_logging(file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "profilescope=info".into());

    match file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_no_subcommand_as_tui() {
        let cli = Cli::try_parse_from(["profilescope"]).expect("cli parse should work");
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_show_with_json() {
        let cli = Cli::try_parse_from(["profilescope", "show", "https://github.com/octocat", "--json"])
            .expect("cli parse should work");
        match cli.command {
            Some(Commands::Show { identifier, json }) => {
                assert_eq!(identifier, "https://github.com/octocat");
                assert!(json);
            }
            _ => panic!("expected show command"),
        }
    }

    #[test]
    fn parses_export_with_global_config() {
        let cli = Cli::try_parse_from([
            "profilescope",
            "export",
            "github",
            "--output",
            "github.md",
            "--config",
            "custom.toml",
        ])
        .expect("cli parse should work");

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Some(Commands::Export { identifier, output }) => {
                assert_eq!(identifier, "github");
                assert_eq!(output, PathBuf::from("github.md"));
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn export_requires_output() {
        assert!(Cli::try_parse_from(["profilescope", "export", "github"]).is_err());
    }
}
