use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use purl_source::config::ResolverConfig;
use purl_source::{PackageIdentifier, SourceResolver};

#[derive(Parser)]
#[command(name = "purl-source")]
#[command(version, about = "Find the source repository and release page of packages")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/purl-source/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Package URLs, e.g. pkg:npm/lodash@4.17.21
    #[arg(required = true)]
    purls: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "purl_source=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(writer)).init();
    }

    let packages = cli
        .purls
        .iter()
        .map(|purl| {
            purl.parse::<PackageIdentifier>()
                .with_context(|| format!("Invalid package URL: {}", purl))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let config = ResolverConfig::load(cli.config.as_deref())?;

    let results = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(SourceResolver::new(&config).resolve_all(&packages));

    let mut stdout = std::io::stdout().lock();
    let mut failed = 0;
    for (package, result) in packages.iter().zip(results) {
        match result {
            Ok(resolution) => writeln!(stdout, "{}", serde_json::to_string(&resolution)?)?,
            Err(e) => {
                error!("Failed to resolve {}: {}", package, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} packages could not be resolved", failed, packages.len());
    }
    Ok(())
}
