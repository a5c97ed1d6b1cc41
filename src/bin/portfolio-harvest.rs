//! Portfolio harvester
//!
//! Lists an account's repositories, keeps the ones tagged with the portfolio
//! topic and overwrites the snapshot file. Exits 1 on any failure, leaving
//! the previous snapshot untouched.
//!
//! Usage:
//!   GITHUB_TOKEN=... portfolio-harvest --account <NAME> [--output public/projects.json]

use clap::Parser;
use portfolio_feed::adapters::{GitHubAdapter, RepoSource, StaticSource};
use portfolio_feed::auth::EnvTokenProvider;
use portfolio_feed::{HarvestConfig, Harvester, TopicMatch};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "portfolio-harvest")]
#[command(about = "Snapshot portfolio-tagged repositories to a JSON file", long_about = None)]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Account whose repositories are listed
    #[arg(short, long, env = "PORTFOLIO_ACCOUNT")]
    account: Option<String>,

    /// Topic label selecting portfolio projects
    #[arg(short, long, env = "PORTFOLIO_TOPIC")]
    topic: Option<String>,

    /// Snapshot file to overwrite
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// REST API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Upper bound on listing pages (1 = single request)
    #[arg(long)]
    max_pages: Option<u32>,

    /// Compare the topic label case-sensitively
    #[arg(long)]
    exact_topic: bool,

    /// Keep forked repositories
    #[arg(long)]
    include_forks: bool,

    /// Environment variable holding the API token
    #[arg(long)]
    token_env: Option<String>,

    /// Harvest from a saved API listing (JSON array) instead of the network
    #[arg(long)]
    api_dump: Option<PathBuf>,
}

impl Args {
    async fn into_config(self) -> anyhow::Result<(HarvestConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => HarvestConfig::load(path).await?,
            None => HarvestConfig::default(),
        };

        if let Some(account) = self.account {
            config.account = account;
        }
        if let Some(topic) = self.topic {
            config.topic = topic;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(api_url) = self.api_url {
            config.api_url = api_url;
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if self.exact_topic {
            config.topic_match = TopicMatch::Exact;
        }
        if self.include_forks {
            config.include_forks = true;
        }
        if let Some(token_env) = self.token_env {
            config.token_env = token_env;
        }

        config.validate()?;
        Ok((config, self.api_dump))
    }
}

async fn run(args: Args) -> anyhow::Result<usize> {
    let (config, api_dump) = args.into_config().await?;

    let source: Arc<dyn RepoSource> = match api_dump {
        Some(path) => {
            info!("Harvesting from API dump {}", path.display());
            Arc::new(StaticSource::from_dump(&path).await?)
        }
        None => {
            let auth = Arc::new(EnvTokenProvider::new(config.token_env.clone()));
            Arc::new(
                GitHubAdapter::with_api_url(auth, config.api_url.clone())?
                    .with_paging(config.per_page, config.max_pages),
            )
        }
    };

    let harvester = Harvester::from_config(source, &config);
    let count = harvester
        .harvest(&config.account, &config.topic, &config.output_path)
        .await?;

    info!(
        "Successfully wrote {} projects to {}",
        count,
        config.output_path.display()
    );
    Ok(count)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Error fetching projects: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
