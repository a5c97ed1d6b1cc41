//! Portfolio viewer
//!
//! Loads a snapshot from a file or from the site it is served with and prints
//! the filtered, sorted project list.
//!
//! Usage:
//!   portfolio-view [SOURCE] [--search TERM] [--tag TAG] [--sort updated|stars|name] [--json]

use clap::Parser;
use portfolio_feed::presenter::{
    LoadState, Presenter, SnapshotLoader, SnapshotLocation, SortKey, TagFilter,
};
use portfolio_feed::RepositorySummary;

#[derive(Parser, Debug)]
#[command(name = "portfolio-view")]
#[command(about = "Search, filter and sort a portfolio snapshot", long_about = None)]
struct Args {
    /// Snapshot file, directory, or site URL serving projects.json
    #[arg(default_value = "public/projects.json")]
    source: String,

    /// Case-insensitive search over name, description and topics
    #[arg(short, long, default_value = "")]
    search: String,

    /// Only show projects carrying this topic ("All" disables the filter)
    #[arg(short, long, default_value = "All")]
    tag: String,

    /// Sort order
    #[arg(long, default_value = "updated")]
    sort: SortKey,

    /// Print the visible records as JSON instead of a listing
    #[arg(long)]
    json: bool,

    /// Print the tag index and exit
    #[arg(long)]
    tags: bool,
}

fn render(record: &RepositorySummary) -> String {
    let updated = record
        .updated_at
        .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d").to_string());
    let mut line = format!(
        "{:<32} ★{:<5} ⑂{:<4} {}",
        record.name, record.stargazers_count, record.forks_count, updated
    );
    if let Some(language) = &record.language {
        line.push_str(&format!("  [{language}]"));
    }
    if !record.topics.is_empty() {
        line.push_str(&format!("  #{}", record.topics.join(" #")));
    }
    if let Some(description) = &record.description {
        line.push_str(&format!("\n    {description}"));
    }
    line
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let loader = SnapshotLoader::new(SnapshotLocation::parse(&args.source)?)?;
    let mut presenter = Presenter::new();
    presenter.set_search_term(args.search);
    presenter.set_active_tag(TagFilter::parse(&args.tag));
    presenter.set_sort_key(args.sort);

    if let LoadState::Failed(reason) = presenter.load(&loader).await {
        eprintln!("{reason}");
        std::process::exit(1);
    }

    if args.tags {
        for tag in presenter.tag_index() {
            println!("{tag}");
        }
        return Ok(());
    }

    let visible = presenter.visible();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!("{}", presenter.summary());
    if let Some(updated) = presenter.last_updated() {
        println!("Last updated: {}", updated.format("%Y-%m-%d %H:%M UTC"));
    }
    println!();

    if visible.is_empty() {
        println!("No projects match the current filters.");
    }
    for record in &visible {
        println!("{}", render(record));
    }

    Ok(())
}
