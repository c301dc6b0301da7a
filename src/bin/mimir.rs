//! mimir: command-line client for the problem catalog
//!
//! Prints results as pretty JSON. Exit codes: 0 on success, 2 when the
//! requested record does not exist, 1 for any other failure.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use mimir::gateway::DEFAULT_SUBMISSION_LIMIT;
use mimir::{
    ArticleOrder, ArticleQuery, CachedGateway, Config, MimirBuilder, MimirError, ProblemGateway,
    SolutionId,
};
use serde::Serialize;

/// Mimir CLI
#[derive(Parser)]
#[command(name = "mimir")]
#[command(version)]
#[command(about = "Cached LeetCode problem catalog client")]
struct Args {
    /// Config file (default: ~/.mimir/config.toml, then /etc/mimir/config.toml)
    #[arg(short, long, env = "MIMIR_CONFIG")]
    config: Option<PathBuf>,

    /// Override the GraphQL endpoint
    #[arg(long, env = "MIMIR_ENDPOINT")]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every problem in the catalog
    List,

    /// Resolve a display id or slug to its catalog entry
    Get {
        /// Display id (e.g. "1") or slug (e.g. "two-sum")
        id: String,
    },

    /// Fetch the full problem record
    Detail {
        /// Display id or slug
        id: String,
    },

    /// Search problem titles (case-insensitive)
    Search { query: String },

    /// Pick a random problem
    Random,

    /// Show today's daily challenge
    Daily,

    /// Show a user's public profile
    User { username: String },

    /// Show a user's contest ranking and history
    Contests { username: String },

    /// Show a user's recent submissions
    Submissions {
        username: String,
        #[arg(short, long, default_value_t = DEFAULT_SUBMISSION_LIMIT)]
        limit: u32,
    },

    /// List problems carrying a topic tag
    Topic {
        /// Tag slug (e.g. "dynamic-programming")
        tag: String,
    },

    /// List community solution articles for a problem
    Solutions {
        /// Problem slug
        slug: String,
        /// HOT, NEWEST, OLDEST or MOST_VOTES
        #[arg(long, default_value = "HOT")]
        order_by: ArticleOrder,
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 15)]
        first: u32,
        /// Only articles matching this text
        #[arg(long)]
        search: Option<String>,
        /// Filter by tag slug (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Show the full content of a solution article
    Solution {
        /// Topic id (or article id with --article)
        id: String,
        /// Treat the id as an article id
        #[arg(long)]
        article: bool,
    },

    /// Load the catalog and report its status
    Status,

    /// Keep the catalog fresh in the background and report its status
    Watch,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if e.is_not_found() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(args: Args) -> mimir::Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let mut builder = MimirBuilder::from_config(&config);
    if let Some(endpoint) = args.endpoint {
        builder = builder.endpoint(endpoint);
    }
    let gateway = Arc::new(builder.build()?);

    match args.command {
        Command::List => print_json(&listed(&gateway.list().await?)),
        Command::Get { id } => print_json(&with_url(&gateway.resolve(&id).await?)),
        Command::Detail { id } => print_json(&gateway.detail(&id).await?),
        Command::Search { query } => {
            let hits = gateway.search(&query).await?;
            print_json(&listed(&hits))
        }
        Command::Random => print_json(&with_url(&gateway.random().await?)),
        Command::Daily => print_json(&gateway.daily().await?),
        Command::User { username } => print_json(&gateway.user_profile(&username).await?),
        Command::Contests { username } => print_json(&gateway.user_contests(&username).await?),
        Command::Submissions { username, limit } => {
            print_json(&gateway.recent_submissions(&username, limit).await?)
        }
        Command::Topic { tag } => print_json(&gateway.problems_by_topic(&tag).await?),
        Command::Solutions {
            slug,
            order_by,
            skip,
            first,
            search,
            tags,
        } => {
            let query = tags.into_iter().fold(
                ArticleQuery::new().order_by(order_by).skip(skip).first(first),
                |query, tag| query.tag(tag),
            );
            let articles = match search {
                Some(text) => gateway.search_solution_articles(&slug, &text, &query).await?,
                None => gateway.solution_articles(&slug, &query).await?,
            };
            print_json(&articles)
        }
        Command::Solution { id, article } => {
            let id = if article {
                SolutionId::Article(id)
            } else {
                SolutionId::Topic(id)
            };
            print_json(&gateway.solution_content(&id).await?)
        }
        Command::Status => {
            gateway.warm().await;
            print_status(&gateway)
        }
        Command::Watch => watch(&gateway, &config).await,
    }
}

async fn watch(gateway: &Arc<CachedGateway>, config: &Config) -> mimir::Result<()> {
    let period = config
        .cache
        .refresh_interval()
        .unwrap_or_else(|| gateway.status().ttl.max(Duration::from_secs(1)));
    let refresher = gateway.spawn_refresher(period)?;

    let mut ticker = tokio::time::interval(period);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = ticker.tick() => print_status(gateway)?,
            _ = &mut ctrl_c => break,
        }
    }

    refresher.shutdown().await;
    Ok(())
}

#[derive(Serialize)]
struct StatusReport {
    records: usize,
    age_secs: Option<u64>,
    ttl_secs: u64,
    stale: bool,
    cached_details: u64,
}

fn print_status(gateway: &CachedGateway) -> mimir::Result<()> {
    let status = gateway.status();
    print_json(&StatusReport {
        records: status.records,
        age_secs: status.age.map(|age| age.as_secs()),
        ttl_secs: status.ttl.as_secs(),
        stale: status.is_stale(),
        cached_details: gateway.details().len(),
    })
}

#[derive(Serialize)]
struct Listed<'a> {
    #[serde(flatten)]
    record: &'a mimir::SummaryRecord,
    url: String,
}

fn with_url(record: &mimir::SummaryRecord) -> Listed<'_> {
    Listed {
        record,
        url: record.url(),
    }
}

fn listed(records: &[mimir::SummaryRecord]) -> Vec<Listed<'_>> {
    records.iter().map(with_url).collect()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> mimir::Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(MimirError::from)?;
    println!("{text}");
    Ok(())
}
