use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use life_copilot::analysis::Analyzer;
use life_copilot::config::Config;
use life_copilot::gemini::GeminiClient;
use life_copilot::models::Task;
use life_copilot::session::Session;
use life_copilot::store::TaskStore;
use life_copilot::{api, render};

#[derive(Parser)]
#[command(name = "copilot")]
#[command(about = "Forecast this week's stress from your task list")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Start with a few sample tasks
        #[arg(long)]
        seed_demo: bool,

        /// Only analyze on explicit refresh requests
        #[arg(long)]
        no_auto_refresh: bool,
    },
    /// Analyze a JSON file of tasks once and print the result
    Analyze {
        /// Path to a JSON array of tasks
        #[arg(short, long)]
        tasks: PathBuf,

        /// Print the analysis as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "life_copilot=debug,tower_http=debug".into()),
    );

    // Logs go to stderr so `analyze --json` output stays clean
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_analyzer(config: &Config) -> anyhow::Result<Analyzer> {
    let client = GeminiClient::from_config(config)?;
    Ok(Analyzer::new(Arc::new(client)))
}

async fn serve(
    config: Config,
    port: u16,
    seed_demo: bool,
    no_auto_refresh: bool,
) -> anyhow::Result<()> {
    let analyzer = build_analyzer(&config)?;
    let store = if seed_demo {
        TaskStore::with_demo_tasks(analyzer.today())
    } else {
        TaskStore::new()
    };
    let auto_refresh = config.auto_refresh && !no_auto_refresh;
    let session = Session::with_store(analyzer, store).with_auto_refresh(auto_refresh);

    if auto_refresh {
        // Initial analysis, as if the task list had just changed
        session.spawn_refresh();
    }

    let app = api::create_router(session);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Life Copilot listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn analyze(config: Config, path: PathBuf, json: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let tasks: Vec<Task> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse tasks from {}", path.display()))?;

    let analyzer = build_analyzer(&config)?;
    let analysis = analyzer
        .refresh_analysis(&tasks)
        .await
        .map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", render::render_analysis(&analysis));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::load()?;

    match cli.command {
        Some(Commands::Serve {
            port,
            seed_demo,
            no_auto_refresh,
        }) => serve(config, port, seed_demo, no_auto_refresh).await?,
        Some(Commands::Analyze { tasks, json }) => analyze(config, tasks, json).await?,
        None => serve(config, 3000, false, false).await?,
    }

    Ok(())
}
