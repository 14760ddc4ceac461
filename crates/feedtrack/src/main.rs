//! Command-line entry point: run the server or talk to one.

use anyhow::Context;
use clap::{Parser, Subcommand};
use feedtrack::client::{FeedTrackClient, Served, Source};
use feedtrack::config::{FeedTrackConfig, LayeredConfigOptions};
use feedtrack::core::FeedbackService;
use feedtrack::protocol::NewFeedback;
use log::{debug, info};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line options for FeedTrack.
#[derive(Parser)]
#[command(name = "feedtrack", version)]
struct Cli {
    /// Optional feedtrack.json5 applied over the discovered layers
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Address override, e.g. 0.0.0.0:5000
        #[arg(long)]
        bind: Option<String>,
    },
    /// Submit one piece of feedback
    Submit {
        #[arg(long)]
        text: String,
        #[arg(long)]
        student_id: String,
        #[arg(long, default_value = "")]
        student_name: String,
    },
    /// List feedback, newest first
    List {
        /// Only this student's feedback
        #[arg(long)]
        student: Option<String>,
    },
    /// Generate staff insights over recent feedback
    Insights,
    /// Print headline counters
    Metrics,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    feedtrack::init_logging();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Serve { bind } => serve(config, bind).await,
        Command::Submit {
            text,
            student_id,
            student_name,
        } => {
            let client = FeedTrackClient::from_config(&config).context("failed to build client")?;
            let submission = NewFeedback {
                text,
                student_id,
                student_name,
            };
            print_served(client.submit(submission).await?)
        }
        Command::List { student } => {
            let client = FeedTrackClient::from_config(&config).context("failed to build client")?;
            let served = match student {
                Some(student_id) => client.list_for_student(&student_id).await?,
                None => client.list_all().await?,
            };
            print_served(served)
        }
        Command::Insights => {
            let client = FeedTrackClient::from_config(&config).context("failed to build client")?;
            print_served(client.insights().await?)
        }
        Command::Metrics => {
            let client = FeedTrackClient::from_config(&config).context("failed to build client")?;
            print_served(client.metrics().await?)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<FeedTrackConfig> {
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = path {
        info!("adding runtime config layer: {}", path.display());
        options = options.with_runtime_path(path);
    }
    let layered = FeedTrackConfig::load_layered_with_options(options)
        .context("failed to load layered config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());
    Ok(layered.config)
}

async fn serve(config: FeedTrackConfig, bind: Option<String>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let service =
        Arc::new(FeedbackService::from_config(&config).context("failed to build service")?);
    info!(
        "starting server (bind={}, durable_store={}, models={})",
        bind,
        service.has_durable_store(),
        config.ai.models.len()
    );
    let app = feedtrack::server::router(service, config.server.body_limit_bytes);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    feedtrack::server::serve(listener, app)
        .await
        .context("server error")
}

fn print_served<T: Serialize>(served: Served<T>) -> anyhow::Result<()> {
    if served.source == Source::Local {
        eprintln!("server unreachable; result produced locally");
    }
    let body = serde_json::to_string_pretty(&served.value).context("failed to encode output")?;
    println!("{body}");
    Ok(())
}
