//! CLI entrypoint for stepwise
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use stepwise_application::{
    EngineKind, GenerationGateway, SolveInput, SolveUseCase, StreamSolveInput, StreamSolveUseCase,
};
use stepwise_domain::OutputFormat;
use stepwise_infrastructure::{ConfigLoader, FileConfig, InMemoryConversationStore, ScriptedGateway};
use stepwise_presentation::ConsoleSink;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO_PROBLEM: &str = "Solve 2x + 3 = 7";

#[derive(Parser)]
#[command(
    name = "stepwise",
    version,
    about = "Step-by-step reasoning over a text generation engine"
)]
struct Cli {
    /// The problem to reason about
    problem: Option<String>,

    /// Reasoning engine: auto, mathematical, logical, causal or hybrid
    #[arg(long, default_value = "auto")]
    engine: String,

    /// Output format: json, text, markdown or structured
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Stream the response incrementally
    #[arg(long)]
    stream: bool,

    /// Hide think content while streaming
    #[arg(long)]
    hide_think: bool,

    /// Use the canned demo engine instead of the configured one
    #[arg(long)]
    demo: bool,

    /// Path to a config file (merged over discovered configs)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip config file discovery, use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress informational output
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting stepwise");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    if !config.output.color {
        colored::control::set_override(false);
    }

    let engine = match cli.engine.as_str() {
        "auto" => None,
        other => Some(other.parse::<EngineKind>()?),
    };

    let problem = match cli.problem {
        Some(p) => p,
        None if cli.demo => DEMO_PROBLEM.to_string(),
        None => bail!("A problem statement is required (or try --demo)"),
    };

    // === Dependency Injection ===
    let gateway = build_gateway(cli.demo, &config)?;
    let params = config.reasoning_params();

    if cli.stream {
        let sink = if cli.hide_think {
            ConsoleSink::new().hide_think()
        } else {
            ConsoleSink::new()
        };

        // Ctrl-C cancels the in-flight request cooperatively.
        let token = CancellationToken::new();
        let ctrl_c_token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                ctrl_c_token.cancel();
            }
        });

        let store = Arc::new(InMemoryConversationStore::new());
        let use_case = StreamSolveUseCase::new(gateway)
            .with_params(params)
            .with_store(store);

        let mut input = StreamSolveInput::new(problem);
        if let Some(kind) = engine {
            input = input.with_engine(kind);
        }

        let outcome = use_case.execute(input, &sink, token).await?;
        info!(
            conversation = %outcome.conversation_id,
            stopped = outcome.metadata.stopped,
            "exchange finished"
        );
        return Ok(());
    }

    let format = cli
        .format
        .or(config.output.format)
        .unwrap_or_default();

    let use_case = SolveUseCase::new(gateway).with_params(params);
    let mut input = SolveInput::new(problem).with_format(format);
    if let Some(kind) = engine {
        input = input.with_engine(kind);
    }

    let output = use_case.execute(input).await?;
    println!("{}", output.response);

    if !cli.quiet && output.validation_summary.has_failures() {
        eprintln!(
            "validation: {} of {} findings failing",
            output.validation_summary.invalid, output.validation_summary.total
        );
    }

    Ok(())
}

fn build_gateway(demo: bool, config: &FileConfig) -> Result<Arc<dyn GenerationGateway>> {
    if demo {
        return Ok(Arc::new(ScriptedGateway::demo()));
    }
    match config.engine.kind.as_str() {
        "scripted" => Ok(Arc::new(ScriptedGateway::demo())),
        #[cfg(feature = "http-engine")]
        "http" => {
            use stepwise_infrastructure::{HttpEngineConfig, HttpGenerationGateway};
            let http_config = HttpEngineConfig {
                endpoint: config.engine.endpoint.clone(),
                model: config.engine.model.clone(),
                request_timeout: std::time::Duration::from_secs(config.engine.timeout_secs),
            };
            Ok(Arc::new(HttpGenerationGateway::new(http_config)?))
        }
        #[cfg(not(feature = "http-engine"))]
        "http" => bail!("this build has no HTTP engine support (enable the http-engine feature)"),
        other => bail!("unknown engine kind in config: {other}"),
    }
}
