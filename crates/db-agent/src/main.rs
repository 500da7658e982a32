mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use tokio::sync::mpsc;

use agent_core::{AgentEvent, AppConfig};
use agent_llm::OpenAIProvider;
use agent_loop::{AgentLoopConfig, ConversationOrchestrator};
use agent_tools::{
    read_line, ConsolePrompt, MongoConnector, MongoRecordStore, SchemaStore, SvgChartRenderer,
    ToolRegistry,
};

const DEFAULT_MONGODB_URL: &str = "mongodb://localhost:27017";
const EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "bye"];

#[derive(Parser, Debug)]
#[command(name = "db-agent")]
#[command(about = "Ask questions about a MongoDB database in plain language")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./db-agent.toml when present)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Chat model name
    #[arg(long)]
    model: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long)]
    api_base: Option<String>,

    #[arg(long)]
    mongodb_url: Option<String>,

    /// Directory holding tables.yaml and one <table>.yaml per table
    #[arg(long)]
    schema_dir: Option<PathBuf>,

    /// Where rendered charts are written
    #[arg(long)]
    chart_dir: Option<PathBuf>,

    /// Tool calls allowed per question
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Write charts without opening them
    #[arg(long)]
    no_viewer: bool,

    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,
}

impl Cli {
    /// Command-line flags take precedence over file and environment settings.
    fn apply(&self, config: &mut AppConfig) -> Result<()> {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(api_base) = &self.api_base {
            config.api_base = Some(api_base.clone());
        }
        if let Some(mongodb_url) = &self.mongodb_url {
            config.mongodb_url = Some(mongodb_url.clone());
        }
        if let Some(schema_dir) = &self.schema_dir {
            config.schema_dir = schema_dir.clone();
        }
        if let Some(chart_dir) = &self.chart_dir {
            config.chart_dir = chart_dir.clone();
        }
        if let Some(max_rounds) = self.max_rounds {
            if max_rounds == 0 {
                bail!("--max-rounds must be at least 1");
            }
            config.max_rounds = max_rounds;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init_logging(cli.debug);

    if let Ok(path) = dotenv {
        log::debug!("Loaded environment from {}", path.display());
    }

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config)?;

    let Some(api_key) = config.api_key.clone() else {
        bail!("OPENAI_API_KEY is not set (environment, .env or config file)");
    };
    let mongodb_url = config.mongodb_url.clone().unwrap_or_else(|| {
        log::warn!("MONGODB_URL is not set, using {}", DEFAULT_MONGODB_URL);
        DEFAULT_MONGODB_URL.to_string()
    });
    if !config.schema_dir.is_dir() {
        log::warn!(
            "Schema directory {} does not exist",
            config.schema_dir.display()
        );
    }

    let mut llm = OpenAIProvider::new(api_key).with_model(config.model.clone());
    if let Some(api_base) = &config.api_base {
        llm = llm.with_base_url(api_base.clone());
    }
    log::info!("Using model {}", llm.model());

    let registry = ToolRegistry::new(
        SchemaStore::new(&config.schema_dir),
        Arc::new(MongoRecordStore::new(MongoConnector::new(mongodb_url))),
        Arc::new(SvgChartRenderer::new(&config.chart_dir).with_viewer(!cli.no_viewer)),
        Arc::new(ConsolePrompt),
    );

    let (event_tx, mut event_rx) = mpsc::channel(32);
    let mut orchestrator = ConversationOrchestrator::new(
        Arc::new(llm),
        Arc::new(registry),
        AgentLoopConfig {
            max_rounds: config.max_rounds,
            ..Default::default()
        },
    )
    .with_events(event_tx);

    run_repl(&mut orchestrator, &mut event_rx).await
}

async fn run_repl(
    orchestrator: &mut ConversationOrchestrator,
    events: &mut mpsc::Receiver<AgentEvent>,
) -> Result<()> {
    println!("{}", "MongoDB assistant Agent".bold());
    println!("Type 'quit' to exit.");

    loop {
        let Some(line) = read_line("\nYou: ").await.context("Failed to read input")? else {
            println!("\nGoodbye!");
            return Ok(());
        };

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if is_exit_command(query) {
            println!("Goodbye!");
            return Ok(());
        }

        let result = {
            let answer = orchestrator.handle_query(query);
            tokio::pin!(answer);
            loop {
                tokio::select! {
                    biased;
                    Some(event) = events.recv() => print_event(&event),
                    result = &mut answer => break result,
                }
            }
        };
        while let Ok(event) = events.try_recv() {
            print_event(&event);
        }

        match result {
            Ok(text) => println!("{} {}", "Agent:".green().bold(), text),
            Err(error) => {
                log::debug!("Query failed: {:?}", error);
                println!("{}", format!("Error: {error}").red());
            }
        }
    }
}

fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    EXIT_COMMANDS
        .iter()
        .any(|command| input.eq_ignore_ascii_case(command))
}

fn print_event(event: &AgentEvent) {
    match event {
        AgentEvent::ToolStart {
            tool_name,
            arguments,
            ..
        } => {
            println!(
                "{}",
                format!("Executing tool: {tool_name} with args: {arguments}").yellow()
            );
        }
        AgentEvent::ToolError { error, .. } => {
            println!("{}", format!("Tool error: {error}").red());
        }
        AgentEvent::ToolComplete {
            tool_name, found, ..
        } => {
            log::debug!("Tool {} finished (found: {})", tool_name, found);
        }
        AgentEvent::Complete { rounds } => {
            log::debug!("Answered after {} model requests", rounds);
        }
    }
}
