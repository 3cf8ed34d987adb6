use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use agent_core::{AgentEvent, ProjectContext};
use agent_llm::GeminiProvider;
use agent_loop::{LoopConfig, Orchestrator};
use agent_tools::{default_registry, SystemCommandRunner};

#[derive(Parser)]
#[command(name = "term-agent")]
#[command(about = "Terminal AI assistant for scaffolding, editing and running projects")]
#[command(version)]
struct Cli {
    /// Gemini API key; usually supplied via the environment or a .env file
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model to use
    #[arg(long, default_value = "gemini-2.0-flash")]
    model: String,

    /// Override the API base URL (e.g. a proxy)
    #[arg(long)]
    base_url: Option<String>,

    /// Maximum model/tool rounds per query
    #[arg(long, default_value = "50")]
    max_rounds: usize,

    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let api_key = cli
        .api_key
        .context("GEMINI_API_KEY is not set (flag --api-key, environment, or .env file)")?;

    let mut provider = GeminiProvider::new(api_key).with_model(cli.model);
    if let Some(base_url) = cli.base_url {
        provider = provider.with_base_url(base_url);
    }

    let project = ProjectContext::new();
    let registry = default_registry(Arc::new(SystemCommandRunner::new()), project.clone())
        .context("failed to build tool registry")?;

    let mut orchestrator = Orchestrator::new(
        Arc::new(provider),
        Arc::new(registry),
        project,
        LoopConfig {
            max_rounds: cli.max_rounds,
        },
    )
    .with_event_sink(Box::new(render_event));

    println!("Detected OS: {}", std::env::consts::OS);
    println!(
        "{}",
        "Terminal AI assistant is ready! Type 'exit' or 'quit' to end the session.".cyan()
    );

    loop {
        print!("\n{} ", "What would you like to do?".cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let input = input.trim();

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("{}", "Exiting. Goodbye!".cyan());
            break;
        }

        if input.is_empty() {
            continue;
        }

        println!("{}", "Thinking...".dimmed());
        match orchestrator.handle_query(input).await {
            Ok(output) => println!("{} {}", "Result:".green().bold(), output),
            Err(e) => println!("{} {}", "Error:".red().bold(), e),
        }
    }

    Ok(())
}

fn render_event(event: &AgentEvent) {
    match event {
        AgentEvent::Plan { content } => {
            println!("{} {}", "Planning:".yellow(), content);
        }
        AgentEvent::Action { function, input } => {
            println!(
                "{} Using {} with input: {}",
                "Action:".yellow(),
                function.bold(),
                input
            );
        }
        AgentEvent::PathRewritten { path } => {
            println!("{} {}", "Writing to:".dimmed(), path.display());
        }
        AgentEvent::Observation { output } => {
            println!("{} {}", "Observation:".yellow(), output);
        }
        AgentEvent::ProjectCreated { info } => {
            println!(
                "{} {} in {}",
                "Project created:".green(),
                info.name,
                info.directory.display()
            );
        }
    }
}
