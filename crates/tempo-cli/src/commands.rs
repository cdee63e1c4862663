use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tempo_agents::StreamEvent;
use tempo_config::{ConfigLoader, TempoConfig};
use tempo_core::User;
use tempo_session::Session;

#[derive(Parser)]
#[command(name = "tempo", version, about = "Tempo — tasks, time blocks, and chat over an AGI backend")]
pub struct Cli {
    /// Path to tempo.toml (default: ~/.tempo/tempo.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// User id to act as (overrides config)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat with the consolidator agent
    Chat,
    /// Fetch and print the task boards
    Tasks,
    /// Load long-term memory and print tier stats
    Memory,
}

impl Cli {
    pub async fn run(self) -> tempo_core::Result<()> {
        let loader = ConfigLoader::load(self.config.as_deref())?;
        let config = loader.get();

        let log_level = if self.verbose {
            "debug"
        } else {
            config.logging.level.as_str()
        };
        if config.logging.format == "json" {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
                )
                .json()
                .with_target(true)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
                )
                .with_target(false)
                .init();
        }

        let user_id = self
            .user
            .or_else(|| config.backend.user_id.clone())
            .unwrap_or_else(|| "local".to_string());

        match self.command {
            Commands::Chat => cmd_chat(config, user_id).await,
            Commands::Tasks => cmd_tasks(config).await,
            Commands::Memory => cmd_memory(config, user_id).await,
        }
    }
}

fn session_for(config: &TempoConfig, user_id: String) -> Session {
    let user = User {
        id: user_id.clone(),
        name: user_id,
        email: String::new(),
        avatar: None,
    };
    Session::connect(config, user)
}

async fn cmd_chat(config: TempoConfig, user_id: String) -> tempo_core::Result<()> {
    let mut session = session_for(&config, user_id);
    session.load_long_term().await;

    println!("tempo chat — /stats, /clear, /quit");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line {
            "/quit" => break,
            "/stats" => {
                print_stats(&session);
                continue;
            }
            "/clear" => {
                session.memory().clear(None);
                session.chat_mut().reset_transcript();
                println!("memory cleared");
                continue;
            }
            _ => {}
        }

        if config.ui.streaming {
            match session.chat_mut().send_streaming(line).await {
                Ok(mut rx) => {
                    let mut full = String::new();
                    while let Some(event) = rx.recv().await {
                        match event {
                            StreamEvent::Chunk(bytes) => {
                                let text = String::from_utf8_lossy(&bytes);
                                print!("{text}");
                                std::io::stdout().flush()?;
                                full.push_str(&text);
                            }
                            StreamEvent::Error(e) => {
                                eprintln!("\nstream error: {e}");
                                break;
                            }
                            StreamEvent::Done => break,
                        }
                    }
                    println!();
                    session.chat_mut().finish_streamed_turn(full.trim_end());
                }
                Err(e) => eprintln!("error: {e}"),
            }
        } else {
            match session.chat_mut().send(line).await {
                Ok(reply) => println!("{}", reply.content),
                Err(e) => eprintln!("error: {e}"),
            }
        }
    }
    Ok(())
}

async fn cmd_tasks(config: TempoConfig) -> tempo_core::Result<()> {
    let mut store = tempo_tasks::TaskStore::new(tempo_tasks::TaskApi::new(
        config.backend.task_url.clone(),
    ));
    store.fetch().await;
    if let Some(err) = store.error() {
        eprintln!("{err}");
        return Ok(());
    }
    let Some(graph) = store.data() else {
        println!("no tasks");
        return Ok(());
    };
    for (key, project) in &graph.projects {
        println!("{} — {} ({} tasks)", key, project.name, project.tasks.len());
        for task in &project.tasks {
            let mark = if task.completed { "x" } else { " " };
            println!("  [{mark}] {} ({:?})", task.title, task.priority);
        }
    }
    Ok(())
}

async fn cmd_memory(config: TempoConfig, user_id: String) -> tempo_core::Result<()> {
    let session = session_for(&config, user_id);
    let outcome = session.load_long_term().await;
    println!("L3 load: {outcome:?}");
    print_stats(&session);
    Ok(())
}

fn print_stats(session: &Session) {
    let stats = session.memory().stats();
    println!(
        "L1: {}  L2: {}  L3: {}  total {} bytes",
        stats.l1_count, stats.l2_count, stats.l3_count, stats.total_size
    );
}
