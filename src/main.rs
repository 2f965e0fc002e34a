use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use oz_engine::api::{self, AppState, SecurityConfig, SnapshotInput};
use oz_engine::client::OzClient;
use oz_engine::config::{EngineConfig, ServerConfig};
use oz_engine::engine::{self, ActivityTracker, EvaluationInput};
use oz_engine::models::*;
use oz_engine::render;

#[derive(Parser)]
#[command(name = "oz")]
#[command(about = "Cognitive load estimator and impulse gate")]
struct Cli {
    /// Engine config file (JSON). Defaults are used when absent.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Port for HTTP API (overrides OZ_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Evaluate load from counts of open work, or from a records file
    Evaluate {
        /// JSON file with `projects`, `tasks` and `dumps` arrays. Replaces the
        /// count flags and adds the orbit tree to the report.
        #[arg(long)]
        records: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        projects: u32,
        #[arg(long, default_value_t = 0)]
        tasks: u32,
        #[arg(long, default_value_t = 0)]
        dumps: u32,
        #[arg(long, default_value_t = 0)]
        overdue: u32,
        #[arg(long, default_value_t = 0)]
        blocked: u32,
        #[arg(long, default_value_t = 0)]
        setbacks: u32,
        /// Minutes since the last interaction
        #[arg(long, default_value_t = 0.0)]
        idle_minutes: f64,
        /// Print JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Print a wizard message
    Message {
        #[arg(value_parser = parse_category)]
        category: MessageCategory,
        #[arg(long, value_parser = parse_status)]
        status: Option<Status>,
        /// Onboarding stage key (day1..day7)
        #[arg(long)]
        stage: Option<String>,
        /// Intervention key
        #[arg(long)]
        intervention: Option<String>,
        /// Seed for the pool draw
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show how the gate would treat an impulse
    Impulse {
        /// Impulse type tag, e.g. new_project or purchase
        impulse_type: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_status, default_value = "stable")]
        status: Status,
    },
    /// Check a running server
    Status {
        /// API base URL (overrides OZ_URL)
        #[arg(long)]
        url: Option<String>,
    },
}

fn parse_status(s: &str) -> Result<Status, String> {
    Status::from_str(s).ok_or_else(|| {
        format!("unknown status '{}', expected stable, elevated, critical or overload", s)
    })
}

fn parse_category(s: &str) -> Result<MessageCategory, String> {
    MessageCategory::from_str(s).ok_or_else(|| {
        format!(
            "unknown category '{}', expected greeting, completion, onboarding, intervention or status",
            s
        )
    })
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "oz_engine=debug,tower_http=debug".into()),
    );

    // Reports go to stdout; keep logs out of the way.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_engine_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path).context("Failed to load engine config"),
        None => Ok(EngineConfig::default()),
    }
}

/// Evaluate a records file as a one-off session idle for `idle_minutes`.
fn evaluate_records(
    path: &Path,
    idle_minutes: f64,
    config: &EngineConfig,
) -> anyhow::Result<(CognitiveSnapshot, HashMap<Uuid, String>)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    let input: SnapshotInput = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse records in {}", path.display()))?;

    let now = Utc::now();
    let idle = chrono::Duration::seconds((idle_minutes.max(0.0) * 60.0) as i64);
    let tracker = ActivityTracker::new(now - idle);
    let snapshot = engine::evaluate(
        EvaluationInput {
            projects: input.projects.as_deref(),
            tasks: input.tasks.as_deref(),
            dumps: input.dumps.as_deref(),
        },
        &tracker,
        now,
        config,
    );

    let names = input
        .projects
        .iter()
        .flatten()
        .filter_map(|p| p.name.clone().map(|name| (p.id, name)))
        .collect();
    Ok((snapshot, names))
}

async fn serve(port: Option<u16>, config: EngineConfig) -> anyhow::Result<()> {
    let mut server = ServerConfig::from_env();
    if let Some(port) = port {
        server.port = port;
    }

    let security = SecurityConfig::from_server_config(&server);
    let state = AppState::new(config);

    let limiter = security.rate_limiter.clone();
    let sessions = state.sessions.clone();
    let session_ttl = chrono::Duration::minutes(server.session_ttl_minutes);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            if let Some(limiter) = &limiter {
                limiter.cleanup();
            }
            sessions.cleanup(Utc::now(), session_ttl);
        }
    });

    let app = api::create_router_with_state(state, security);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", server.port))
        .await
        .with_context(|| format!("Failed to bind port {}", server.port))?;
    tracing::info!("Oz engine listening on http://127.0.0.1:{}", server.port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_engine_config(cli.config.as_ref())?;

    match cli.command {
        Some(Commands::Serve { port }) => serve(port, config).await?,
        Some(Commands::Evaluate {
            records,
            projects,
            tasks,
            dumps,
            overdue,
            blocked,
            setbacks,
            idle_minutes,
            json,
        }) => {
            let (snapshot, names) = match records {
                Some(path) => evaluate_records(&path, idle_minutes, &config)?,
                None => {
                    let counts = WorkItemCounts {
                        open_projects: projects,
                        open_tasks: tasks,
                        unprocessed_dumps: dumps,
                        overdue_tasks: overdue,
                        blocked_tasks: blocked,
                        setback_tasks: setbacks,
                    };
                    let snapshot = engine::evaluate_counts(counts, &[], idle_minutes, &config);
                    (snapshot, HashMap::new())
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render::render_snapshot(&snapshot, &names));
            }
        }
        Some(Commands::Message {
            category,
            status,
            stage,
            intervention,
            seed,
        }) => {
            let request = MessageRequest {
                category,
                status,
                stage: stage.as_deref().and_then(OnboardingStage::from_str),
                intervention: intervention.as_deref().and_then(InterventionKey::from_str),
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let message = engine::get_message(&request, &mut rng);
            println!("[{}] {}", message.tone.as_str(), message.text);
        }
        Some(Commands::Impulse {
            impulse_type,
            name,
            status,
        }) => {
            let impulse = Impulse {
                impulse_type: ImpulseType::parse(&impulse_type),
                name,
            };
            let assessment = engine::assess(&impulse, status);
            print!("{}", render::render_assessment(&assessment));
        }
        Some(Commands::Status { url }) => {
            let client = match url {
                Some(url) => OzClient::new(url, std::env::var("OZ_API_KEY").ok()),
                None => OzClient::from_env(),
            };
            match client.health().await {
                Ok(()) => println!("Oz engine is running at {}", client.base_url()),
                Err(e) => {
                    println!("Oz engine is not reachable at {}: {}", client.base_url(), e);
                    std::process::exit(1);
                }
            }
        }
        None => serve(None, config).await?,
    }

    Ok(())
}
