use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use orchestrator::{PlanService, Settings};
use planner_core::PlanRequest;
use server::{create_router, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Parser)]
#[command(name = "task-planner")]
#[command(about = "Turn a goal into a dependency-aware task plan", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Generate one plan and print it as JSON
    Plan {
        goal: String,

        /// Absolute deadline (YYYY-MM-DD); overrides --horizon-days
        #[arg(long)]
        target_date: Option<NaiveDate>,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        horizon_days: Option<u32>,

        /// Resources, constraints or priorities
        #[arg(long)]
        guidance: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env file is fine; real environment variables still apply.
    dotenv::dotenv().ok();
    init_tracing();

    let settings = Settings::from_env().context("Failed to load settings")?;

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(settings, &host, port).await,
        Some(Commands::Plan {
            goal,
            target_date,
            horizon_days,
            guidance,
        }) => {
            let request = PlanRequest {
                goal,
                target_date,
                horizon_days,
                guidance,
            };
            plan_once(settings, request).await
        }
        None => serve(settings, &cli.host, cli.port).await,
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "task_planner=info,server=info,orchestrator=info,llm=info,tower_http=info".into()
            }),
        )
        .init();
}

async fn serve(settings: Settings, host: &str, port: u16) -> Result<()> {
    let app_name = settings.app_name.clone();
    let state = AppState::new(settings).context("Failed to initialize plan service")?;
    let provider = state.plan_service.provider_name().to_string();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;

    tracing::info!(
        app = %app_name,
        provider = %provider,
        "Server listening on {}",
        listener.local_addr()?
    );
    tracing::info!("Swagger UI: http://localhost:{}/swagger-ui", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn plan_once(settings: Settings, request: PlanRequest) -> Result<()> {
    let service = PlanService::from_settings(&settings).context("Failed to initialize plan service")?;
    tracing::info!(provider = %service.provider_name(), "Generating plan");

    let response = service
        .generate(&request)
        .await
        .context("Plan generation failed")?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
