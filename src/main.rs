use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use screenmark::config::AppConfig;
use screenmark::error::AppError;
use screenmark::screening::{
    screening_router, validate_criteria, Criterion, MemoryEvaluationRepository,
    MemorySignalRepository, ResumeId, RoleId, ScoreBreakdown, ScreeningService, Signal,
    WeightPolicy,
};
use screenmark::telemetry;

#[derive(Clone)]
struct OpsState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "screenmark",
    about = "Score resumes against weighted role criteria with auditable evidence",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one resume text file against a criteria JSON file
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Path to the resume as plain UTF-8 text
    #[arg(long)]
    resume: PathBuf,
    /// Path to a JSON array of criteria ({id, name, weight, type, config})
    #[arg(long)]
    criteria: PathBuf,
    /// Reference date for open-ended ranges (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Require the criteria weights to sum to exactly 100
    #[arg(long)]
    enforce_weights: bool,
    /// Print the extracted signals before the breakdown
    #[arg(long)]
    list_signals: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Score(args) => run_score(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let service = Arc::new(ScreeningService::new(
        Arc::new(MemorySignalRepository::default()),
        Arc::new(MemoryEvaluationRepository::default()),
        config.evaluation.weight_policy(),
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = OpsState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(screening_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "resume screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        resume,
        criteria,
        today,
        enforce_weights,
        list_signals,
    } = args;

    let resume_text = std::fs::read_to_string(&resume)?;
    let criteria: Vec<Criterion> = serde_json::from_str(&std::fs::read_to_string(&criteria)?)?;
    validate_criteria(&criteria).map_err(screenmark::screening::ScreeningServiceError::from)?;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let policy = if enforce_weights {
        WeightPolicy::Enforce
    } else {
        WeightPolicy::Ignore
    };

    let service = ScreeningService::new(
        Arc::new(MemorySignalRepository::default()),
        Arc::new(MemoryEvaluationRepository::default()),
        policy,
    );

    let resume_id = ResumeId("cli-resume".to_string());
    let role_id = RoleId("cli-role".to_string());

    let signals = service.ingest(&resume_id, &resume_text, &[], today)?;
    let breakdown = service.evaluate(&role_id, &resume_id, &criteria, &resume_text)?;

    if list_signals {
        render_signals(&signals);
    }
    render_breakdown(&breakdown, today);

    Ok(())
}

fn render_signals(signals: &[Signal]) {
    println!("Extracted signals");
    for signal in signals {
        println!(
            "- {:?} = {} ({:?}): {}",
            signal.kind, signal.value, signal.confidence, signal.evidence_snippet
        );
    }
    println!();
}

fn render_breakdown(breakdown: &ScoreBreakdown, today: NaiveDate) {
    println!("Score breakdown (evaluated {today})");
    for result in &breakdown.criterion_scores {
        println!(
            "- {} (weight {}): {:.3}",
            result.criterion_name, result.weight, result.score
        );
        for line in &result.evidence {
            println!("    {line}");
        }
    }
    println!(
        "\nTotal: {:.4} ({}%)",
        breakdown.total_score, breakdown.total_score_pct
    );
}
