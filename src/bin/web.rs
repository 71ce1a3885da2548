//! Single binary web server: JSON API over the simulator.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, MAX_BATCH_ITERATIONS.

use actix_web::{
    delete, get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use meta_sim::ingest::{build_table, read_matchups};
use meta_sim::{
    run_batch_with_progress, run_stage, summarize, BatchProgress, BatchResults, DeckSummary,
    InMemoryRecordStore, TournamentConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Inactivity threshold: sessions and finished jobs untouched this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// One ad hoc run: a private Day1 -> Day2 hand-off store.
///
/// `running` is set while a stage works on a copy of `store`; a second
/// stage request for the same session is refused until it is written back.
struct SessionEntry {
    store: InMemoryRecordStore,
    running: bool,
    last_activity: Instant,
}

/// Why a session's store could not be checked out.
#[derive(Debug, Eq, PartialEq)]
enum CheckoutError {
    Lock,
    NotFound,
    Busy,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
enum JobStatus {
    Running,
    Completed,
    Cancelled,
    Failed,
}

/// Client-visible state of a background batch.
#[derive(Clone, Debug, Serialize)]
struct BatchJob {
    id: Uuid,
    status: JobStatus,
    iterations: u32,
    progress: Option<BatchProgress>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    results: Option<BatchResults>,
    report: Option<Vec<DeckSummary>>,
    error: Option<String>,
}

struct BatchEntry {
    job: BatchJob,
    cancel: Arc<AtomicBool>,
    last_activity: Instant,
}

struct Settings {
    max_batch_iterations: u32,
}

struct SimState {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    batches: RwLock<HashMap<Uuid, BatchEntry>>,
    settings: Settings,
}

type AppState = Data<SimState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct CreatedResponse {
    id: Uuid,
}

#[derive(Deserialize)]
struct StartBatchBody {
    config: TournamentConfig,
    #[serde(default = "default_iterations")]
    iterations: u32,
}

fn default_iterations() -> u32 {
    1000
}

/// Path segment: session or job id.
#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

fn error_json(status: actix_web::http::StatusCode, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "error": message.to_string() }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "meta-sim",
    })
}

/// Parse a matchup CSV body into decks + win-rate matrix.
#[post("/api/matchups/import")]
async fn api_import_matchups(body: String) -> HttpResponse {
    match read_matchups(body.as_bytes()) {
        Ok(rows) => HttpResponse::Ok().json(build_table(&rows)),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Create a session that carries Day-1 standings into a later Day-2 request.
#[post("/api/sessions")]
async fn api_create_session(state: AppState) -> HttpResponse {
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let id = Uuid::new_v4();
    g.insert(
        id,
        SessionEntry {
            store: InMemoryRecordStore::new(),
            running: false,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(CreatedResponse { id })
}

/// Run the stage named in the config against the session's store.
#[post("/api/sessions/{id}/stages")]
async fn api_run_stage(
    state: AppState,
    path: Path<IdPath>,
    body: Json<TournamentConfig>,
) -> HttpResponse {
    let mut store = match checkout_store(&state, path.id) {
        Ok(store) => store,
        Err(CheckoutError::Lock) => return HttpResponse::InternalServerError().body("lock error"),
        Err(CheckoutError::NotFound) => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" }))
        }
        Err(CheckoutError::Busy) => {
            return HttpResponse::Conflict()
                .json(serde_json::json!({ "error": "A stage is already running for this session" }))
        }
    };

    let config = body.into_inner();
    let outcome = web::block(move || {
        let mut rng = rand::thread_rng();
        let result = run_stage(&config, None, Some(&mut store), &mut rng);
        (result, store)
    })
    .await;

    let (result, store) = match outcome {
        Ok(done) => done,
        Err(e) => {
            release_store(&state, path.id, None);
            return error_json(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR, e);
        }
    };
    release_store(&state, path.id, Some(store));

    match result {
        Ok(stage) => HttpResponse::Ok().json(stage),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Start a batch on a blocking worker thread; poll it with GET.
#[post("/api/batches")]
async fn api_start_batch(state: AppState, body: Json<StartBatchBody>) -> HttpResponse {
    let StartBatchBody { config, iterations } = body.into_inner();
    let max = state.settings.max_batch_iterations;
    if iterations == 0 || iterations > max {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("iterations must be between 1 and {}", max)
        }));
    }

    let id = Uuid::new_v4();
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let mut g = match state.batches.write() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        g.insert(
            id,
            BatchEntry {
                job: BatchJob {
                    id,
                    status: JobStatus::Running,
                    iterations,
                    progress: None,
                    started_at: Utc::now(),
                    finished_at: None,
                    results: None,
                    report: None,
                    error: None,
                },
                cancel: cancel.clone(),
                last_activity: Instant::now(),
            },
        );
    }

    log::info!("Batch {} started: {} iterations", id, iterations);
    let worker_state = state.clone();
    tokio::task::spawn_blocking(move || {
        let mut rng = rand::thread_rng();
        let outcome = run_batch_with_progress(&config, iterations, None, &mut rng, |progress| {
            update_job(&worker_state, id, |job| job.progress = Some(*progress));
            if cancel.load(Ordering::Relaxed) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        let cancelled = cancel.load(Ordering::Relaxed);
        update_job(&worker_state, id, |job| {
            job.finished_at = Some(Utc::now());
            match outcome {
                Ok(results) => {
                    job.status = if cancelled {
                        JobStatus::Cancelled
                    } else {
                        JobStatus::Completed
                    };
                    job.report = Some(summarize(&results));
                    job.results = Some(results);
                }
                Err(e) => {
                    job.status = JobStatus::Failed;
                    job.error = Some(e.to_string());
                }
            }
            log::info!("Batch {} finished: {:?}", id, job.status);
        });
    });

    HttpResponse::Ok().json(CreatedResponse { id })
}

/// Current status, progress, and (when done) results of a batch.
#[get("/api/batches/{id}")]
async fn api_get_batch(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.batches.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.job)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No batch" })),
    }
}

/// Ask a running batch to stop after its current iteration.
#[delete("/api/batches/{id}")]
async fn api_cancel_batch(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.batches.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => {
            entry.cancel.store(true, Ordering::Relaxed);
            log::info!("Batch {} cancellation requested", path.id);
            HttpResponse::Ok().json(&entry.job)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No batch" })),
    }
}

/// Copy a session's store out for one stage and mark the session running.
fn checkout_store(state: &SimState, id: Uuid) -> Result<InMemoryRecordStore, CheckoutError> {
    let mut g = state.sessions.write().map_err(|_| CheckoutError::Lock)?;
    let entry = g.get_mut(&id).ok_or(CheckoutError::NotFound)?;
    if entry.running {
        return Err(CheckoutError::Busy);
    }
    entry.running = true;
    entry.last_activity = Instant::now();
    Ok(entry.store.clone())
}

/// Clear the running mark, writing back the stage's store when it finished.
fn release_store(state: &SimState, id: Uuid, store: Option<InMemoryRecordStore>) {
    if let Ok(mut g) = state.sessions.write() {
        if let Some(entry) = g.get_mut(&id) {
            if let Some(store) = store {
                entry.store = store;
            }
            entry.running = false;
        }
    }
}

fn update_job(state: &SimState, id: Uuid, apply: impl FnOnce(&mut BatchJob)) {
    if let Ok(mut g) = state.batches.write() {
        if let Some(entry) = g.get_mut(&id) {
            apply(&mut entry.job);
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_batch_iterations() -> u32 {
    10_000
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let max_batch_iterations: u32 = std::env::var("MAX_BATCH_ITERATIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(default_max_batch_iterations);
    let bind = (host.as_str(), port);

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(SimState {
        sessions: RwLock::new(HashMap::new()),
        batches: RwLock::new(HashMap::new()),
        settings: Settings {
            max_batch_iterations,
        },
    });

    // Every 30 minutes, drop sessions and finished batches idle for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut removed = 0;
            if let Ok(mut g) = state_cleanup.sessions.write() {
                let before = g.len();
                g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
                removed += before - g.len();
            }
            if let Ok(mut g) = state_cleanup.batches.write() {
                let before = g.len();
                g.retain(|_, entry| {
                    entry.job.status == JobStatus::Running
                        || entry.last_activity.elapsed() < INACTIVITY_TIMEOUT
                });
                removed += before - g.len();
            }
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s)/batch(es)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(16 * 1024 * 1024))
            .app_data(web::PayloadConfig::default().limit(16 * 1024 * 1024))
            .service(api_health)
            .service(api_import_matchups)
            .service(api_create_session)
            .service(api_run_stage)
            .service(api_start_batch)
            .service(api_get_batch)
            .service(api_cancel_batch)
    })
    .bind(bind)?
    .run()
    .await
}
