//! Single binary web server: JSON API over the tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, TOURNAMENT_TTL_HOURS.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use arena_tournament::csv_io::{import_team_names, write_standings_csv};
use arena_tournament::suggest::{fresh_names, FallbackNames};
use arena_tournament::{
    group_standings, move_match_to_table, overall_standings, parse_score, podium, record_result,
    start_tournament, table_occupancy, tables_in_use_by_round, ErrorKind, MatchId, PlayerId,
    RandomIds, TeamId, Tournament, TournamentError, TournamentId, TournamentSettings,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament document + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Idle entries are swept periodically.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Server settings read from the environment at start-up.
struct ServerConfig {
    host: String,
    port: u16,
    inactivity_timeout: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let ttl_hours: u64 = std::env::var("TOURNAMENT_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(12);
        Self {
            host,
            port,
            inactivity_timeout: Duration::from_secs(ttl_hours * 3600),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    location_label: Option<String>,
    #[serde(default)]
    settings: TournamentSettings,
}

#[derive(Deserialize)]
struct TeamNameBody {
    name: String,
}

#[derive(Deserialize)]
struct RosterPlayerBody {
    name: String,
    number: u32,
}

/// Scores arrive as whatever the form sent: numbers or strings.
#[derive(Deserialize)]
struct ScoreBody {
    home_score: serde_json::Value,
    away_score: serde_json::Value,
}

#[derive(Deserialize)]
struct TableBody {
    table: u32,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TeamPath {
    id: TournamentId,
    team_id: TeamId,
}

#[derive(Deserialize)]
struct RosterPath {
    id: TournamentId,
    team_id: TeamId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn score_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::IllegalState => HttpResponse::Conflict().json(body),
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Run a snapshot transformation; the stored document is replaced only on success.
fn apply<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> Result<Tournament, TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match f(&entry.tournament) {
        Ok(next) => {
            entry.tournament = next;
            HttpResponse::Ok().json(&entry.tournament)
        }
        Err(e) => error_response(&e),
    }
}

/// Same as `apply` for the in-place setup editors on `Tournament`.
fn edit<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    apply(state, id, |t| {
        let mut next = t.clone();
        f(&mut next)?;
        Ok(next)
    })
}

/// Read-only view of one tournament.
fn view<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&entry.tournament)
        }
        None => not_found(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "arena-tournament",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    if let Err(e) = body.settings.validate() {
        return error_response(&e);
    }
    let mut tournament = Tournament::new(body.name.trim(), body.settings, &mut RandomIds);
    if let Some(label) = body.location_label.filter(|l| !l.trim().is_empty()) {
        tournament.location_label = label.trim().to_string();
    }
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created tournament {:?} ({})", tournament.name, id);
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| HttpResponse::Ok().json(t))
}

/// Replace the settings (Setup only).
#[put("/api/tournaments/{id}/settings")]
async fn api_update_settings(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentSettings>,
) -> HttpResponse {
    let settings = body.into_inner();
    edit(&state, path.id, |t| t.update_settings(settings))
}

#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<TournamentPath>, body: Json<TeamNameBody>) -> HttpResponse {
    edit(&state, path.id, |t| t.add_team(&body.name, &mut RandomIds).map(|_| ()))
}

/// Bulk add from a CSV body, one name per line. All-or-nothing.
#[post("/api/tournaments/{id}/teams/import")]
async fn api_import_teams(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    let names = match import_team_names(body.as_bytes()) {
        Ok(names) => names,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    edit(&state, path.id, |t| {
        for name in &names {
            t.add_team(name, &mut RandomIds)?;
        }
        Ok(())
    })
}

#[put("/api/tournaments/{id}/teams/{team_id}")]
async fn api_rename_team(state: AppState, path: Path<TeamPath>, body: Json<TeamNameBody>) -> HttpResponse {
    edit(&state, path.id, |t| t.rename_team(path.team_id, &body.name))
}

#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TeamPath>) -> HttpResponse {
    edit(&state, path.id, |t| t.remove_team(path.team_id))
}

#[post("/api/tournaments/{id}/teams/{team_id}/players")]
async fn api_add_roster_player(
    state: AppState,
    path: Path<TeamPath>,
    body: Json<RosterPlayerBody>,
) -> HttpResponse {
    edit(&state, path.id, |t| {
        t.add_roster_player(path.team_id, &body.name, body.number, &mut RandomIds)
            .map(|_| ())
    })
}

#[delete("/api/tournaments/{id}/teams/{team_id}/players/{player_id}")]
async fn api_remove_roster_player(state: AppState, path: Path<RosterPath>) -> HttpResponse {
    edit(&state, path.id, |t| t.remove_roster_player(path.team_id, path.player_id))
}

/// Start the tournament (Setup -> first stage fixtures).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, |t| {
        start_tournament(t, &mut RandomIds, &mut rand::thread_rng())
    })
}

/// Record (or correct) a match score.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_record_score(state: AppState, path: Path<MatchPath>, body: Json<ScoreBody>) -> HttpResponse {
    apply(&state, path.id, |t| {
        let home = parse_score(&score_text(&body.home_score))?;
        let away = parse_score(&score_text(&body.away_score))?;
        record_result(t, path.match_id, home, away, &mut RandomIds)
    })
}

/// Manually move a match to another table.
#[put("/api/tournaments/{id}/matches/{match_id}/table")]
async fn api_move_match(state: AppState, path: Path<MatchPath>, body: Json<TableBody>) -> HttpResponse {
    apply(&state, path.id, |t| move_match_to_table(t, path.match_id, body.table))
}

/// Tables already taken in the match's round, for the table picker.
#[get("/api/tournaments/{id}/matches/{match_id}/tables-in-use")]
async fn api_tables_in_use(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    view(&state, path.id, |t| match tables_in_use_by_round(t, path.match_id) {
        Ok(tables) => HttpResponse::Ok().json(tables),
        Err(e) => error_response(&e),
    })
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| HttpResponse::Ok().json(overall_standings(t)))
}

#[get("/api/tournaments/{id}/standings/groups")]
async fn api_group_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| HttpResponse::Ok().json(group_standings(t)))
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| {
        let mut out = Vec::new();
        match write_standings_csv(t, &mut out) {
            Ok(()) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(out),
            Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
        }
    })
}

#[get("/api/tournaments/{id}/tables")]
async fn api_tables(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| HttpResponse::Ok().json(table_occupancy(t)))
}

#[get("/api/tournaments/{id}/podium")]
async fn api_podium(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| match podium(t) {
        Some(p) => HttpResponse::Ok().json(p),
        None => HttpResponse::Conflict().json(serde_json::json!({ "error": "Tournament not finished" })),
    })
}

#[get("/api/tournaments/{id}/team-names")]
async fn api_suggest_names(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| HttpResponse::Ok().json(fresh_names(&FallbackNames, t)))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments idle past the timeout
    let state_cleanup = state.clone();
    let inactivity_timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_update_settings)
            .service(api_import_teams)
            .service(api_add_team)
            .service(api_rename_team)
            .service(api_remove_team)
            .service(api_add_roster_player)
            .service(api_remove_roster_player)
            .service(api_start_tournament)
            .service(api_record_score)
            .service(api_move_match)
            .service(api_tables_in_use)
            .service(api_standings_csv)
            .service(api_group_standings)
            .service(api_standings)
            .service(api_tables)
            .service(api_podium)
            .service(api_suggest_names)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
