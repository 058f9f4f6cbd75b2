//! HTTP presentation boundary.
//!
//! Serves place records annotated with their sunlit flag so a map front end
//! can color markers for any position of its time-of-day control. The API
//! never stores evaluation results; every request recomputes them for the
//! requested instant.

use std::path::PathBuf;

use actix_web::error::{ErrorBadRequest, ErrorInternalServerError, ErrorNotFound};
use actix_web::web::{Data, Json, Path, Query};
use actix_web::{App, HttpServer, get};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::constants::MINUTES_PER_DAY;
use crate::place::Place;
use crate::repository::PlaceRepository;
use crate::solar::SpaProvider;
use crate::sunlight::{Evaluator, SunlightParams};

struct AppState {
    db_path: PathBuf,
    params: SunlightParams,
}

#[derive(Debug, Deserialize)]
struct TimeOfDayArgs {
    /// Minutes past local midnight today (0–1439). Absent means "now".
    minutes: Option<u32>,
}

/// A place plus its derived, non-persisted sunlit flag.
///
/// `is_in_sun` is `null` when the place could not be evaluated (bad
/// coordinates, provider failure); the rest of the batch is unaffected.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnotatedPlace {
    #[serde(flatten)]
    place: Place,
    is_in_sun: Option<bool>,
}

/// Resolve a slider position to an absolute instant.
///
/// The control is minute-resolution over today in the server's local
/// timezone; the evaluator itself only ever sees a fully resolved UTC
/// instant.
fn resolve_instant(minutes: Option<u32>) -> Result<DateTime<Utc>> {
    let Some(minutes) = minutes else {
        return Ok(Utc::now());
    };
    if minutes >= MINUTES_PER_DAY {
        return Err(anyhow!(
            "minutes must be below {MINUTES_PER_DAY}, got {minutes}"
        ));
    }
    // Wall-clock semantics: N minutes reads as HH:MM on today's local date.
    let time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        .expect("minutes already range-checked");
    let local = Local::now()
        .date_naive()
        .and_time(time)
        .and_local_timezone(Local)
        .earliest()
        .context("Could not resolve local time of day")?;
    Ok(local.with_timezone(&Utc))
}

fn annotate(place: Place, evaluator: &Evaluator<SpaProvider>, at: DateTime<Utc>) -> AnnotatedPlace {
    let is_in_sun = match evaluator.is_in_sun(&place, at) {
        Ok(lit) => Some(lit),
        Err(e) => {
            log_warning!("Could not evaluate place '{}': {e}", place.id);
            None
        }
    };
    AnnotatedPlace { place, is_in_sun }
}

#[get("/places")]
async fn get_places(
    state: Data<AppState>,
    args: Query<TimeOfDayArgs>,
) -> actix_web::Result<Json<Vec<AnnotatedPlace>>> {
    let at = resolve_instant(args.minutes).map_err(ErrorBadRequest)?;
    let repo = PlaceRepository::open(&state.db_path).map_err(ErrorInternalServerError)?;
    let places = repo.select_all().map_err(ErrorInternalServerError)?;

    let evaluator = Evaluator::with_params(SpaProvider, state.params);
    let annotated = places
        .into_iter()
        .map(|place| annotate(place, &evaluator, at))
        .collect();
    Ok(Json(annotated))
}

#[get("/places/{id}")]
async fn get_place(
    state: Data<AppState>,
    path: Path<String>,
    args: Query<TimeOfDayArgs>,
) -> actix_web::Result<Json<AnnotatedPlace>> {
    let id = path.into_inner();
    let at = resolve_instant(args.minutes).map_err(ErrorBadRequest)?;
    let repo = PlaceRepository::open(&state.db_path).map_err(ErrorInternalServerError)?;
    let place = repo
        .select_by_id(&id)
        .map_err(ErrorInternalServerError)?
        .ok_or_else(|| ErrorNotFound(format!("no place with id '{id}'")))?;

    let evaluator = Evaluator::with_params(SpaProvider, state.params);
    Ok(Json(annotate(place, &evaluator, at)))
}

/// Run the HTTP server until interrupted.
pub async fn run_server(config: &Config) -> Result<()> {
    let address = config.listen_address();
    let port = config.listen_port();
    let state = Data::new(AppState {
        db_path: config.db_path()?,
        params: config.sunlight_params(),
    });

    log_block_start!("Serving places on http://{address}:{port}");
    log_indented!("GET /places?minutes=N");
    log_indented!("GET /places/{{id}}?minutes=N");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(get_places)
            .service(get_place)
    })
    .bind((address.as_str(), port))
    .with_context(|| format!("Failed to bind {address}:{port}"))?
    .run()
    .await
    .context("HTTP server terminated abnormally")
}
